//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::{Color, ColoredString, Colorize};

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print success status (green checkmark)
pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Print completed action (green label)
pub fn action(label: &str, msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}: {}", label.green(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print indented detail (no color)
pub fn detail(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {}", msg);
}

/// Print plain output (no color, for data)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// Terminal color closest to a node's color tag.
pub fn tag_color(tag: &str) -> Color {
    match tag.to_ascii_lowercase().as_str() {
        "blue" | "indigo" | "sky" => Color::Blue,
        "violet" | "purple" | "fuchsia" | "pink" => Color::Magenta,
        "green" | "emerald" | "lime" => Color::Green,
        "teal" | "cyan" => Color::Cyan,
        "orange" | "amber" | "yellow" => Color::Yellow,
        "red" | "rose" => Color::Red,
        "slate" | "gray" | "grey" | "zinc" => Color::BrightBlack,
        _ => Color::White,
    }
}

/// Label colored by its node's color tag.
pub fn paint(label: &str, tag: &str) -> ColoredString {
    label.color(tag_color(tag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("blue", Color::Blue)]
    #[case("Rose", Color::Red)]
    #[case("teal", Color::Cyan)]
    #[case("#ff00ff", Color::White)]
    fn given_tag_when_mapping_then_returns_terminal_color(#[case] tag: &str, #[case] expected: Color) {
        assert_eq!(tag_color(tag), expected);
    }
}
