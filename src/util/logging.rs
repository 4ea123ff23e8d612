//! Tracing setup shared by the binary and the test harness

use tracing::level_filters::LevelFilter;
use tracing::Metadata;
use tracing_subscriber::filter::{filter_fn, FilterFn};

/// Targets whose events are dropped regardless of level.
pub const NOISY_MODULES: &[&str] = &["config::", "careertree::domain::arena"];

/// Map the count of `-d` flags to a level; anything past three is TRACE.
pub fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

pub fn noisy_module_filter() -> FilterFn<impl Fn(&Metadata<'_>) -> bool> {
    filter_fn(|metadata| {
        !NOISY_MODULES
            .iter()
            .any(|name| metadata.target().starts_with(name))
    })
}
