use careertree::cli::args::Cli;
use careertree::cli::execute_command;
use careertree::cli::output;
use careertree::util::logging::{level_for_verbosity, noisy_module_filter};
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.debug);

    if let Err(e) = execute_command(&cli) {
        output::error(&e);
        std::process::exit(e.exit_code());
    }
}

fn setup_logging(verbosity: u8) {
    if verbosity > 3 {
        eprintln!("Don't be crazy, max is -d -d -d");
    }
    let level = level_for_verbosity(verbosity);

    // stdout carries command output (JSON, trees), logs go to stderr
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbosity >= 2)
        .with_span_events(if level >= LevelFilter::DEBUG {
            FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        })
        .with_filter(level)
        .with_filter(noisy_module_filter());

    tracing_subscriber::registry().with(fmt_layer).init();
    tracing::info!(%level, "logging initialized");
}
