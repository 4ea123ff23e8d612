use std::sync::Once;

use tracing::info;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::util::logging::noisy_module_filter;

static TEST_SETUP: Once = Once::new();

/// One-time tracing setup for tests; RUST_LOG wins over the debug default.
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let layer = fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(noisy_module_filter())
            .with_filter(env_filter);

        if tracing::dispatcher::has_been_set() {
            return;
        }
        if let Err(e) = tracing_subscriber::registry().with(layer).try_init() {
            eprintln!("test logging not installed: {}", e);
            return;
        }
        info!("test logging ready");
    });
}
