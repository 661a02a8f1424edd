//! Logging configuration.
//!
//! Everything goes to stderr so stdout stays clean for JSON output. Set
//! `DEBUG_LOGGING=1` to enable debug output for the spotlight crates.

use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Filter directive for the current environment
fn filter_directive(debug_logging: bool) -> &'static str {
    if debug_logging {
        // debug for spotlight crates, info for dependencies
        "info,spotlight=debug,spotlight_core=debug,spotlight_overlay=debug"
    } else {
        "info"
    }
}

/// Initialize stderr logging. Safe to call once per process.
pub fn init() {
    let debug_logging = std::env::var("DEBUG_LOGGING").is_ok();

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    let filter = EnvFilter::new(filter_directive(debug_logging));

    let result = tracing_subscriber::registry()
        .with(stderr_layer)
        .with(filter)
        .try_init();

    if let Err(e) = result {
        eprintln!("Failed to initialize logging: {e}");
        return;
    }
    tracing::debug!(debug_logging, "spotlight logging initialized");
}
