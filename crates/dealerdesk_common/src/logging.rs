//! Logging utilities for DealerDesk.
//!
//! Every binary goes through [`init`] so that log lines share one format and
//! honour `RUST_LOG`.

use tracing::{error, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber. `dealerdesk*` targets log at INFO,
/// other targets follow `RUST_LOG`.
///
/// # Examples
///
/// ```
/// use dealerdesk_common::logging;
///
/// logging::init();
/// // A second call is a no-op.
/// logging::init();
/// ```
pub fn init() {
    let level = Level::INFO;
    let filter = EnvFilter::from_default_env();
    let filter = match format!("dealerdesk={}", level).parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    };

    // try_init: a global subscriber may already be installed (tests, embedders)
    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true)
                .with_thread_names(true),
        )
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}

/// Log an error with context at the ERROR level.
pub fn log_error<E: std::fmt::Display>(error: E, context: &str) {
    error!("{}: {}", context, error);
}
