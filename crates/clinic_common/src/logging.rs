//! Logging utilities for the clinic booking crates.
//!
//! Sets up a `tracing` subscriber once per process and offers a helper for
//! logging errors at a boundary.

use tracing::{error, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber at INFO.
///
/// ```
/// use clinic_common::logging;
///
/// logging::init();
/// // A second call is a no-op.
/// logging::init_with_level(tracing::Level::DEBUG);
/// ```
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific level for the `clinic*` targets.
///
/// When `RUST_LOG` is set it replaces the level entirely. Output goes to
/// stderr so it never interleaves with console prompts on stdout.
pub fn init_with_level(level: Level) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("clinic={}", level)));

    // try_init: a global subscriber may already be set (tests, repeated calls)
    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
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
