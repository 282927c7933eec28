//! Logging setup for the `tarama` binary.
//!
//! The library only emits `tracing` events; this installs the subscriber.
//! Output goes to stderr so stdout stays clean for results.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing with a default filter, overridable via `RUST_LOG`.
pub fn init_with_filter(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_target(false).with_writer(std::io::stderr))
        .init();
}
