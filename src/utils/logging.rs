// src/utils/logging.rs
use tracing_subscriber::{fmt, EnvFilter};

/// Sets up tracing for the CLI.
/// Reads filters from `RUST_LOG`, defaulting to "info". Output goes to stderr
/// so `--stdout` JSON stays clean.
pub fn setup_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // try_init: a second call (e.g. from tests) must not panic
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();

    tracing::debug!("Logging setup complete.");
}
