//! Process-wide log output.
//!
//! The library itself only emits `tracing` events. Binaries that want to
//! see them call [`init`] once at startup.

use tracing_subscriber::EnvFilter;

/// Errors raised while installing the log subscriber.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// Another subscriber (ours or someone else's) was installed first.
    #[error("a global tracing subscriber is already installed")]
    AlreadyInitialized,
}

/// Installs a stderr subscriber filtered by `RUST_LOG`, defaulting to `info`.
///
/// # Errors
/// Returns [`LoggingError::AlreadyInitialized`] if a global subscriber is
/// already set.
pub fn init() -> Result<(), LoggingError> {
    init_with_default("info")
}

/// Like [`init`], with `directive` used when `RUST_LOG` is unset or invalid.
pub fn init_with_default(directive: &str) -> Result<(), LoggingError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|_| LoggingError::AlreadyInitialized)
}
