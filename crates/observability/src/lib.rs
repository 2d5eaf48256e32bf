//! Tracing/logging setup shared by the client binaries and the browser app.

/// Initialize process-wide tracing with the default configuration.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(&tracing::LogConfig::default());
}

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use self::tracing::{LogConfig, LogFormat};
