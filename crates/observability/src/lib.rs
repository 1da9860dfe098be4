//! Tracing/logging setup shared by binaries and tests.

/// Environment-driven configuration.
pub mod config;

/// Tracing configuration (filters, layers).
pub mod tracing;

pub use config::{ConfigError, LogFormat, ObservabilityConfig};

/// Initialize process-wide observability from the environment.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() -> Result<(), ConfigError> {
    let config = ObservabilityConfig::from_env()?;
    tracing::init(&config);
    Ok(())
}

/// Initialize logging for tests (captured per test, `RUST_LOG` honoured).
pub fn init_for_tests() {
    tracing::init_for_tests();
}
