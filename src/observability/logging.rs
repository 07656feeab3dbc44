//! # Structured Logging
//!
//! Log subscriber initialization using the tracing ecosystem. The filter
//! comes from configuration but can always be overridden with `RUST_LOG`.
//! Secret values never appear in log events anywhere in this crate; only
//! key names and account/site scopes are logged.

use tracing_subscriber::EnvFilter;

use crate::config::ObservabilityConfig;
use crate::errors::{Error, Result};

/// Initialize the global tracing subscriber.
///
/// Fails if the configured filter does not parse or a subscriber is already
/// installed.
pub fn init_logging(config: &ObservabilityConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| {
            Error::config(format!("Invalid log filter '{}': {}", config.log_level, e))
        })?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    let result = if config.json_logs {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| Error::internal(format!("Failed to install tracing subscriber: {}", e)))
}
