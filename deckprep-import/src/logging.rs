//! Tracing subscriber setup
//!
//! `RUST_LOG` takes precedence over the configured level.

use crate::error::{ImportError, ImportResult};
use deckprep_common::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Install a global fmt subscriber
///
/// Returns `ImportError::Logging` if a global subscriber is already set
/// or the level directive is invalid.
pub fn init_logging(config: &LoggingConfig) -> ImportResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| ImportError::Logging(format!("Invalid log level '{}': {}", config.level, e)))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(config.ansi)
        .with_target(true)
        .try_init()
        .map_err(|e| ImportError::Logging(e.to_string()))
}
