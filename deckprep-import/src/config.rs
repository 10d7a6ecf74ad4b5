//! Metadata service configuration resolution
//!
//! Each setting is resolved independently with **ENV → TOML → default**
//! priority. Blank or unparseable values are skipped as if absent.

use deckprep_common::config::{TomlConfig, DEFAULT_METADATA_URL};
use std::time::Duration;
use tracing::{info, warn};

/// Overrides the metadata service base URL
pub const METADATA_URL_ENV: &str = "DECKPREP_METADATA_URL";

/// Overrides the per-request timeout (seconds)
pub const TIMEOUT_SECS_ENV: &str = "DECKPREP_TIMEOUT_SECS";

/// Default timeout for metadata service requests
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Default User-Agent header
pub const DEFAULT_USER_AGENT: &str = concat!("deckprep/", env!("CARGO_PKG_VERSION"));

/// Resolved metadata service settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_METADATA_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Resolve service settings from environment and TOML config
pub fn resolve_service_config(toml_config: &TomlConfig) -> ServiceConfig {
    let toml_service = &toml_config.metadata_service;

    let env_url = std::env::var(METADATA_URL_ENV)
        .ok()
        .filter(|v| is_valid_value(v));
    let toml_url = toml_service.base_url.clone().filter(|v| is_valid_value(v));

    if env_url.is_some() && toml_url.is_some() {
        warn!(
            "Metadata service URL found in environment and TOML. Using environment (highest priority)."
        );
    }

    let base_url = match (env_url, toml_url) {
        (Some(url), _) => {
            info!(base_url = %url, "Metadata service URL loaded from environment variable");
            url
        }
        (None, Some(url)) => {
            info!(base_url = %url, "Metadata service URL loaded from TOML config");
            url
        }
        (None, None) => DEFAULT_METADATA_URL.to_string(),
    };

    let env_timeout = std::env::var(TIMEOUT_SECS_ENV)
        .ok()
        .and_then(|v| match v.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Some(secs),
            _ => {
                warn!(value = %v, "Ignoring invalid {}", TIMEOUT_SECS_ENV);
                None
            }
        });
    let timeout = env_timeout
        .or(toml_service.timeout_secs.filter(|secs| *secs > 0))
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_TIMEOUT);

    let user_agent = toml_service
        .user_agent
        .clone()
        .filter(|v| is_valid_value(v))
        .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

    ServiceConfig {
        base_url: base_url.trim_end_matches('/').to_string(),
        timeout,
        user_agent,
    }
}

/// Non-empty, non-whitespace
pub fn is_valid_value(value: &str) -> bool {
    !value.trim().is_empty()
}
