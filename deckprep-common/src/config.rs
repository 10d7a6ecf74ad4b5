//! Bootstrap configuration loading
//!
//! The TOML file holds the settings needed before any deck list is
//! processed: where the card metadata service lives and how to log.
//!
//! # Config File Resolution
//!
//! 1. `DECKPREP_CONFIG` environment variable (explicit path)
//! 2. `<platform config dir>/deckprep/config.toml`
//! 3. Built-in defaults (no file)

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable naming an explicit config file path
pub const CONFIG_PATH_ENV: &str = "DECKPREP_CONFIG";

/// Default card metadata service
pub const DEFAULT_METADATA_URL: &str = "https://api.scryfall.com";

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct TomlConfig {
    /// Card metadata service settings
    #[serde(default)]
    pub metadata_service: MetadataServiceConfig,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Card metadata service settings
///
/// Every field is optional in the file; absent values fall back to the
/// built-in defaults during resolution.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct MetadataServiceConfig {
    /// Base URL, without trailing slash (e.g. `https://api.scryfall.com`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// User-Agent header sent with every request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit ANSI colors
    #[serde(default)]
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            ansi: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Locate the config file following the resolution order above
///
/// Returns `None` when no file exists; callers then use `TomlConfig::default()`.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    dirs::config_dir()
        .map(|d| d.join("deckprep").join("config.toml"))
        .filter(|p| p.exists())
}

/// Load config from the resolved location, or defaults if there is none
pub fn load_default_config() -> Result<TomlConfig> {
    match resolve_config_path() {
        Some(path) => load_toml_config(&path),
        None => {
            debug!("No config file found, using built-in defaults");
            Ok(TomlConfig::default())
        }
    }
}

/// Read and parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;

    let config: TomlConfig = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;

    info!(path = %path.display(), "Loaded configuration");
    Ok(config)
}

/// Write config atomically (temp file in the same directory, then rename)
pub fn write_toml_config(config: &TomlConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)
        .map_err(|e| Error::Config(format!("Serialize TOML failed: {}", e)))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let tmp_path = path.with_extension("toml.tmp");
    std::fs::write(&tmp_path, content)?;
    std::fs::rename(&tmp_path, path)?;

    debug!(path = %path.display(), "Configuration written");
    Ok(())
}
