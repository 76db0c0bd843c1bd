//! Shell configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Settings for the `quoridor` shell.
///
/// Every field has a default, so an empty file (or no file) is valid.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Config {
    /// Tracing filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    log_filter: String,

    /// Identity of the hot-seat host.
    #[serde(default = "default_host_id")]
    host_id: String,

    /// Display name of the hot-seat host.
    #[serde(default = "default_host_name")]
    host_name: String,

    /// Identity of the hot-seat guest.
    #[serde(default = "default_guest_id")]
    guest_id: String,

    /// Display name of the hot-seat guest.
    #[serde(default = "default_guest_name")]
    guest_name: String,

    /// Print snapshots as pretty JSON instead of status lines.
    #[serde(default)]
    json: bool,
}

fn default_log_filter() -> String {
    "warn,strictly_quoridor=info".to_string()
}

fn default_host_id() -> String {
    "p1".to_string()
}

fn default_host_name() -> String {
    "Player 1".to_string()
}

fn default_guest_id() -> String {
    "p2".to_string()
}

fn default_guest_name() -> String {
    "Player 2".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            host_id: default_host_id(),
            host_name: default_host_name(),
            guest_id: default_guest_id(),
            guest_name: default_guest_name(),
            json: false,
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::parse(&content)?;
        info!(host = %config.host_id, guest = %config.guest_id, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        if config.host_id == config.guest_id {
            return Err(ConfigError::new(format!(
                "Host and guest share the id {}",
                config.host_id
            )));
        }
        Ok(config)
    }

    /// Loads the file if one is given, otherwise falls back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.host_id(), "p1");
        assert!(!config.json());
    }

    #[test]
    fn test_partial_config_keeps_other_defaults() {
        let config = Config::parse("host_name = \"Alice\"\njson = true\n").unwrap();
        assert_eq!(config.host_name(), "Alice");
        assert_eq!(config.guest_name(), "Player 2");
        assert!(*config.json());
    }

    #[test]
    fn test_shared_ids_rejected() {
        let err = Config::parse("host_id = \"x\"\nguest_id = \"x\"\n").unwrap_err();
        assert!(err.message.contains("share the id"));
        assert!(err.file.ends_with("config.rs"));
    }
}
