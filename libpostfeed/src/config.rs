//! Configuration management for Postfeed

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, Result};

pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub ui: UiSettings,
}

/// Remote post service location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Fetch limits for the two list operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedConfig {
    #[serde(default = "default_initial_limit")]
    pub initial_limit: usize,
    #[serde(default = "default_refresh_limit")]
    pub refresh_limit: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiSettings {
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_initial_limit() -> usize {
    10
}

fn default_refresh_limit() -> usize {
    20
}

fn default_tick_rate_ms() -> u64 {
    100
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            initial_limit: default_initial_limit(),
            refresh_limit: default_refresh_limit(),
        }
    }
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
        }
    }
}

impl ServiceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Load configuration from the default location
    ///
    /// A missing config file is not an error: the built-in defaults point at
    /// the public placeholder service. `POSTFEED_BASE_URL` overrides the
    /// configured base URL.
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path()?;
        let mut config = if config_path.exists() {
            Self::load_from_path(&config_path)?
        } else {
            tracing::debug!("No config at {}, using defaults", config_path.display());
            Self::default()
        };

        if let Ok(base_url) = std::env::var("POSTFEED_BASE_URL") {
            config.service.base_url = base_url;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::ParseError)?;
        Ok(config)
    }

    /// Reject settings that would make every request fail
    pub fn validate(&self) -> Result<()> {
        if self.service.base_url.trim().is_empty() {
            return Err(ConfigError::MissingField("service.base_url".to_string()).into());
        }
        if self.service.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "service.timeout_secs must be greater than zero".to_string(),
            )
            .into());
        }
        if self.feed.initial_limit == 0 {
            return Err(ConfigError::InvalidValue(
                "feed.initial_limit must be greater than zero".to_string(),
            )
            .into());
        }
        if self.feed.refresh_limit == 0 {
            return Err(ConfigError::InvalidValue(
                "feed.refresh_limit must be greater than zero".to_string(),
            )
            .into());
        }
        Ok(())
    }
}

/// Resolve the configuration file path following XDG Base Directory spec
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("POSTFEED_CONFIG") {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingField("config directory".to_string()))?;

    Ok(config_dir.join("postfeed").join("config.toml"))
}

/// Resolve the data directory path following XDG Base Directory spec
pub fn resolve_data_path() -> Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| ConfigError::MissingField("data directory".to_string()))?;

    Ok(data_dir.join("postfeed"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.service.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.service.timeout(), Duration::from_secs(30));
        assert_eq!(config.feed.initial_limit, 10);
        assert_eq!(config.feed.refresh_limit, 20);
        assert_eq!(config.ui.tick_rate_ms, 100);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[service]
base_url = "http://localhost:3000"

[feed]
refresh_limit = 50
"#,
        )
        .unwrap();

        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.service.base_url, "http://localhost:3000");
        assert_eq!(config.service.timeout_secs, 30);
        assert_eq!(config.feed.initial_limit, 10);
        assert_eq!(config.feed.refresh_limit, 50);
    }

    #[test]
    fn test_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[service\nbase_url = ").unwrap();

        let err = Config::load_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn test_validate_rejects_zero_limits() {
        let mut config = Config::default();
        config.feed.initial_limit = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.feed.refresh_limit = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_base_url() {
        let mut config = Config::default();
        config.service.base_url = "  ".to_string();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("service.base_url"));
    }

    #[test]
    #[serial]
    fn test_load_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.toml");
        std::env::set_var("POSTFEED_CONFIG", &path);
        std::env::remove_var("POSTFEED_BASE_URL");

        let config = Config::load();
        std::env::remove_var("POSTFEED_CONFIG");

        assert_eq!(config.unwrap(), Config::default());
    }

    #[test]
    #[serial]
    fn test_base_url_env_override() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[service]\nbase_url = \"http://from-file\"\n").unwrap();
        std::env::set_var("POSTFEED_CONFIG", &path);
        std::env::set_var("POSTFEED_BASE_URL", "http://from-env");

        let config = Config::load();
        std::env::remove_var("POSTFEED_CONFIG");
        std::env::remove_var("POSTFEED_BASE_URL");

        assert_eq!(config.unwrap().service.base_url, "http://from-env");
    }
}
