//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (LUDEX_*)
//! 2. TOML config file (if LUDEX_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (LUDEX_*)
/// 2. TOML config file (if LUDEX_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// RAWG API key for upstream catalog calls.
    ///
    /// Set via LUDEX_RAWG_API_KEY environment variable.
    /// Required when the catalog client is constructed.
    #[serde(default)]
    pub rawg_api_key: Option<String>,

    /// Base URL of the upstream catalog API.
    ///
    /// Set via LUDEX_BASE_URL environment variable.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path to the SQLite cache database.
    ///
    /// Set via LUDEX_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Address the HTTP server binds to.
    ///
    /// Set via LUDEX_BIND_ADDR environment variable.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Response cache TTL in seconds.
    ///
    /// Set via LUDEX_CACHE_TTL_SECONDS environment variable.
    #[serde(default = "default_cache_ttl_seconds")]
    pub cache_ttl_seconds: i64,

    /// Upstream request timeout in milliseconds.
    ///
    /// Set via LUDEX_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Minimum interval between consecutive upstream calls, in milliseconds.
    ///
    /// Set via LUDEX_MIN_REQUEST_INTERVAL_MS environment variable.
    #[serde(default = "default_min_request_interval_ms")]
    pub min_request_interval_ms: u64,

    /// User-Agent string for upstream requests.
    ///
    /// Set via LUDEX_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "https://api.rawg.io/api".into()
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./ludex-cache.sqlite")
}

fn default_bind_addr() -> String {
    "0.0.0.0:8085".into()
}

fn default_cache_ttl_seconds() -> i64 {
    86_400 // 24 hours
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_min_request_interval_ms() -> u64 {
    250
}

fn default_user_agent() -> String {
    "ludex/0.1".into()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rawg_api_key: None,
            base_url: default_base_url(),
            db_path: default_db_path(),
            bind_addr: default_bind_addr(),
            cache_ttl_seconds: default_cache_ttl_seconds(),
            timeout_ms: default_timeout_ms(),
            min_request_interval_ms: default_min_request_interval_ms(),
            user_agent: default_user_agent(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Rate-limit interval as Duration.
    pub fn min_request_interval(&self) -> Duration {
        Duration::from_millis(self.min_request_interval_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `LUDEX_`
    /// 2. TOML file from `LUDEX_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("LUDEX_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("LUDEX_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Check if the RAWG API key is available (for deferred validation).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if the key is not set.
    pub fn require_rawg_api_key(&self) -> Result<&str, ConfigError> {
        self.rawg_api_key.as_deref().ok_or_else(|| ConfigError::Missing {
            field: "rawg_api_key".into(),
            hint: "Set LUDEX_RAWG_API_KEY environment variable".into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.base_url, "https://api.rawg.io/api");
        assert_eq!(config.db_path, PathBuf::from("./ludex-cache.sqlite"));
        assert_eq!(config.bind_addr, "0.0.0.0:8085");
        assert_eq!(config.cache_ttl_seconds, 86_400);
        assert_eq!(config.timeout_ms, 10_000);
        assert_eq!(config.min_request_interval_ms, 250);
        assert!(config.rawg_api_key.is_none());
    }

    #[test]
    fn test_timeout_duration() {
        let config = AppConfig::default();
        assert_eq!(config.timeout(), Duration::from_millis(10_000));
        assert_eq!(config.min_request_interval(), Duration::from_millis(250));
    }

    #[test]
    fn test_require_rawg_api_key_missing() {
        let config = AppConfig::default();
        let result = config.require_rawg_api_key();
        assert!(matches!(result, Err(ConfigError::Missing { .. })));
    }

    #[test]
    fn test_require_rawg_api_key_present() {
        let config = AppConfig { rawg_api_key: Some("test-key".into()), ..Default::default() };
        let result = config.require_rawg_api_key();
        assert_eq!(result.unwrap(), "test-key");
    }
}
