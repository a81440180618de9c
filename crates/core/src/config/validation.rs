//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },

    #[error("missing required configuration: {field} ({hint})")]
    Missing { field: String, hint: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `cache_ttl_seconds` is not positive
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `min_request_interval_ms` exceeds 10 seconds
    /// - `base_url` or `user_agent` is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_ttl_seconds <= 0 {
            return Err(ConfigError::Invalid {
                field: "cache_ttl_seconds".into(),
                reason: "must be positive".into(),
            });
        }

        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.min_request_interval_ms > 10_000 {
            return Err(ConfigError::Invalid {
                field: "min_request_interval_ms".into(),
                reason: "must not exceed 10 seconds".into(),
            });
        }

        if self.base_url.is_empty() {
            return Err(ConfigError::Invalid { field: "base_url".into(), reason: "must not be empty".into() });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        Ok(())
    }
}
