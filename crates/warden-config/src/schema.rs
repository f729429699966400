// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Configuration schema definitions for Warden.
//!
//! # Schema Structure
//!
//! ```text
//! WardenConfig
//! ├── api: ApiConfig
//! ├── storage: StorageConfig
//! └── logging: LoggingConfig
//! ```

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

// =============================================================================
// Constants
// =============================================================================

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of retries for idempotent reads.
pub const DEFAULT_READ_RETRIES: u32 = 2;

/// Maximum number of retries for idempotent reads.
pub const MAX_READ_RETRIES: u32 = 5;

/// Default delay between read retries in milliseconds.
pub const DEFAULT_RETRY_DELAY_MS: u64 = 250;

// =============================================================================
// Top-Level Configuration
// =============================================================================

/// The root configuration structure for Warden.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WardenConfig {
    /// Remote API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Session storage settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl WardenConfig {
    /// Validates the entire configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        self.api.validate()?;
        self.storage.validate()?;
        Ok(())
    }
}

// =============================================================================
// API Configuration
// =============================================================================

/// Remote REST API settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retries for idempotent GET requests on transport failures.
    #[serde(default = "default_read_retries")]
    pub read_retries: u32,

    /// Delay before the first retry; doubled for each further attempt.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_read_retries() -> u32 {
    DEFAULT_READ_RETRIES
}

fn default_retry_delay_ms() -> u64 {
    DEFAULT_RETRY_DELAY_MS
}

impl ApiConfig {
    /// Validates the API configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::validation(
                "api.base_url",
                format!("'{}' must start with http:// or https://", self.base_url),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::validation("api.timeout_secs", "cannot be zero"));
        }
        if self.read_retries > MAX_READ_RETRIES {
            return Err(ConfigError::out_of_range(
                "api.read_retries",
                self.read_retries,
                0,
                MAX_READ_RETRIES,
            ));
        }
        Ok(())
    }

    /// Returns the request timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns the base retry delay as a Duration.
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            read_retries: DEFAULT_READ_RETRIES,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
        }
    }
}

// =============================================================================
// Storage Configuration
// =============================================================================

/// Session storage settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Directory holding the persisted session.
    #[serde(default = "default_storage_dir")]
    pub dir: PathBuf,
}

/// Default storage directory.
pub fn default_storage_dir() -> PathBuf {
    PathBuf::from("./data/session")
}

impl StorageConfig {
    /// Validates the storage configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.dir.as_os_str().is_empty() {
            return Err(ConfigError::validation("storage.dir", "cannot be empty"));
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
        }
    }
}

// =============================================================================
// Logging Configuration
// =============================================================================

/// Logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level.
    #[serde(default)]
    pub level: LogLevel,

    /// Log format.
    #[serde(default)]
    pub format: LogFormat,
}

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl LogLevel {
    /// Returns the filter directive for this level.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    /// Parses a log level, accepting `warning` as an alias.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

/// Log format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Compact single-line text.
    Compact,
    /// JSON for log aggregation.
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warden_config_default() {
        let config = WardenConfig::default();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.timeout(), Duration::from_secs(30));
        assert_eq!(config.storage.dir, default_storage_dir());
        assert_eq!(config.logging.level, LogLevel::Info);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_api_rejects_bad_scheme() {
        let api = ApiConfig {
            base_url: "ftp://example.com".to_string(),
            ..Default::default()
        };
        assert!(matches!(api.validate(), Err(ConfigError::Validation { .. })));
    }

    #[test]
    fn test_api_rejects_zero_timeout() {
        let api = ApiConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(api.validate().is_err());
    }

    #[test]
    fn test_api_retry_bound() {
        let api = ApiConfig {
            read_retries: MAX_READ_RETRIES,
            ..Default::default()
        };
        assert!(api.validate().is_ok());

        let api = ApiConfig {
            read_retries: MAX_READ_RETRIES + 1,
            ..Default::default()
        };
        assert!(matches!(api.validate(), Err(ConfigError::OutOfRange { .. })));
    }

    #[test]
    fn test_log_level_parse() {
        assert_eq!(LogLevel::parse("DEBUG"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("warning"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("loud"), None);
        assert_eq!(LogLevel::Error.as_str(), "error");
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let result: Result<WardenConfig, _> =
            serde_json::from_str(r#"{"api":{"base_url":"http://x","port":1}}"#);
        assert!(result.is_err());
    }
}
