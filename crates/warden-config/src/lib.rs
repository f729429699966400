// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # warden-config
//!
//! Configuration management for the Warden admin console client.
//!
//! ## Features
//!
//! - **Schema Definition**: API, storage and logging sections with validation
//! - **Multi-Format Support**: YAML, TOML, and JSON configuration files
//! - **Environment Overrides**: `WARDEN_*` variables and `${VAR:default}` placeholders
//!
//! ## Quick Start
//!
//! ```no_run
//! use warden_config::loader::load_config;
//!
//! let config = load_config("warden.yaml").unwrap();
//! println!("API: {}", config.api.base_url);
//! ```
//!
//! ## Example file
//!
//! ```yaml
//! api:
//!   base_url: "${WARDEN_API:https://console.example.com/api}"
//!   timeout_secs: 30
//!   read_retries: 2
//! storage:
//!   dir: ./data/session
//! logging:
//!   level: info
//!   format: text
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

// =============================================================================
// Modules
// =============================================================================

pub mod error;
pub mod loader;
pub mod schema;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{ConfigError, ConfigResult};
pub use loader::{load_config, load_config_str, ConfigFormat, ConfigLoader};
pub use schema::{ApiConfig, LogFormat, LogLevel, LoggingConfig, StorageConfig, WardenConfig};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// =============================================================================
// Prelude
// =============================================================================

/// Convenience re-exports for common use cases.
pub mod prelude {
    pub use crate::error::{ConfigError, ConfigResult};
    pub use crate::loader::{load_config, ConfigLoader};
    pub use crate::schema::WardenConfig;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name() {
        assert_eq!(NAME, "warden-config");
    }

    #[test]
    fn test_prelude_imports() {
        use prelude::*;
        let config = WardenConfig::default();
        assert!(config.validate().is_ok());
    }
}
