// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Configuration Integration Tests
//!
//! Integration tests for warden-config functionality including:
//!
//! - Loading from files in every supported format
//! - Environment placeholders and overrides
//! - Validation errors
//!
//! ## Test Categories
//!
//! - `test_load_*`: File loading
//! - `test_env_*`: Environment handling
//! - `test_validate_*`: Validation

use std::fs;
use std::path::{Path, PathBuf};

use warden_config::schema::{DEFAULT_BASE_URL, DEFAULT_READ_RETRIES, DEFAULT_TIMEOUT_SECS};
use warden_config::{ConfigError, ConfigFormat, ConfigLoader, LogFormat, LogLevel, WardenConfig};
use warden_tests::common::{temp_test_dir, unique_test_id};

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write config file");
    path
}

/// A loader whose environment overrides cannot collide with other tests.
fn isolated() -> (ConfigLoader, String) {
    let prefix = format!("WARDEN_IT_{}", unique_test_id().to_uppercase());
    (ConfigLoader::new().with_env_prefix(prefix.clone()), prefix)
}

// =============================================================================
// Loading
// =============================================================================

#[test]
fn test_load_yaml_file() {
    let dir = temp_test_dir("warden-config");
    let path = write(
        dir.path(),
        "warden.yaml",
        r#"
api:
  base_url: https://console.example.com/api
  timeout_secs: 10
  read_retries: 3
  retry_delay_ms: 100

storage:
  dir: sessions

logging:
  level: debug
  format: compact
"#,
    );

    let config = isolated().0.load(&path).unwrap();

    assert_eq!(config.api.base_url, "https://console.example.com/api");
    assert_eq!(config.api.timeout_secs, 10);
    assert_eq!(config.api.read_retries, 3);
    assert_eq!(config.api.retry_delay_ms, 100);
    assert_eq!(config.storage.dir, dir.path().join("sessions"));
    assert_eq!(config.logging.level, LogLevel::Debug);
    assert_eq!(config.logging.format, LogFormat::Compact);
}

#[test]
fn test_load_toml_file() {
    let dir = temp_test_dir("warden-config");
    let path = write(
        dir.path(),
        "warden.toml",
        "[api]\nbase_url = \"http://10.0.0.5:3000/api\"\n\n[logging]\nformat = \"json\"\n",
    );

    let config = isolated().0.load(&path).unwrap();

    assert_eq!(config.api.base_url, "http://10.0.0.5:3000/api");
    assert_eq!(config.api.timeout_secs, DEFAULT_TIMEOUT_SECS);
    assert_eq!(config.logging.format, LogFormat::Json);
}

#[test]
fn test_load_json_file() {
    let dir = temp_test_dir("warden-config");
    let path = write(
        dir.path(),
        "warden.json",
        r#"{"storage": {"dir": "/var/lib/warden"}, "logging": {"level": "error"}}"#,
    );

    let config = isolated().0.load(&path).unwrap();

    assert_eq!(config.storage.dir, PathBuf::from("/var/lib/warden"));
    assert_eq!(config.logging.level, LogLevel::Error);
    assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
}

#[test]
fn test_load_empty_sections_use_defaults() {
    let config = isolated()
        .0
        .load_from_str(r#"{"api": {}, "storage": {}}"#, ConfigFormat::Json)
        .unwrap();

    let defaults = WardenConfig::default();
    assert_eq!(config.api, defaults.api);
    assert_eq!(config.api.read_retries, DEFAULT_READ_RETRIES);
    assert_eq!(config.storage, defaults.storage);
}

#[test]
fn test_load_missing_file() {
    let dir = temp_test_dir("warden-config");
    let missing = dir.path().join("absent.yaml");
    let (loader, _) = isolated();

    let err = loader.load(&missing).unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound { .. }));
    assert!(err.is_io_error());

    let config = loader.load_or_default(&missing).unwrap();
    assert_eq!(config, WardenConfig::default());
}

#[test]
fn test_load_unsupported_extension() {
    let dir = temp_test_dir("warden-config");
    let path = write(dir.path(), "warden.ini", "[api]\n");

    let err = isolated().0.load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::UnsupportedFormat { .. }));
}

#[test]
fn test_load_rejects_unknown_fields() {
    let dir = temp_test_dir("warden-config");
    let path = write(dir.path(), "warden.yaml", "api:\n  base_uri: http://x\n");

    let err = isolated().0.load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { ref path, .. } if path.ends_with("warden.yaml")));
}

// =============================================================================
// Environment
// =============================================================================

#[test]
fn test_env_placeholders() {
    let (loader, prefix) = isolated();
    let var = format!("{prefix}_HOST");
    std::env::set_var(&var, "api.internal");

    let yaml = format!(
        "api:\n  base_url: https://${{{var}}}/api\n  timeout_secs: ${{{prefix}_UNSET:7}}\n"
    );
    let config = loader.load_from_str(&yaml, ConfigFormat::Yaml).unwrap();

    assert_eq!(config.api.base_url, "https://api.internal/api");
    assert_eq!(config.api.timeout_secs, 7);
    std::env::remove_var(&var);
}

#[test]
fn test_env_overrides_win_over_file() {
    let (loader, prefix) = isolated();
    std::env::set_var(format!("{prefix}_API_BASE_URL"), "https://override.example/api");
    std::env::set_var(format!("{prefix}_API_TIMEOUT_SECS"), "45");
    std::env::set_var(format!("{prefix}_LOG_LEVEL"), "WARNING");

    let config = loader
        .load_from_str("api:\n  base_url: http://file.example/api\n", ConfigFormat::Yaml)
        .unwrap();

    assert_eq!(config.api.base_url, "https://override.example/api");
    assert_eq!(config.api.timeout_secs, 45);
    assert_eq!(config.logging.level, LogLevel::Warn);
}

#[test]
fn test_env_overrides_apply_to_defaults() {
    let dir = temp_test_dir("warden-config");
    let (loader, prefix) = isolated();
    std::env::set_var(format!("{prefix}_STORAGE_DIR"), dir.path());

    let config = loader.load_or_default(dir.path().join("absent.toml")).unwrap();

    assert_eq!(config.storage.dir, dir.path());
}

#[test]
fn test_env_invalid_timeout() {
    let (loader, prefix) = isolated();
    std::env::set_var(format!("{prefix}_API_TIMEOUT_SECS"), "soon");

    let err = loader.load_from_str("{}", ConfigFormat::Json).unwrap_err();

    assert!(matches!(err, ConfigError::InvalidEnvVar { ref name, .. } if name.ends_with("_API_TIMEOUT_SECS")));
}

#[test]
fn test_env_disabled_ignores_overrides() {
    let (loader, prefix) = isolated();
    std::env::set_var(format!("{prefix}_API_BASE_URL"), "https://ignored.example/api");

    let config = loader
        .with_env_vars(false)
        .load_from_str("{}", ConfigFormat::Json)
        .unwrap();

    assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn test_validate_base_url_scheme() {
    let err = isolated()
        .0
        .load_from_str("api:\n  base_url: ftp://example.com\n", ConfigFormat::Yaml)
        .unwrap_err();

    assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "api.base_url"));
    assert_eq!(err.error_type(), "validation");
}

#[test]
fn test_validate_zero_timeout() {
    let err = isolated()
        .0
        .load_from_str(r#"{"api": {"timeout_secs": 0}}"#, ConfigFormat::Json)
        .unwrap_err();

    assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "api.timeout_secs"));
}

#[test]
fn test_validate_retry_bound() {
    let err = isolated()
        .0
        .load_from_str("[api]\nread_retries = 9\n", ConfigFormat::Toml)
        .unwrap_err();

    assert!(matches!(
        err,
        ConfigError::OutOfRange { ref field, ref value, .. } if field == "api.read_retries" && value == "9"
    ));
    assert!(err.user_message().contains("api.read_retries"));
}

#[test]
fn test_validate_empty_storage_dir() {
    let err = isolated()
        .0
        .load_from_str("storage:\n  dir: \"\"\n", ConfigFormat::Yaml)
        .unwrap_err();

    assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "storage.dir"));
}
