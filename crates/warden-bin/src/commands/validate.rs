// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `validate` command.

use warden_config::ConfigLoader;

use super::print_json;
use crate::cli::{Cli, ValidateArgs};
use crate::error::{BinError, BinResult};

/// Executes the `validate` command to validate configuration.
pub fn validate(cli: &Cli, args: ValidateArgs) -> BinResult<()> {
    let config_path = &cli.config;

    if !config_path.exists() {
        return Err(BinError::Configuration(format!(
            "Configuration file not found: {}",
            config_path.display()
        )));
    }

    let config = ConfigLoader::new()
        .load(config_path)
        .map_err(|e| BinError::Configuration(format!("Configuration validation failed: {}", e)))?;

    let mut warnings: Vec<String> = Vec::new();
    if config.api.base_url.starts_with("http://") && !is_local(&config.api.base_url) {
        warnings.push(format!(
            "API base URL is not using TLS: {}",
            config.api.base_url
        ));
    }
    if config.api.read_retries == 0 {
        warnings.push("Read retries are disabled".to_string());
    }

    if cli.json_output() {
        let output = serde_json::json!({
            "valid": true,
            "config_path": config_path.display().to_string(),
            "summary": {
                "api_base_url": config.api.base_url,
                "api_timeout_secs": config.api.timeout_secs,
                "read_retries": config.api.read_retries,
                "storage_dir": config.storage.dir.display().to_string(),
                "log_level": config.logging.level.as_str(),
            },
            "warnings": warnings,
            "config": if args.show_config { Some(&config) } else { None },
        });
        return print_json(&output);
    }

    println!("✓ Configuration is valid: {}", config_path.display());
    println!();
    println!("Summary:");
    println!("  API:          {}", config.api.base_url);
    println!("  Timeout:      {}s", config.api.timeout_secs);
    println!("  Read retries: {}", config.api.read_retries);
    println!("  Storage:      {}", config.storage.dir.display());
    println!("  Log level:    {}", config.logging.level.as_str());

    if !warnings.is_empty() {
        println!();
        println!("Warnings:");
        for warning in &warnings {
            println!("  ⚠ {}", warning);
        }
    }

    if args.show_config {
        println!();
        println!("Parsed configuration:");
        println!("{}", serde_json::to_string_pretty(&config)?);
    }

    Ok(())
}

fn is_local(url: &str) -> bool {
    let host = url
        .trim_start_matches("http://")
        .split(['/', ':'])
        .next()
        .unwrap_or_default();
    matches!(host, "localhost" | "127.0.0.1" | "[::1]")
}
