// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `version` command.

use super::print_json;
use crate::cli::Cli;
use crate::error::BinResult;

/// Executes the `version` command to display version information.
pub fn version(cli: &Cli) -> BinResult<()> {
    if cli.json_output() {
        return print_json(&serde_json::json!({
            "warden-bin": crate::VERSION,
            "warden-core": warden_core::VERSION,
            "warden-client": warden_client::VERSION,
            "warden-config": warden_config::VERSION,
            "target": std::env::consts::ARCH,
            "os": std::env::consts::OS,
        }));
    }

    println!("Warden - admin console for document scanning operations");
    println!();
    println!("Version Information:");
    println!("  warden-bin:    {}", crate::VERSION);
    println!("  warden-core:   {}", warden_core::VERSION);
    println!("  warden-client: {}", warden_client::VERSION);
    println!("  warden-config: {}", warden_config::VERSION);
    println!();
    println!("Build Information:");
    println!("  Target:        {}", std::env::consts::ARCH);
    println!("  OS:            {}", std::env::consts::OS);
    println!();
    println!("License: PolyForm Noncommercial License 1.0.0");
    println!("Copyright (c) 2025 Sylvex. All rights reserved.");
    println!();
    println!("For commercial licensing, contact: contact@sylvex.io");

    Ok(())
}
