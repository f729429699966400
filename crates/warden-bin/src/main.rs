// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Warden - admin console front end.
//!
//! Main binary entry point.

use warden_bin::cli::Cli;
use warden_bin::error::report_error_and_exit;
use warden_bin::{commands, init_logging};
use warden_config::ConfigLoader;

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    let config = ConfigLoader::new().load_or_default(&cli.config);
    let logging = config.as_ref().ok().map(|c| &c.logging);
    init_logging(
        &cli.effective_log_level(logging.map(|l| l.level)),
        cli.effective_log_format(logging.map(|l| l.format)),
    );

    if let Err(e) = commands::execute(&cli, config).await {
        report_error_and_exit(e);
    }
}
