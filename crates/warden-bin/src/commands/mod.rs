// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! CLI command implementations.
//!
//! - `session`: login, logout, whoami
//! - `access`: can, nav, guard
//! - `users`: register, users, scans, roles and profile changes
//! - `dashboard`: logs, kpi
//! - `validate`, `version`

mod access;
mod dashboard;
mod session;
mod users;
mod validate;
mod version;

pub use access::{can, guard, nav};
pub use dashboard::{kpi, logs};
pub use session::{login, logout, whoami};
pub use users::{admin_update, register, reset_password, roles, scans, update_profile, users};
pub use validate::validate;
pub use version::version;

use serde::Serialize;

use warden_config::{ConfigResult, WardenConfig};

use crate::cli::{Cli, Commands};
use crate::context::AppContext;
use crate::error::BinResult;

/// Executes the appropriate command based on CLI arguments.
///
/// `config` is the result of loading the configuration file; commands that
/// talk to the API fail with its error, `validate` and `version` do not need
/// it.
pub async fn execute(cli: &Cli, config: ConfigResult<WardenConfig>) -> BinResult<()> {
    let command = cli.effective_command();
    match command {
        Commands::Validate(args) => return validate::validate(cli, args),
        Commands::Version => return version::version(cli),
        _ => {}
    }

    let ctx = AppContext::open(config?)?;
    match command {
        Commands::Login(args) => session::login(cli, &ctx, args).await,
        Commands::Logout => session::logout(cli, &ctx),
        Commands::Whoami => session::whoami(cli, &ctx),
        Commands::Can(args) => access::can(cli, &ctx, args),
        Commands::Nav => access::nav(cli, &ctx),
        Commands::Guard(args) => access::guard(cli, &ctx, args),
        Commands::Register(args) => users::register(cli, &ctx, args).await,
        Commands::Users => users::users(cli, &ctx).await,
        Commands::Scans(args) => users::scans(cli, &ctx, args).await,
        Commands::Roles(args) => users::roles(cli, &ctx, args).await,
        Commands::Logs(args) => dashboard::logs(cli, &ctx, args).await,
        Commands::Kpi => dashboard::kpi(cli, &ctx).await,
        Commands::UpdateProfile(args) => users::update_profile(cli, &ctx, args).await,
        Commands::AdminUpdate(args) => users::admin_update(cli, &ctx, args).await,
        Commands::ResetPassword(args) => users::reset_password(cli, &ctx, args).await,
        Commands::Validate(_) | Commands::Version => Ok(()),
    }
}

/// Prints `value` as pretty JSON.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> BinResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
