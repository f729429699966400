// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `login`, `logout` and `whoami` commands.

use serde_json::json;
use tracing::info;

use warden_client::login_error_message;
use warden_core::LOGIN_PATH;

use super::print_json;
use crate::cli::{Cli, LoginArgs};
use crate::context::{read_password, AppContext};
use crate::error::{BinError, BinResult};

/// Signs in and persists the session.
pub async fn login(cli: &Cli, ctx: &AppContext, args: LoginArgs) -> BinResult<()> {
    let password = read_password(&args.password)?;
    ctx.console.visit(LOGIN_PATH);

    let destination = ctx
        .console
        .login(&args.email, &password, args.from.as_deref())
        .await
        .map_err(|e| BinError::Request {
            message: login_error_message(&e),
            source: e,
        })?;

    let session = ctx.session();
    let Some(identity) = session.identity() else {
        return Err(BinError::io("Session was not stored after login"));
    };
    info!(user = %identity.email, destination = %destination, "Signed in");

    if cli.json_output() {
        let permissions: Vec<String> = session.permissions().keys().map(str::to_string).collect();
        print_json(&json!({
            "user": identity,
            "permissions": permissions,
            "destination": destination,
        }))
    } else {
        if !cli.quiet {
            println!("Signed in as {}", identity);
            println!("Continue at {}", destination);
        }
        Ok(())
    }
}

/// Signs out.
pub fn logout(cli: &Cli, ctx: &AppContext) -> BinResult<()> {
    let was_authenticated = ctx.session().is_authenticated();
    ctx.console.logout();

    if cli.json_output() {
        print_json(&json!({ "signed_out": was_authenticated }))
    } else {
        if !cli.quiet {
            if was_authenticated {
                println!("Signed out");
            } else {
                println!("Not signed in");
            }
        }
        Ok(())
    }
}

/// Shows the signed-in operator and what the session permits.
pub fn whoami(cli: &Cli, ctx: &AppContext) -> BinResult<()> {
    let session = ctx.session();
    let identity = session.identity();
    let permissions: Vec<String> = session.permissions().keys().map(str::to_string).collect();
    let capabilities = session.capabilities();

    if cli.json_output() {
        return print_json(&json!({
            "authenticated": session.is_authenticated(),
            "user": identity,
            "permissions": permissions,
            "capabilities": capabilities.rules(),
        }));
    }

    let Some(identity) = identity else {
        println!("Not signed in");
        return Ok(());
    };

    println!("{}", identity);
    println!();
    println!("Permissions:");
    if permissions.is_empty() {
        println!("  (none)");
    }
    for key in &permissions {
        println!("  {}", key);
    }
    println!();
    println!("Capabilities:");
    for rule in capabilities.rules() {
        println!("  {}", rule);
    }
    Ok(())
}
