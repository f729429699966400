// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `can`, `nav` and `guard` commands.
//!
//! These answer from the stored session alone; nothing is sent to the API.

use serde_json::json;

use warden_core::GuardDecision;

use super::print_json;
use crate::cli::{CanArgs, Cli, GuardArgs};
use crate::context::AppContext;
use crate::error::BinResult;

/// Reports whether the session permits an action on a subject.
pub fn can(cli: &Cli, ctx: &AppContext, args: CanArgs) -> BinResult<()> {
    let allowed = ctx.session().can(args.action, args.subject);

    if cli.json_output() {
        print_json(&json!({
            "action": args.action,
            "subject": args.subject,
            "allowed": allowed,
        }))
    } else {
        println!("{}", if allowed { "yes" } else { "no" });
        Ok(())
    }
}

/// Lists the navigation entries visible to the session.
pub fn nav(cli: &Cli, ctx: &AppContext) -> BinResult<()> {
    let items = ctx.console.nav_items();

    if cli.json_output() {
        return print_json(&items);
    }

    if items.is_empty() {
        println!("No navigation entries. Sign in first.");
    }
    for item in items {
        println!("{:<10} {}", item.label, item.route.path());
    }
    Ok(())
}

/// Runs the route guard for a path without navigating.
pub fn guard(cli: &Cli, ctx: &AppContext, args: GuardArgs) -> BinResult<()> {
    let decision = ctx.session().guard(&args.path);

    if cli.json_output() {
        return print_json(&decision);
    }

    match decision {
        GuardDecision::Allow { route } => println!("allow {}", route.path()),
        GuardDecision::RedirectToLogin { from } => println!("redirect /login (from {})", from),
    }
    Ok(())
}
