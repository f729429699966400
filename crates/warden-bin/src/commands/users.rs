// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the user management commands.

use serde_json::json;
use tracing::info;

use warden_client::console::{
    Registration, REGISTRATION_FAILED, RESET_PASSWORD_FAILED, UPDATE_FAILED,
};
use warden_client::models::UpdateProfileRequest;
use warden_core::{Action, Route, Subject, UserId, DASHBOARD_PATH};

use super::print_json;
use crate::cli::{
    AdminUpdateArgs, Cli, RegisterArgs, ResetPasswordArgs, RolesArgs, ScansArgs, UpdateProfileArgs,
};
use crate::context::{read_password, AppContext};
use crate::error::{BinError, BinResult};

/// Registers a new user.
pub async fn register(cli: &Cli, ctx: &AppContext, args: RegisterArgs) -> BinResult<()> {
    ctx.enter_with(Route::Register.path(), Action::Create, Subject::User)?;
    let password = read_password(&args.password)?;

    let form = Registration {
        first_name: args.first_name,
        last_name: args.last_name,
        email: args.email.clone(),
        password,
        role_id: args.role_id,
    };
    let response = ctx
        .console
        .register(form)
        .await
        .map_err(|e| BinError::request(e, REGISTRATION_FAILED))?;

    let message = response
        .message
        .unwrap_or_else(|| "User registered successfully".to_string());
    if cli.json_output() {
        print_json(&json!({ "email": args.email, "message": message }))
    } else {
        println!("{}", message);
        Ok(())
    }
}

/// Lists users with their scan totals.
pub async fn users(cli: &Cli, ctx: &AppContext) -> BinResult<()> {
    ctx.enter_with(Route::Users.path(), Action::Read, Subject::User)?;
    let response = ctx
        .console
        .client()
        .logs()
        .users_with_scans()
        .await
        .map_err(|e| BinError::request(e, "Failed to load users"))?;

    if cli.json_output() {
        return print_json(&response.users);
    }

    if response.users.is_empty() {
        println!("No users found");
        return Ok(());
    }
    println!(
        "{:>6}  {:<24} {:<32} {:>6} {:>8} {:>6}",
        "ID", "NAME", "EMAIL", "TOTAL", "SUCCESS", "FAILED"
    );
    for user in &response.users {
        println!(
            "{:>6}  {:<24} {:<32} {:>6} {:>8} {:>6}",
            user.id.get(),
            user.full_name(),
            user.email,
            user.total_documents,
            user.success_count,
            user.failed_count
        );
    }
    Ok(())
}

/// Shows one page of a user's scan logs.
pub async fn scans(cli: &Cli, ctx: &AppContext, args: ScansArgs) -> BinResult<()> {
    ctx.enter_with(Route::Users.path(), Action::Read, Subject::User)?;
    let offset = args
        .effective_offset()
        .ok_or_else(|| BinError::input(format!("Page {} is out of range", args.page.unwrap_or_default())))?;
    let page = ctx
        .console
        .scans_page(UserId::new(args.user_id), args.status, offset)
        .await
        .map_err(|e| BinError::request(e, "Failed to load scan logs"))?;

    if cli.json_output() {
        return print_json(&json!({
            "logs": page.logs,
            "total": page.total,
            "offset": page.offset,
            "page": page.current_page(),
            "total_pages": page.total_pages(),
            "next_offset": page.next_offset(),
            "prev_offset": page.prev_offset(),
        }));
    }

    if page.logs.is_empty() {
        println!("No scan logs found");
        return Ok(());
    }
    println!(
        "{:>8}  {:<16} {:<16} {:<8} {:<20} MESSAGE",
        "ID", "DELIVERY", "TYPE", "STATUS", "CREATED"
    );
    for log in &page.logs {
        let created = log
            .created_at
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:>8}  {:<16} {:<16} {:<8} {:<20} {}",
            log.id,
            log.delivery_no.as_deref().unwrap_or("-"),
            log.document_type.as_deref().unwrap_or("-"),
            log.status.as_str(),
            created,
            log.sap_message.as_deref().unwrap_or("")
        );
    }
    if page.is_paginated() {
        let (first, last) = page.showing();
        println!();
        println!(
            "Showing {}-{} of {} (page {} of {})",
            first,
            last,
            page.total,
            page.current_page(),
            page.total_pages()
        );
    }
    Ok(())
}

/// Lists roles; only assignable ones unless `--all`.
pub async fn roles(cli: &Cli, ctx: &AppContext, args: RolesArgs) -> BinResult<()> {
    ctx.enter_with(Route::Register.path(), Action::Create, Subject::User)?;
    let roles = if args.all {
        ctx.console.client().roles().list().await.map(|r| r.roles)
    } else {
        ctx.console.registrable_roles().await
    }
    .map_err(|e| BinError::request(e, "Failed to load roles"))?;

    if cli.json_output() {
        return print_json(&roles);
    }
    for role in &roles {
        match role.key {
            Some(ref key) => println!("{:>4}  {} ({})", role.id, role.name, key),
            None => println!("{:>4}  {}", role.id, role.name),
        }
    }
    Ok(())
}

/// Updates the signed-in operator's profile.
pub async fn update_profile(cli: &Cli, ctx: &AppContext, args: UpdateProfileArgs) -> BinResult<()> {
    ctx.enter(DASHBOARD_PATH)?;
    let request = UpdateProfileRequest {
        first_name: args.first_name,
        last_name: args.last_name,
        email: args.email,
    };
    if request.is_empty() {
        return Err(BinError::input(
            "Nothing to update: pass --first-name, --last-name or --email",
        ));
    }

    let response = ctx
        .console
        .update_profile(&request)
        .await
        .map_err(|e| BinError::request(e, UPDATE_FAILED))?;

    if cli.json_output() {
        print_json(&json!({ "message": response.message, "user": response.user }))
    } else {
        println!(
            "{}",
            response.message.as_deref().unwrap_or("Profile updated")
        );
        Ok(())
    }
}

/// Updates another user's name.
pub async fn admin_update(cli: &Cli, ctx: &AppContext, args: AdminUpdateArgs) -> BinResult<()> {
    ctx.enter_with(Route::Users.path(), Action::Read, Subject::User)?;
    let response = ctx
        .console
        .admin_update_profile(UserId::new(args.user_id), &args.first_name, &args.last_name)
        .await
        .map_err(|e| BinError::request(e, UPDATE_FAILED))?;
    info!(user_id = args.user_id, "Updated user profile");

    if cli.json_output() {
        print_json(&json!({ "message": response.message, "user": response.user }))
    } else {
        println!("{}", response.message.as_deref().unwrap_or("User updated"));
        Ok(())
    }
}

/// Resets another user's password.
pub async fn reset_password(cli: &Cli, ctx: &AppContext, args: ResetPasswordArgs) -> BinResult<()> {
    ctx.enter_with(Route::Users.path(), Action::Read, Subject::User)?;
    let password = read_password(&args.password)?;
    let response = ctx
        .console
        .admin_reset_password(UserId::new(args.user_id), &password)
        .await
        .map_err(|e| BinError::request(e, RESET_PASSWORD_FAILED))?;
    info!(user_id = args.user_id, "Reset user password");

    if cli.json_output() {
        print_json(&json!({ "message": response.message }))
    } else {
        println!("{}", response.message.as_deref().unwrap_or("Password reset"));
        Ok(())
    }
}
