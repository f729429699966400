// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `logs` and `kpi` commands.

use serde_json::json;
use tracing::warn;

use warden_client::models::LogsQuery;
use warden_core::{Action, Route, Subject, DASHBOARD_PATH};

use super::print_json;
use crate::cli::{Cli, LogsArgs};
use crate::context::AppContext;
use crate::error::{BinError, BinResult};

/// Lists activity logs.
pub async fn logs(cli: &Cli, ctx: &AppContext, args: LogsArgs) -> BinResult<()> {
    ctx.enter_with(Route::Logs.path(), Action::Read, Subject::Logs)?;
    let query = LogsQuery {
        page: args.page,
        limit: args.limit,
        search: args.search,
    };
    let response = ctx
        .console
        .client()
        .logs()
        .list(&query)
        .await
        .map_err(|e| BinError::request(e, "Failed to load logs"))?;

    if cli.json_output() {
        return print_json(&json!({ "logs": response.logs, "total": response.total }));
    }

    if response.logs.is_empty() {
        println!("No logs found");
        return Ok(());
    }
    for entry in &response.logs {
        println!(
            "{:<25} {:<6} {}",
            entry.timestamp,
            entry.level.as_deref().unwrap_or("-"),
            entry.message
        );
    }
    println!();
    println!("{} of {} entries", response.logs.len(), response.total);
    Ok(())
}

/// Shows the dashboard counters.
pub async fn kpi(cli: &Cli, ctx: &AppContext) -> BinResult<()> {
    ctx.enter_with(DASHBOARD_PATH, Action::Read, Subject::Dashboard)?;
    let dashboard = ctx.console.client().dashboard();

    let (users, documents, stats) = tokio::join!(
        dashboard.kpi_users(),
        dashboard.kpi_successful_documents(),
        dashboard.stats()
    );
    let users = users.map_err(|e| BinError::request(e, "Failed to load KPI data"))?;
    let documents = documents.map_err(|e| BinError::request(e, "Failed to load KPI data"))?;
    let stats = match stats {
        Ok(stats) => Some(stats),
        Err(e) => {
            warn!(error = %e, "Dashboard stats unavailable");
            None
        }
    };

    if cli.json_output() {
        return print_json(&json!({
            "users": users.count,
            "successful_documents": documents.count,
            "stats": stats,
        }));
    }

    println!("Users:                {}", users.count);
    println!("Successful documents: {}", documents.count);
    if let Some(stats) = stats {
        if let Some(total) = stats.total_logs {
            println!("Log entries:          {}", total);
        }
        if !stats.recent_activity.is_empty() {
            println!();
            println!("Recent activity:");
            for activity in &stats.recent_activity {
                println!("  {:<25} {}", activity.timestamp, activity.message);
            }
        }
    }
    Ok(())
}
