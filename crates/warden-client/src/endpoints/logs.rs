// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! `/logs` routes.

use crate::client::ApiClient;
use crate::error::ClientResult;
use crate::models::{LogsQuery, LogsResponse, ScanLogsResponse, ScanPage, ScansQuery, UsersWithScansResponse};

/// Log endpoints.
#[derive(Debug, Clone, Copy)]
pub struct LogsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> LogsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `GET /logs`.
    pub async fn list(&self, query: &LogsQuery) -> ClientResult<LogsResponse> {
        self.client.get("/logs", &query.to_params()).await
    }

    /// `GET /logs/users-with-scans`.
    pub async fn users_with_scans(&self) -> ClientResult<UsersWithScansResponse> {
        self.client.get("/logs/users-with-scans", &[]).await
    }

    /// `GET /logs/scans`.
    pub async fn scans(&self, query: &ScansQuery) -> ClientResult<ScanLogsResponse> {
        self.client.get("/logs/scans", &query.to_params()).await
    }

    /// Fetches one page of scans with pagination arithmetic applied.
    pub async fn scan_page(&self, query: &ScansQuery) -> ClientResult<ScanPage> {
        let response = self.scans(query).await?;
        Ok(ScanPage::from_response(response, query.offset))
    }
}
