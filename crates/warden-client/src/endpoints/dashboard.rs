// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Dashboard and KPI routes.

use crate::client::ApiClient;
use crate::error::ClientResult;
use crate::models::{DashboardStats, KpiResponse};

/// Dashboard endpoints.
#[derive(Debug, Clone, Copy)]
pub struct DashboardApi<'a> {
    client: &'a ApiClient,
}

impl<'a> DashboardApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `GET /dashboard/stats`.
    pub async fn stats(&self) -> ClientResult<DashboardStats> {
        self.client.get("/dashboard/stats", &[]).await
    }

    /// `GET /kpi/users`.
    pub async fn kpi_users(&self) -> ClientResult<KpiResponse> {
        self.client.get("/kpi/users", &[]).await
    }

    /// `GET /kpi/successful-documents`.
    pub async fn kpi_successful_documents(&self) -> ClientResult<KpiResponse> {
        self.client.get("/kpi/successful-documents", &[]).await
    }
}
