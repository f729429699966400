// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! `/roles` route.

use crate::client::ApiClient;
use crate::error::ClientResult;
use crate::models::RolesResponse;

/// Role endpoints.
#[derive(Debug, Clone, Copy)]
pub struct RolesApi<'a> {
    client: &'a ApiClient,
}

impl<'a> RolesApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `GET /roles`.
    pub async fn list(&self) -> ClientResult<RolesResponse> {
        self.client.get("/roles", &[]).await
    }
}
