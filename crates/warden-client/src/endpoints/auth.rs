// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! `/auth` routes.

use tracing::info;

use crate::client::ApiClient;
use crate::error::ClientResult;
use crate::models::{
    AdminResetPasswordRequest, AdminUpdateProfileRequest, AuthResponse, LoginRequest,
    MessageResponse, RegisterRequest, UpdateProfileRequest, UserProfileResponse,
};

/// Auth endpoints.
#[derive(Debug, Clone, Copy)]
pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `POST /auth/login`.
    ///
    /// The caller is responsible for installing the returned session.
    pub async fn login(&self, request: &LoginRequest) -> ClientResult<AuthResponse> {
        let response: AuthResponse = self.client.post("/auth/login", request).await?;
        info!(user_id = %response.user.id, role = %response.user.role, "Login accepted");
        Ok(response)
    }

    /// `POST /auth/register`.
    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<MessageResponse> {
        let response: Option<MessageResponse> = self.client.post("/auth/register", request).await?;
        info!(email = %request.email, role_id = request.role_id, "User registered");
        Ok(response.unwrap_or_default())
    }

    /// `PUT /auth/update-profile`.
    pub async fn update_profile(&self, request: &UpdateProfileRequest) -> ClientResult<UserProfileResponse> {
        let response: Option<UserProfileResponse> =
            self.client.put("/auth/update-profile", request).await?;
        Ok(response.unwrap_or_default())
    }

    /// `PUT /auth/admin/update-profile`.
    pub async fn admin_update_profile(
        &self,
        request: &AdminUpdateProfileRequest,
    ) -> ClientResult<UserProfileResponse> {
        let response: Option<UserProfileResponse> =
            self.client.put("/auth/admin/update-profile", request).await?;
        info!(user_id = %request.user_id, "Profile updated by administrator");
        Ok(response.unwrap_or_default())
    }

    /// `POST /auth/admin/reset-password`.
    pub async fn admin_reset_password(
        &self,
        request: &AdminResetPasswordRequest,
    ) -> ClientResult<UserProfileResponse> {
        let response: Option<UserProfileResponse> =
            self.client.post("/auth/admin/reset-password", request).await?;
        info!(user_id = %request.user_id, "Password reset by administrator");
        Ok(response.unwrap_or_default())
    }
}
