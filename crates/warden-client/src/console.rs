// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Console facade.
//!
//! [`Console`] owns the session, the API client and the navigator, and runs
//! the front end's control flow:
//!
//! ```text
//! login ──► POST /auth/login ──► set_auth ──► capabilities ──► guard ──► nav
//! ```

use std::sync::Arc;

use tracing::{debug, info};

use warden_core::guard::post_login_destination;
use warden_core::{
    visible_items, GuardDecision, NavItem, SessionStore, SharedStorage, UserId, LOGIN_PATH,
};

use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::models::{
    AdminResetPasswordRequest, AdminUpdateProfileRequest, LoginRequest, MessageResponse,
    RegisterRequest, Role, ScanPage, ScanStatus, ScansQuery, UpdateProfileRequest,
    UserProfileResponse,
};
use crate::navigator::Navigator;
use crate::transport::CredentialTransport;

/// Fallback when a login fails with a 401 and no server message.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
/// Fallback for any other login failure.
pub const LOGIN_FAILED: &str = "Login failed";
/// Fallback for registration failures.
pub const REGISTRATION_FAILED: &str = "Registration failed";
/// Fallback for profile update failures.
pub const UPDATE_FAILED: &str = "Failed to update user";
/// Fallback for password reset failures.
pub const RESET_PASSWORD_FAILED: &str = "Failed to reset password";
/// Local failure when no role can be assigned.
pub const NO_ROLE_AVAILABLE: &str = "No role available for registration";

/// Returns the message to show for a failed login.
pub fn login_error_message(err: &ClientError) -> String {
    let fallback = if err.is_unauthorized() {
        INVALID_CREDENTIALS
    } else {
        LOGIN_FAILED
    };
    err.display_message(fallback)
}

/// Registration form as the operator fills it in.
#[derive(Clone, Default)]
pub struct Registration {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email.
    pub email: String,
    /// Initial password.
    pub password: String,
    /// Role; the first assignable role when `None`.
    pub role_id: Option<i64>,
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"***")
            .field("role_id", &self.role_id)
            .finish()
    }
}

/// The console front end's core.
#[derive(Debug, Clone)]
pub struct Console {
    session: Arc<SessionStore>,
    client: ApiClient,
    navigator: Arc<dyn Navigator>,
}

impl Console {
    /// Rehydrates the session from `storage` and builds the client around it.
    pub fn new(
        config: ClientConfig,
        storage: SharedStorage,
        navigator: Arc<dyn Navigator>,
    ) -> ClientResult<Self> {
        let session = Arc::new(SessionStore::rehydrate(storage));
        Self::with_session(config, session, navigator)
    }

    /// Builds a console over an existing session.
    pub fn with_session(
        config: ClientConfig,
        session: Arc<SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> ClientResult<Self> {
        let transport = CredentialTransport::for_session(Arc::clone(&session), Arc::clone(&navigator));
        let client = ApiClient::new(config, transport)?;
        Ok(Self {
            session,
            client,
            navigator,
        })
    }

    /// Returns the session.
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Returns the API client.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Returns the navigator.
    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }

    // =========================================================================
    // Session lifecycle
    // =========================================================================

    /// Logs in and navigates to `from`, or the dashboard when absent.
    ///
    /// Returns the destination path. On failure the session is unchanged
    /// apart from the teardown a 401 already applied.
    pub async fn login(&self, email: &str, password: &str, from: Option<&str>) -> ClientResult<String> {
        let response = self
            .client
            .auth()
            .login(&LoginRequest::new(email, password))
            .await?;

        let permissions = response.permission_set();
        self.session.set_auth(response.user, response.token, permissions);

        let destination = post_login_destination(from);
        self.navigator.navigate(&destination);
        Ok(destination)
    }

    /// Logs out and navigates to the login page.
    pub fn logout(&self) {
        self.session.logout();
        self.navigator.navigate(LOGIN_PATH);
        info!("Logged out");
    }

    /// Requests navigation to `path` through the route guard.
    pub fn visit(&self, path: &str) -> GuardDecision {
        let decision = self.session.guard(path);
        match &decision {
            GuardDecision::Allow { route } => self.navigator.navigate(route.path()),
            GuardDecision::RedirectToLogin { from } => {
                debug!(from = %from, "Not authenticated, redirecting to login");
                self.navigator.navigate(LOGIN_PATH);
            }
        }
        decision
    }

    /// Returns the navigation entries the current capabilities admit.
    pub fn nav_items(&self) -> Vec<&'static NavItem> {
        visible_items(&self.session.capabilities())
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Returns the roles that may be assigned at registration.
    pub async fn registrable_roles(&self) -> ClientResult<Vec<Role>> {
        Ok(self.client.roles().list().await?.assignable())
    }

    /// Registers a user.
    ///
    /// Without an explicit role the first assignable role is used. Fails
    /// locally, without sending anything, when there is none.
    pub async fn register(&self, form: Registration) -> ClientResult<MessageResponse> {
        let role_id = match form.role_id {
            Some(id) => id,
            None => self
                .registrable_roles()
                .await?
                .first()
                .map(|role| role.id)
                .ok_or_else(|| ClientError::invalid_request(NO_ROLE_AVAILABLE))?,
        };

        let request = RegisterRequest {
            first_name: form.first_name,
            last_name: form.last_name,
            email: form.email,
            password: form.password,
            role_id,
        };
        self.client.auth().register(&request).await
    }

    // =========================================================================
    // Profiles
    // =========================================================================

    /// Updates the operator's own profile.
    ///
    /// A returned email replaces the identity's email in the session.
    pub async fn update_profile(&self, request: &UpdateProfileRequest) -> ClientResult<UserProfileResponse> {
        let response = self.client.auth().update_profile(request).await?;

        let updated_email = response.user.as_ref().and_then(|u| u.email.clone());
        if let (Some(email), Some(mut identity)) = (updated_email, self.session.identity()) {
            if identity.email != email {
                identity.email = email;
                self.session.set_user(Some(identity));
            }
        }
        Ok(response)
    }

    /// Updates another user's name.
    pub async fn admin_update_profile(
        &self,
        user_id: UserId,
        first_name: &str,
        last_name: &str,
    ) -> ClientResult<UserProfileResponse> {
        let request = AdminUpdateProfileRequest {
            user_id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        };
        self.client.auth().admin_update_profile(&request).await
    }

    /// Resets another user's password.
    pub async fn admin_reset_password(
        &self,
        user_id: UserId,
        new_password: &str,
    ) -> ClientResult<UserProfileResponse> {
        let request = AdminResetPasswordRequest {
            user_id,
            new_password: new_password.to_string(),
        };
        self.client.auth().admin_reset_password(&request).await
    }

    // =========================================================================
    // Scans
    // =========================================================================

    /// Fetches one page of a user's scans.
    pub async fn scans_page(
        &self,
        user_id: UserId,
        status: Option<ScanStatus>,
        offset: u32,
    ) -> ClientResult<ScanPage> {
        let query = ScansQuery::new(user_id).with_status(status).with_offset(offset);
        self.client.logs().scan_page(&query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorBody;
    use crate::navigator::HistoryNavigator;
    use reqwest::StatusCode;
    use warden_core::{Action, Credential, Identity, MemoryStorage, PermissionSet, Subject};

    fn console(initial: &str) -> (Console, Arc<HistoryNavigator>) {
        let nav = Arc::new(HistoryNavigator::new(initial));
        let console = Console::new(ClientConfig::default(), MemoryStorage::shared(), nav.clone()).unwrap();
        (console, nav)
    }

    #[test]
    fn test_login_error_messages() {
        let unauthorized = ClientError::from_status(StatusCode::UNAUTHORIZED, None);
        assert_eq!(login_error_message(&unauthorized), INVALID_CREDENTIALS);

        let server = ClientError::from_status(StatusCode::INTERNAL_SERVER_ERROR, None);
        assert_eq!(login_error_message(&server), LOGIN_FAILED);

        let with_message = ClientError::from_status(
            StatusCode::UNAUTHORIZED,
            Some(ErrorBody {
                message: Some("Account locked".to_string()),
                error_code: None,
            }),
        );
        assert_eq!(login_error_message(&with_message), "Account locked");
    }

    #[test]
    fn test_visit_unauthenticated() {
        let (console, nav) = console("/");
        let decision = console.visit("/dashboard/logs");
        assert_eq!(
            decision,
            GuardDecision::RedirectToLogin {
                from: "/dashboard/logs".to_string()
            }
        );
        assert_eq!(nav.navigations(), vec![LOGIN_PATH.to_string()]);
        assert!(console.nav_items().is_empty());
    }

    #[test]
    fn test_visit_authenticated_and_logout() {
        let (console, nav) = console("/login");
        console.session().set_auth(
            Identity::new(2, "ops@example.com", "admin"),
            Credential::new("tok").unwrap(),
            PermissionSet::from_keys(["log.user_log"]),
        );

        assert!(console.visit("/dashboard/users").is_allowed());
        let labels: Vec<_> = console.nav_items().iter().map(|item| item.label).collect();
        assert_eq!(labels, vec!["Home", "Users", "Logs"]);

        console.logout();
        assert!(!console.session().can(Action::Read, Subject::Dashboard));
        assert_eq!(nav.current_path(), LOGIN_PATH);
    }

    #[test]
    fn test_registration_debug_redacts_password() {
        let form = Registration {
            password: "hunter2".to_string(),
            ..Default::default()
        };
        assert!(!format!("{form:?}").contains("hunter2"));
    }
}
