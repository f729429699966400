// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Credential transport.
//!
//! Every outgoing request is decorated with the stored bearer credential, and
//! every response status is inspected. A 401 tears the session down and
//! sends the front end to the login surface.
//!
//! ```text
//! request ──► decorate ──► server ──► on_response ──► caller
//!               │                        │ 401
//!         auth_token key           clear credential
//!                                  demote session
//!                                  navigate("/login")
//! ```

use std::sync::Arc;

use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{RequestBuilder, StatusCode};
use tracing::{debug, warn};

use warden_core::guard::{is_login_path, LOGIN_PATH};
use warden_core::{CredentialStore, SessionStore};

use crate::navigator::Navigator;

/// What the transport did with a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseDisposition {
    /// The response is handed to the caller unchanged.
    Pass,
    /// The credential was rejected and the session torn down.
    SessionRevoked {
        /// `true` if the front end was sent to the login surface.
        redirected: bool,
    },
}

/// Decorates requests with the bearer credential and reacts to 401s.
#[derive(Debug, Clone)]
pub struct CredentialTransport {
    credentials: CredentialStore,
    session: Option<Arc<SessionStore>>,
    navigator: Arc<dyn Navigator>,
}

impl CredentialTransport {
    /// Creates a transport over a bare credential store.
    pub fn new(credentials: CredentialStore, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            credentials,
            session: None,
            navigator,
        }
    }

    /// Creates a transport sharing storage with `session`, which is demoted
    /// whenever the server rejects the credential.
    pub fn for_session(session: Arc<SessionStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            credentials: session.credentials().clone(),
            session: Some(session),
            navigator,
        }
    }

    /// Returns the `Authorization` header value for the stored credential.
    pub fn authorization(&self) -> Option<HeaderValue> {
        let credential = self.credentials.get()?;
        match HeaderValue::from_str(&credential.bearer()) {
            Ok(mut value) => {
                value.set_sensitive(true);
                Some(value)
            }
            Err(_) => {
                warn!("Stored credential is not a valid header value, sending request without it");
                None
            }
        }
    }

    /// Adds `Authorization: Bearer <token>` when a credential is stored.
    pub fn decorate(&self, request: RequestBuilder) -> RequestBuilder {
        match self.authorization() {
            Some(value) => {
                debug!("Attaching bearer credential");
                request.header(AUTHORIZATION, value)
            }
            None => request,
        }
    }

    /// Inspects a response status.
    ///
    /// A 401 clears the credential, demotes the session and navigates to the
    /// login surface unless the front end is already there. The caller still
    /// receives the error.
    pub fn on_response(&self, status: StatusCode) -> ResponseDisposition {
        if status != StatusCode::UNAUTHORIZED {
            return ResponseDisposition::Pass;
        }

        warn!("Server rejected the credential");
        if let Err(e) = self.credentials.clear() {
            warn!(error = %e, "Failed to clear stored credential");
        }
        if let Some(ref session) = self.session {
            session.demote();
        }

        let redirected = !is_login_path(&self.navigator.current_path());
        if redirected {
            self.navigator.navigate(LOGIN_PATH);
        }
        ResponseDisposition::SessionRevoked { redirected }
    }

    /// Returns the credential store.
    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// Returns the navigator.
    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }

    /// Returns the session demoted on 401, if any.
    pub fn session(&self) -> Option<&Arc<SessionStore>> {
        self.session.as_ref()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigator::HistoryNavigator;
    use warden_core::{Credential, Identity, MemoryStorage, PermissionSet, SessionSnapshot};

    fn logged_in_session() -> Arc<SessionStore> {
        let session = Arc::new(SessionStore::rehydrate(MemoryStorage::shared()));
        session.set_auth(
            Identity::new(7, "ops@example.com", "admin"),
            Credential::new("tok-7").unwrap(),
            PermissionSet::from_keys(["log.user_log"]),
        );
        session
    }

    #[test]
    fn test_decorate_without_credential() {
        let nav = Arc::new(HistoryNavigator::new("/login"));
        let transport = CredentialTransport::new(CredentialStore::new(MemoryStorage::shared()), nav);
        assert!(transport.authorization().is_none());

        let request = transport
            .decorate(reqwest::Client::new().get("http://localhost/x"))
            .build()
            .unwrap();
        assert!(request.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_decorate_with_credential() {
        let nav = Arc::new(HistoryNavigator::new("/dashboard"));
        let transport = CredentialTransport::for_session(logged_in_session(), nav);

        let request = transport
            .decorate(reqwest::Client::new().get("http://localhost/x"))
            .build()
            .unwrap();
        let header = request.headers().get(AUTHORIZATION).unwrap();
        assert_eq!(header.to_str().unwrap(), "Bearer tok-7");
        assert!(header.is_sensitive());
    }

    #[test]
    fn test_success_passes_through() {
        let nav = Arc::new(HistoryNavigator::new("/dashboard"));
        let session = logged_in_session();
        let transport = CredentialTransport::for_session(session.clone(), nav.clone());

        for status in [StatusCode::OK, StatusCode::FORBIDDEN, StatusCode::INTERNAL_SERVER_ERROR] {
            assert_eq!(transport.on_response(status), ResponseDisposition::Pass);
        }
        assert!(session.is_authenticated());
        assert!(nav.navigations().is_empty());
    }

    #[test]
    fn test_unauthorized_tears_down_and_redirects() {
        let nav = Arc::new(HistoryNavigator::new("/dashboard/users"));
        let session = logged_in_session();
        let transport = CredentialTransport::for_session(session.clone(), nav.clone());

        let outcome = transport.on_response(StatusCode::UNAUTHORIZED);

        assert_eq!(outcome, ResponseDisposition::SessionRevoked { redirected: true });
        assert!(transport.credentials().get().is_none());
        assert_eq!(session.snapshot(), SessionSnapshot::empty());
        assert_eq!(nav.navigations(), vec![LOGIN_PATH.to_string()]);
    }

    #[test]
    fn test_unauthorized_on_login_does_not_renavigate() {
        let nav = Arc::new(HistoryNavigator::new("/login"));
        let session = logged_in_session();
        let transport = CredentialTransport::for_session(session.clone(), nav.clone());

        let outcome = transport.on_response(StatusCode::UNAUTHORIZED);

        assert_eq!(outcome, ResponseDisposition::SessionRevoked { redirected: false });
        assert!(transport.credentials().get().is_none());
        assert!(nav.navigations().is_empty());
    }
}
