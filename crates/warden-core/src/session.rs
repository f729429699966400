// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Session store.
//!
//! The [`SessionStore`] owns the authenticated identity, the bearer credential
//! and the permission set. Every mutation is applied in memory, the derived
//! [`CapabilitySet`] is recomputed, and the [`SessionSnapshot`] is written to
//! durable storage before the call returns.
//!
//! The store is an explicitly owned object shared through `Arc`; there is no
//! process-wide instance.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use warden_core::ability::{Action, Subject};
//! use warden_core::permission::PermissionSet;
//! use warden_core::session::SessionStore;
//! use warden_core::storage::MemoryStorage;
//! use warden_core::types::{Credential, Identity};
//!
//! let storage = Arc::new(MemoryStorage::new());
//! let session = SessionStore::rehydrate(storage.clone());
//! assert!(!session.is_authenticated());
//!
//! session.set_auth(
//!     Identity::new(1, "a@b.com", "user"),
//!     Credential::new("token").unwrap(),
//!     PermissionSet::from_keys(["auth.register"]),
//! );
//! assert!(session.can(Action::Create, Subject::User));
//!
//! // A fresh store over the same storage sees the same session.
//! let restored = SessionStore::rehydrate(storage);
//! assert_eq!(restored.snapshot(), session.snapshot());
//! ```

use std::fmt;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::ability::{derive, Action, CapabilitySet, Subject};
use crate::guard::{guard, GuardDecision};
use crate::permission::PermissionSet;
use crate::storage::{CredentialStore, SharedStorage, SESSION_KEY};
use crate::types::{Credential, Identity};

// =============================================================================
// SessionSnapshot
// =============================================================================

/// The persisted subset of the session.
///
/// Wire shape: `{"token", "user", "permissions", "isAuthenticated"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    /// Bearer credential.
    #[serde(default)]
    pub token: Option<Credential>,
    /// Authenticated identity.
    #[serde(default)]
    pub user: Option<Identity>,
    /// Granted permissions.
    #[serde(default)]
    pub permissions: PermissionSet,
    /// Mirrors `token.is_some()`.
    #[serde(default)]
    pub is_authenticated: bool,
}

impl SessionSnapshot {
    /// Returns the canonical empty (logged-out) session.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates an authenticated snapshot.
    pub fn authenticated(identity: Identity, credential: Credential, permissions: PermissionSet) -> Self {
        Self {
            token: Some(credential),
            user: Some(identity),
            permissions,
            is_authenticated: true,
        }
    }

    /// Re-establishes the snapshot invariants.
    ///
    /// `is_authenticated` is recomputed from the token and permissions are
    /// dropped when there is no identity.
    pub fn normalized(mut self) -> Self {
        self.is_authenticated = self.token.is_some();
        if self.user.is_none() {
            self.permissions.clear();
        }
        self
    }

    /// Parses a persisted snapshot, returning `None` when it is unusable.
    pub fn parse(raw: &str) -> Option<Self> {
        match serde_json::from_str::<Self>(raw) {
            Ok(snapshot) => Some(snapshot.normalized()),
            Err(e) => {
                warn!(error = %e, "Discarding corrupt session snapshot");
                None
            }
        }
    }

    /// Returns the route-guard state of this snapshot.
    pub fn auth_state(&self) -> AuthState {
        if self.token.is_some() {
            AuthState::Authenticated
        } else {
            AuthState::Unauthenticated
        }
    }
}

/// The two states of the session machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    /// No credential is held.
    Unauthenticated,
    /// A credential is held; validity is enforced by the server.
    Authenticated,
}

impl fmt::Display for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthState::Unauthenticated => f.write_str("unauthenticated"),
            AuthState::Authenticated => f.write_str("authenticated"),
        }
    }
}

// =============================================================================
// SessionStore
// =============================================================================

#[derive(Debug, Default)]
struct SessionState {
    snapshot: SessionSnapshot,
    capabilities: CapabilitySet,
}

impl SessionState {
    fn from_snapshot(snapshot: SessionSnapshot) -> Self {
        let capabilities = derive(snapshot.user.as_ref(), &snapshot.permissions);
        Self {
            snapshot,
            capabilities,
        }
    }
}

/// Owner of the current session.
pub struct SessionStore {
    state: RwLock<SessionState>,
    storage: SharedStorage,
    credentials: CredentialStore,
}

impl SessionStore {
    /// Creates an empty store over `storage` without reading it.
    pub fn new(storage: SharedStorage) -> Self {
        Self {
            state: RwLock::new(SessionState::default()),
            credentials: CredentialStore::new(storage.clone()),
            storage,
        }
    }

    /// Creates a store and restores the persisted session.
    ///
    /// Missing or corrupt storage yields the empty session. When a credential
    /// is restored it is mirrored into the credential entry so the transport
    /// picks it up.
    pub fn rehydrate(storage: SharedStorage) -> Self {
        let store = Self::new(storage);
        let snapshot = store.load_snapshot().unwrap_or_default();

        if let Some(ref token) = snapshot.token {
            if let Err(e) = store.credentials.set(token) {
                warn!(error = %e, "Failed to mirror restored credential");
            }
        }

        debug!(
            state = %snapshot.auth_state(),
            permissions = snapshot.permissions.len(),
            "Session rehydrated"
        );
        *store.state.write() = SessionState::from_snapshot(snapshot);
        store
    }

    fn load_snapshot(&self) -> Option<SessionSnapshot> {
        match self.storage.get(SESSION_KEY) {
            Ok(Some(raw)) => SessionSnapshot::parse(&raw),
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Failed to read session snapshot");
                None
            }
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Replaces identity, credential and permissions in one step.
    pub fn set_auth(&self, identity: Identity, credential: Credential, permissions: PermissionSet) {
        info!(user = %identity.email, role = %identity.role, "Session established");
        self.mutate(|_| SessionSnapshot::authenticated(identity, credential, permissions));
    }

    /// Ends the session. Calling this while logged out is a no-op.
    pub fn logout(&self) {
        if self.teardown() {
            info!("Session ended");
        }
    }

    /// Ends the session after the server rejected the credential.
    pub fn demote(&self) {
        if self.teardown() {
            warn!("Credential rejected by server, session ended");
        }
    }

    /// Returns whether a session was held before the teardown.
    fn teardown(&self) -> bool {
        self.mutate(|_| SessionSnapshot::empty())
    }

    /// Replaces the identity only.
    ///
    /// The credential and permissions are kept. Clearing the identity also
    /// drops the permissions, since a permission set without an owner has no
    /// meaning.
    pub fn set_user(&self, identity: Option<Identity>) {
        self.mutate(|current| SessionSnapshot {
            user: identity,
            ..current.clone()
        });
    }

    /// Applies `f` to the current snapshot under a single write guard.
    ///
    /// The credential entry, the persisted snapshot and the in-memory state
    /// are all updated before the guard is released, so concurrent mutations
    /// are serialized. Returns whether the previous snapshot was
    /// authenticated.
    fn mutate(&self, f: impl FnOnce(&SessionSnapshot) -> SessionSnapshot) -> bool {
        let mut state = self.state.write();
        let was_authenticated = state.snapshot.is_authenticated;
        let next = f(&state.snapshot).normalized();

        let synced = match next.token {
            Some(ref token) => self.credentials.set(token),
            None => self.credentials.clear(),
        };
        if let Err(e) = synced {
            warn!(error = %e, "Failed to sync stored credential");
        }
        self.persist(&next);

        *state = SessionState::from_snapshot(next);
        was_authenticated
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns a copy of the current session.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.read().snapshot.clone()
    }

    /// Returns the current identity.
    pub fn identity(&self) -> Option<Identity> {
        self.state.read().snapshot.user.clone()
    }

    /// Returns the current credential.
    pub fn credential(&self) -> Option<Credential> {
        self.state.read().snapshot.token.clone()
    }

    /// Returns the current permission set.
    pub fn permissions(&self) -> PermissionSet {
        self.state.read().snapshot.permissions.clone()
    }

    /// Returns `true` if a credential is held.
    pub fn is_authenticated(&self) -> bool {
        self.state.read().snapshot.is_authenticated
    }

    /// Returns the current state of the session machine.
    pub fn auth_state(&self) -> AuthState {
        self.state.read().snapshot.auth_state()
    }

    /// Returns the derived capability set.
    pub fn capabilities(&self) -> CapabilitySet {
        self.state.read().capabilities.clone()
    }

    /// Returns `true` if the session permits `action` on `subject`.
    pub fn can(&self, action: Action, subject: Subject) -> bool {
        self.state.read().capabilities.can(action, subject)
    }

    /// Returns `true` if the session does not permit `action` on `subject`.
    pub fn cannot(&self, action: Action, subject: Subject) -> bool {
        self.state.read().capabilities.cannot(action, subject)
    }

    /// Runs the route guard against the current session.
    pub fn guard(&self, requested_path: &str) -> GuardDecision {
        guard(&self.state.read().snapshot, requested_path)
    }

    /// Returns the credential storage primitive.
    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// Returns the storage handle.
    pub fn storage(&self) -> &SharedStorage {
        &self.storage
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("SessionStore")
            .field("state", &state.snapshot.auth_state())
            .field("user", &state.snapshot.user)
            .field("permissions", &state.snapshot.permissions.len())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::ability::Rule;
    use crate::storage::{MemoryStorage, Storage, TOKEN_KEY};

    fn identity() -> Identity {
        Identity::new(1, "a@b.com", "user")
    }

    fn token(s: &str) -> Credential {
        Credential::new(s).unwrap()
    }

    fn logged_in(storage: Arc<MemoryStorage>) -> SessionStore {
        let store = SessionStore::rehydrate(storage);
        store.set_auth(
            identity(),
            token("t-1"),
            PermissionSet::from_keys(["log.user_log", "auth.register"]),
        );
        store
    }

    #[test]
    fn test_empty_storage_yields_empty_session() {
        let store = SessionStore::rehydrate(MemoryStorage::shared());
        assert_eq!(store.snapshot(), SessionSnapshot::empty());
        assert_eq!(store.auth_state(), AuthState::Unauthenticated);
        assert!(store.capabilities().is_empty());
    }

    #[test]
    fn test_set_auth_persists_and_derives() {
        let storage = MemoryStorage::shared();
        let store = logged_in(storage.clone());

        assert!(store.is_authenticated());
        assert!(store.can(Action::Read, Subject::Logs));
        assert!(store.can(Action::Create, Subject::User));
        assert!(!store.can(Action::Manage, Subject::Role));
        assert!(store.cannot(Action::Manage, Subject::Role));
        assert!(!store.cannot(Action::Read, Subject::Logs));

        assert_eq!(storage.get(TOKEN_KEY).unwrap(), Some("t-1".to_string()));
        let raw = storage.get(SESSION_KEY).unwrap().unwrap();
        assert!(raw.contains("\"isAuthenticated\":true"));
    }

    #[test]
    fn test_persist_rehydrate_roundtrip() {
        let storage = MemoryStorage::shared();
        let store = logged_in(storage.clone());

        let restored = SessionStore::rehydrate(storage);
        assert_eq!(restored.snapshot(), store.snapshot());
        assert_eq!(restored.capabilities(), store.capabilities());
    }

    #[test]
    fn test_rehydrate_mirrors_credential() {
        let storage = MemoryStorage::shared();
        logged_in(storage.clone());
        storage.remove(TOKEN_KEY).unwrap();

        let restored = SessionStore::rehydrate(storage.clone());
        assert_eq!(restored.credentials().get().unwrap().as_str(), "t-1");
    }

    #[test]
    fn test_corrupt_snapshot_is_ignored() {
        let storage = MemoryStorage::shared();
        storage.set(SESSION_KEY, "{not json").unwrap();
        let store = SessionStore::rehydrate(storage.clone());
        assert_eq!(store.snapshot(), SessionSnapshot::empty());

        storage.set(SESSION_KEY, r#"{"token":"","user":null}"#).unwrap();
        let store = SessionStore::rehydrate(storage);
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_snapshot_is_normalized_on_load() {
        let storage = MemoryStorage::shared();
        storage
            .set(
                SESSION_KEY,
                r#"{"token":"abc","user":null,"permissions":[{"key":"role.manage"}],"isAuthenticated":false}"#,
            )
            .unwrap();

        let store = SessionStore::rehydrate(storage);
        let snapshot = store.snapshot();
        assert!(snapshot.is_authenticated);
        assert!(snapshot.permissions.is_empty());
    }

    #[test]
    fn test_logout_clears_everything_and_is_idempotent() {
        let storage = MemoryStorage::shared();
        let store = logged_in(storage.clone());

        store.logout();
        assert_eq!(store.snapshot(), SessionSnapshot::empty());
        assert!(store.credentials().get().is_none());
        for action in Action::all() {
            for subject in Subject::concrete() {
                assert!(!store.can(*action, *subject));
            }
        }

        store.logout();
        assert_eq!(SessionStore::rehydrate(storage).snapshot(), SessionSnapshot::empty());
    }

    #[test]
    fn test_set_user_keeps_credential_and_permissions() {
        let store = logged_in(MemoryStorage::shared());
        let before = store.snapshot();

        store.set_user(Some(Identity::new(1, "a@b.com", "user")));
        let after = store.snapshot();

        assert_eq!(after.token, before.token);
        assert_eq!(after.permissions, before.permissions);
        assert!(after.is_authenticated);
    }

    #[test]
    fn test_set_user_recomputes_capabilities() {
        let store = logged_in(MemoryStorage::shared());
        store.set_user(Some(Identity::new(1, "a@b.com", crate::types::SUPER_ADMIN_ROLE)));
        assert_eq!(store.capabilities().rules(), &[Rule::universal()]);

        store.set_user(None);
        assert!(store.capabilities().is_empty());
        assert!(store.permissions().is_empty());
        assert!(store.is_authenticated());
    }

    #[test]
    fn test_demote_matches_logout() {
        let store = logged_in(MemoryStorage::shared());
        store.demote();
        assert_eq!(store.snapshot(), SessionSnapshot::empty());
    }

    #[test]
    fn test_concurrent_set_user_and_demote_stay_consistent() {
        for _ in 0..500 {
            let storage = MemoryStorage::shared();
            let store = Arc::new(logged_in(storage.clone()));
            let barrier = Arc::new(std::sync::Barrier::new(2));

            let renamer = {
                let store = store.clone();
                let barrier = barrier.clone();
                std::thread::spawn(move || {
                    barrier.wait();
                    store.set_user(Some(Identity::new(1, "renamed@b.com", "user")));
                })
            };
            let rejecter = {
                let store = store.clone();
                let barrier = barrier.clone();
                std::thread::spawn(move || {
                    barrier.wait();
                    store.demote();
                })
            };
            renamer.join().unwrap();
            rejecter.join().unwrap();

            let snapshot = store.snapshot();
            assert!(!snapshot.is_authenticated);
            assert!(snapshot.token.is_none());
            assert!(store.credentials().get().is_none());
            assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);

            let persisted = storage.get(SESSION_KEY).unwrap().unwrap();
            assert_eq!(SessionSnapshot::parse(&persisted), Some(snapshot));
        }
    }
}
