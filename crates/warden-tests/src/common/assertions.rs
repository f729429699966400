// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Custom Assertions
//!
//! Assertions over session state, storage and navigation.

use warden_client::HistoryNavigator;
use warden_core::{
    Action, AuthState, SessionSnapshot, SessionStore, Storage, Subject, SESSION_KEY, TOKEN_KEY,
};

/// Asserts that `session` is fully signed out and denies everything.
pub fn assert_signed_out(session: &SessionStore) {
    assert_eq!(session.auth_state(), AuthState::Unauthenticated);
    assert_eq!(session.snapshot(), SessionSnapshot::empty());
    assert!(session.credentials().get().is_none(), "credential still stored");
    for action in warden_core::Action::all() {
        for subject in Subject::concrete() {
            assert!(
                !session.can(*action, *subject),
                "signed-out session can {action} {subject}"
            );
        }
    }
}

/// Asserts that the persisted snapshot matches `expected`.
pub fn assert_persisted(storage: &dyn Storage, expected: &SessionSnapshot) {
    let raw = storage
        .get(SESSION_KEY)
        .expect("storage read failed")
        .expect("no snapshot persisted");
    let persisted = SessionSnapshot::parse(&raw).expect("persisted snapshot does not parse");
    assert_eq!(&persisted, expected);
}

/// Asserts that the credential key holds `token`, or nothing when `None`.
pub fn assert_stored_token(storage: &dyn Storage, token: Option<&str>) {
    let stored = storage.get(TOKEN_KEY).expect("storage read failed");
    assert_eq!(stored.as_deref(), token);
}

/// Asserts that the navigator went exactly through `paths` since creation.
pub fn assert_navigations(navigator: &HistoryNavigator, paths: &[&str]) {
    let expected: Vec<String> = paths.iter().map(|p| p.to_string()).collect();
    assert_eq!(navigator.navigations(), expected);
}

/// Asserts a capability query.
pub fn assert_can(session: &SessionStore, action: Action, subject: Subject, expected: bool) {
    assert_eq!(
        session.can(action, subject),
        expected,
        "can({action}, {subject}) should be {expected}"
    );
}
