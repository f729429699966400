// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Session Integration Tests
//!
//! Integration tests for warden-core without a server:
//!
//! - Capability derivation properties
//! - Session persistence and rehydration across storage backends
//! - Route guard and navigation gate
//!
//! ## Test Categories
//!
//! - `test_derive_*`: Authorization engine
//! - `test_session_*`: Session store
//! - `test_guard_*`: Route guard
//! - `test_nav_*`: Navigation gate

use std::sync::Arc;

use warden_core::guard::post_login_destination;
use warden_core::{
    derive, guard, visible_items, Action, FileStorage, GuardDecision, Identity, MemoryStorage,
    PermissionSet, Route, SessionSnapshot, SessionStore, Storage, Subject, SESSION_KEY, TOKEN_KEY,
};
use warden_tests::common::{
    assert_can, assert_persisted, assert_signed_out, assert_stored_token, init_test_logging,
    temp_test_dir, AccountFixtures, SessionFixtures,
};

fn subsets(keys: &[&'static str]) -> Vec<Vec<&'static str>> {
    (0..1u32 << keys.len())
        .map(|mask| {
            keys.iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, k)| *k)
                .collect()
        })
        .collect()
}

// =============================================================================
// Authorization Engine
// =============================================================================

#[test]
fn test_derive_baseline_only_with_identity() {
    let viewer = AccountFixtures::viewer().identity();
    for keys in subsets(&SessionFixtures::all_keys()) {
        let caps = derive(Some(&viewer), &PermissionSet::from_keys(keys.clone()));
        assert!(caps.can(Action::Read, Subject::Dashboard), "{keys:?}");

        let anonymous = derive(None, &PermissionSet::from_keys(keys.clone()));
        assert!(anonymous.is_empty(), "{keys:?}");
    }
}

#[test]
fn test_derive_super_admin_is_universal() {
    let root = AccountFixtures::super_admin().identity();
    for keys in [vec![], vec!["log.user_log"], SessionFixtures::all_keys()] {
        let caps = derive(Some(&root), &PermissionSet::from_keys(keys));
        assert_eq!(caps.len(), 1);
        for action in Action::all() {
            for subject in Subject::concrete() {
                assert!(caps.can(*action, *subject));
            }
        }
    }
}

#[test]
fn test_derive_is_monotonic() {
    let admin = AccountFixtures::admin().identity();
    let all = SessionFixtures::all_keys();

    for smaller in subsets(&all) {
        let small_caps = derive(Some(&admin), &PermissionSet::from_keys(smaller.clone()));
        for extra in all.iter().filter(|k| !smaller.contains(k)) {
            let mut bigger = smaller.clone();
            bigger.push(extra);
            let big_caps = derive(Some(&admin), &PermissionSet::from_keys(bigger));
            for action in Action::all() {
                for subject in Subject::concrete() {
                    if small_caps.can(*action, *subject) {
                        assert!(big_caps.can(*action, *subject), "{smaller:?} + {extra}: {action} {subject}");
                    }
                }
            }
        }
    }
}

#[test]
fn test_derive_log_access_grants_user_read_only() {
    let caps = derive(
        Some(&AccountFixtures::viewer().identity()),
        &PermissionSet::from_keys(["log.user_log"]),
    );
    assert!(caps.can(Action::Read, Subject::Logs));
    assert!(caps.can(Action::Read, Subject::User));
    assert!(!caps.can(Action::Create, Subject::User));
    assert!(!caps.can(Action::Read, Subject::Role));
}

#[test]
fn test_derive_manage_rules() {
    let caps = derive(
        Some(&AccountFixtures::admin().identity()),
        &PermissionSet::from_keys(["role.manage", "scan.submit"]),
    );
    for action in Action::all() {
        assert!(caps.can(*action, Subject::Role));
        assert!(caps.can(*action, Subject::Scan));
    }
    assert!(!caps.can(Action::Read, Subject::Logs));
}

// =============================================================================
// Session Store
// =============================================================================

#[test]
fn test_session_roundtrip_memory_storage() {
    init_test_logging();
    let storage = MemoryStorage::shared();
    let session = SessionStore::rehydrate(storage.clone());
    let admin = AccountFixtures::admin();

    session.set_auth(
        admin.identity(),
        SessionFixtures::credential("tok-admin"),
        admin.permission_set(),
    );

    let restored = SessionStore::rehydrate(storage.clone());
    assert_eq!(restored.snapshot(), session.snapshot());
    assert_eq!(restored.capabilities(), session.capabilities());
    assert_persisted(storage.as_ref(), &session.snapshot());
    assert_stored_token(storage.as_ref(), Some("tok-admin"));
}

#[test]
fn test_session_roundtrip_file_storage() {
    init_test_logging();
    let dir = temp_test_dir("warden-session");
    let viewer = AccountFixtures::viewer();

    {
        let storage = Arc::new(FileStorage::open(dir.path()).unwrap());
        let session = SessionStore::rehydrate(storage);
        session.set_auth(
            viewer.identity(),
            SessionFixtures::credential("tok-viewer"),
            viewer.permission_set(),
        );
    }

    let storage = Arc::new(FileStorage::open(dir.path()).unwrap());
    let session = SessionStore::rehydrate(storage.clone());
    assert_eq!(
        session.snapshot(),
        SessionSnapshot::authenticated(
            viewer.identity(),
            SessionFixtures::credential("tok-viewer"),
            viewer.permission_set(),
        )
    );
    assert_can(&session, Action::Read, Subject::Logs, true);
    assert_stored_token(storage.as_ref(), Some("tok-viewer"));
}

#[test]
fn test_session_rehydrate_mirrors_credential() {
    let storage = MemoryStorage::shared();
    let snapshot = SessionFixtures::snapshot_for(&AccountFixtures::admin());
    storage
        .set(SESSION_KEY, &serde_json::to_string(&snapshot).unwrap())
        .unwrap();
    assert_stored_token(storage.as_ref(), None);

    let session = SessionStore::rehydrate(storage.clone());

    assert!(session.is_authenticated());
    assert_stored_token(storage.as_ref(), Some("fixture-token-2"));
}

#[test]
fn test_session_corrupt_snapshot_yields_empty() {
    init_test_logging();
    for raw in ["{not json", "[]", r#"{"token": 42}"#] {
        let storage = MemoryStorage::shared();
        storage.set(SESSION_KEY, raw).unwrap();
        let session = SessionStore::rehydrate(storage);
        assert_signed_out(&session);
    }
}

#[test]
fn test_session_snapshot_without_user_drops_permissions() {
    let storage = MemoryStorage::shared();
    storage
        .set(
            SESSION_KEY,
            r#"{"token":"t","user":null,"permissions":[{"key":"auth.register"}],"isAuthenticated":false}"#,
        )
        .unwrap();

    let session = SessionStore::rehydrate(storage);

    assert!(session.is_authenticated());
    assert!(session.permissions().is_empty());
    assert!(session.capabilities().is_empty());
}

#[test]
fn test_session_logout_denies_everything() {
    let storage = MemoryStorage::shared();
    let session = SessionStore::rehydrate(storage.clone());
    let root = AccountFixtures::super_admin();
    session.set_auth(root.identity(), SessionFixtures::credential("tok-root"), PermissionSet::new());
    assert_can(&session, Action::Delete, Subject::User, true);

    session.logout();
    assert_signed_out(&session);
    assert_persisted(storage.as_ref(), &SessionSnapshot::empty());
    assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);

    // Idempotent.
    session.logout();
    assert_signed_out(&session);
}

#[test]
fn test_session_set_user_keeps_credential_and_permissions() {
    let session = SessionStore::rehydrate(MemoryStorage::shared());
    let admin = AccountFixtures::admin();
    session.set_auth(admin.identity(), SessionFixtures::credential("tok"), admin.permission_set());

    let renamed = Identity::new(2, "ada@example.com", "admin");
    session.set_user(Some(renamed.clone()));

    assert_eq!(session.identity(), Some(renamed));
    assert_eq!(session.credential(), Some(SessionFixtures::credential("tok")));
    assert_eq!(session.permissions(), admin.permission_set());
    assert_can(&session, Action::Create, Subject::User, true);
}

#[test]
fn test_session_tagged_permissions_survive_persistence() {
    let storage = MemoryStorage::shared();
    let session = SessionStore::rehydrate(storage.clone());
    let permissions = PermissionSet::from_permissions(SessionFixtures::tagged_permissions());
    session.set_auth(
        AccountFixtures::admin().identity(),
        SessionFixtures::credential("tok"),
        permissions.clone(),
    );

    let restored = SessionStore::rehydrate(storage);
    let register = restored.permissions().get("auth.register").cloned().unwrap();
    assert_eq!(register.main_tag, "auth");
    assert_eq!(register.sub_tag, "register");
    assert_eq!(restored.permissions(), permissions);
}

// =============================================================================
// Route Guard
// =============================================================================

#[test]
fn test_guard_unauthenticated_redirects_protected_routes() {
    let empty = SessionSnapshot::empty();
    for route in Route::all() {
        let decision = guard(&empty, route.path());
        if route.is_protected() {
            assert_eq!(
                decision,
                GuardDecision::RedirectToLogin {
                    from: route.path().to_string()
                }
            );
        } else {
            assert!(decision.is_allowed());
        }
    }
}

#[test]
fn test_guard_authenticated_admits_everything() {
    let snapshot = SessionFixtures::snapshot_for(&AccountFixtures::viewer());
    for path in ["/", "/login", "/dashboard", "/dashboard/register", "/dashboard/users", "/nowhere"] {
        assert!(guard(&snapshot, path).is_allowed(), "{path}");
    }
}

#[test]
fn test_guard_post_login_destination() {
    assert_eq!(post_login_destination(None), "/dashboard");
    assert_eq!(post_login_destination(Some("/dashboard/logs")), "/dashboard/logs");
    assert_eq!(post_login_destination(Some("/login")), "/dashboard");
    assert_eq!(
        post_login_destination(Some("/dashboard/users?role=admin")),
        "/dashboard/users?role=admin"
    );
}

// =============================================================================
// Navigation Gate
// =============================================================================

#[test]
fn test_nav_filters_by_capability() {
    let labels = |account: Option<warden_tests::common::Account>| -> Vec<&'static str> {
        let caps = match account {
            Some(a) => derive(Some(&a.identity()), &a.permission_set()),
            None => derive(None, &PermissionSet::new()),
        };
        visible_items(&caps).iter().map(|item| item.label).collect()
    };

    assert!(labels(None).is_empty());
    assert_eq!(labels(Some(AccountFixtures::viewer())), vec!["Home", "Users", "Logs"]);
    assert_eq!(
        labels(Some(AccountFixtures::admin())),
        vec!["Home", "Register", "Users", "Logs"]
    );
    assert_eq!(
        labels(Some(AccountFixtures::super_admin())),
        vec!["Home", "Register", "Users", "Logs"]
    );
}
