// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Test Fixtures
//!
//! Pre-built accounts, identities and permission sets. The mock API seeds
//! itself from [`AccountFixtures::seed`], so credentials here log in there.

use warden_core::{Credential, Identity, Permission, PermissionSet, SessionSnapshot};

// =============================================================================
// Credentials
// =============================================================================

/// Super-admin login.
pub const SUPER_EMAIL: &str = "root@example.com";
/// Super-admin password.
pub const SUPER_PASSWORD: &str = "root-pass";

/// Admin login: may register users and read logs.
pub const ADMIN_EMAIL: &str = "admin@example.com";
/// Admin password.
pub const ADMIN_PASSWORD: &str = "admin-pass";

/// Viewer login: may read logs only.
pub const VIEWER_EMAIL: &str = "viewer@example.com";
/// Viewer password.
pub const VIEWER_PASSWORD: &str = "viewer-pass";

/// ID of the account that owns the seeded scans.
pub const SCANNER_ID: i64 = 3;

/// Number of seeded scans.
pub const SEEDED_SCANS: usize = 45;

// =============================================================================
// Accounts
// =============================================================================

/// An account known to the mock API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// User ID.
    pub id: i64,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email.
    pub email: String,
    /// Password.
    pub password: String,
    /// Coarse role label.
    pub role: String,
    /// Role ID.
    pub role_id: i64,
    /// Granted permission keys.
    pub permissions: Vec<String>,
}

impl Account {
    /// Returns the identity the login endpoint reports.
    pub fn identity(&self) -> Identity {
        Identity::new(self.id, self.email.clone(), self.role.clone())
    }

    /// Returns the permission set the login endpoint reports.
    pub fn permission_set(&self) -> PermissionSet {
        PermissionSet::from_keys(self.permissions.iter().map(String::as_str))
    }
}

/// Account fixtures.
pub struct AccountFixtures;

impl AccountFixtures {
    fn account(
        id: i64,
        name: (&str, &str),
        email: &str,
        password: &str,
        role: (&str, i64),
        permissions: &[&str],
    ) -> Account {
        Account {
            id,
            first_name: name.0.to_string(),
            last_name: name.1.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role: role.0.to_string(),
            role_id: role.1,
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// The super-administrator.
    pub fn super_admin() -> Account {
        Self::account(1, ("Root", "User"), SUPER_EMAIL, SUPER_PASSWORD, ("superAdmin", 1), &[])
    }

    /// An administrator with registration and log access.
    pub fn admin() -> Account {
        Self::account(
            2,
            ("Ada", "Admin"),
            ADMIN_EMAIL,
            ADMIN_PASSWORD,
            ("admin", 2),
            &["auth.register", "log.user_log", "log.scan_log"],
        )
    }

    /// A viewer with log access only. Owns the seeded scans.
    pub fn viewer() -> Account {
        Self::account(
            SCANNER_ID,
            ("Vic", "Viewer"),
            VIEWER_EMAIL,
            VIEWER_PASSWORD,
            ("user", 3),
            &["log.user_log"],
        )
    }

    /// All seeded accounts.
    pub fn seed() -> Vec<Account> {
        vec![Self::super_admin(), Self::admin(), Self::viewer()]
    }
}

// =============================================================================
// Roles
// =============================================================================

/// A role row as the mock API lists it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRow {
    /// Role ID.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Stable key.
    pub key: Option<String>,
}

/// Role fixtures.
pub struct RoleFixtures;

impl RoleFixtures {
    /// Default roles: the super-admin role first, so a default pick has to
    /// skip it.
    pub fn seed() -> Vec<RoleRow> {
        vec![
            RoleRow {
                id: 1,
                name: "Super Admin".to_string(),
                key: Some("superadmin".to_string()),
            },
            RoleRow {
                id: 2,
                name: "Admin".to_string(),
                key: Some("admin".to_string()),
            },
            RoleRow {
                id: 3,
                name: "User".to_string(),
                key: None,
            },
        ]
    }

    /// Only super-admin roles, in both spellings.
    pub fn super_only() -> Vec<RoleRow> {
        vec![
            RoleRow {
                id: 1,
                name: "superAdmin".to_string(),
                key: None,
            },
            RoleRow {
                id: 7,
                name: "Platform".to_string(),
                key: Some("SUPER_ADMIN".to_string()),
            },
        ]
    }
}

// =============================================================================
// Sessions
// =============================================================================

/// Session fixtures that need no server.
pub struct SessionFixtures;

impl SessionFixtures {
    /// A credential.
    pub fn credential(token: &str) -> Credential {
        Credential::new(token).expect("fixture tokens are non-empty")
    }

    /// An authenticated snapshot for `account`.
    pub fn snapshot_for(account: &Account) -> SessionSnapshot {
        SessionSnapshot::authenticated(
            account.identity(),
            Self::credential(&format!("fixture-token-{}", account.id)),
            account.permission_set(),
        )
    }

    /// Permissions with tags, as the login endpoint sends them.
    pub fn tagged_permissions() -> Vec<Permission> {
        vec![
            Permission::new("auth.register").with_tags("auth", "register"),
            Permission::new("log.scan_log").with_tags("log", "scan"),
        ]
    }

    /// Every permission key the console maps to a rule, plus an unknown one.
    pub fn all_keys() -> Vec<&'static str> {
        vec![
            "auth.register",
            "log.user_log",
            "log.scan_log",
            "role.manage",
            "scan.submit",
            "report.export",
        ]
    }
}
