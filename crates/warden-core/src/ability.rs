// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Capability derivation.
//!
//! A [`CapabilitySet`] answers "can action A be performed on subject S" for
//! the current session. It is derived from the identity and permission set
//! through a fixed table ([`PERMISSION_RULES`]) and is never persisted.
//!
//! ```text
//! identity == None           -> {}
//! identity.role == superAdmin -> { manage all }
//! otherwise                  -> { read Dashboard } ∪ rules(permission keys)
//! ```
//!
//! # Example
//!
//! ```
//! use warden_core::ability::{derive, Action, Subject};
//! use warden_core::permission::PermissionSet;
//! use warden_core::types::Identity;
//!
//! let user = Identity::new(1, "a@b.com", "user");
//! let caps = derive(Some(&user), &PermissionSet::from_keys(["log.user_log"]));
//!
//! assert!(caps.can(Action::Read, Subject::Logs));
//! assert!(!caps.can(Action::Create, Subject::User));
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::permission::PermissionSet;
use crate::types::Identity;

// =============================================================================
// Action
// =============================================================================

/// Operations that can be gated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// View a subject.
    Read,
    /// Create a subject.
    Create,
    /// Modify a subject.
    Update,
    /// Remove a subject.
    Delete,
    /// Any action; subsumes all others.
    Manage,
}

impl Action {
    /// Returns the action name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Read => "read",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Manage => "manage",
        }
    }

    /// Parses an action from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "read" => Some(Action::Read),
            "create" => Some(Action::Create),
            "update" => Some(Action::Update),
            "delete" => Some(Action::Delete),
            "manage" => Some(Action::Manage),
            _ => None,
        }
    }

    /// Returns all actions.
    pub fn all() -> &'static [Action] {
        &[
            Action::Read,
            Action::Create,
            Action::Update,
            Action::Delete,
            Action::Manage,
        ]
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| CoreError::UnknownAction(s.to_string()))
    }
}

// =============================================================================
// Subject
// =============================================================================

/// Things an action can be performed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subject {
    /// The dashboard home and its KPIs.
    Dashboard,
    /// Activity and scan logs.
    Logs,
    /// User accounts.
    User,
    /// Roles.
    Role,
    /// Document scans.
    Scan,
    /// Every subject.
    #[serde(rename = "all")]
    All,
}

impl Subject {
    /// Returns the subject name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Subject::Dashboard => "Dashboard",
            Subject::Logs => "Logs",
            Subject::User => "User",
            Subject::Role => "Role",
            Subject::Scan => "Scan",
            Subject::All => "all",
        }
    }

    /// Parses a subject from a string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "dashboard" => Some(Subject::Dashboard),
            "logs" => Some(Subject::Logs),
            "user" => Some(Subject::User),
            "role" => Some(Subject::Role),
            "scan" => Some(Subject::Scan),
            "all" => Some(Subject::All),
            _ => None,
        }
    }

    /// Returns every concrete subject (excluding [`Subject::All`]).
    pub fn concrete() -> &'static [Subject] {
        &[
            Subject::Dashboard,
            Subject::Logs,
            Subject::User,
            Subject::Role,
            Subject::Scan,
        ]
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Subject {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| CoreError::UnknownSubject(s.to_string()))
    }
}

// =============================================================================
// Rule
// =============================================================================

/// A single capability rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rule {
    /// Permitted action.
    pub action: Action,
    /// Subject the action applies to.
    pub subject: Subject,
}

impl Rule {
    /// Creates a new rule.
    pub const fn new(action: Action, subject: Subject) -> Self {
        Self { action, subject }
    }

    /// The universal rule granted to super admins.
    pub const fn universal() -> Self {
        Self::new(Action::Manage, Subject::All)
    }

    /// Returns `true` if this rule permits `action` on `subject`.
    pub fn permits(&self, action: Action, subject: Subject) -> bool {
        (self.action == action || self.action == Action::Manage)
            && (self.subject == subject || self.subject == Subject::All)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.action, self.subject)
    }
}

// =============================================================================
// Mapping table
// =============================================================================

/// Rules granted to every authenticated, non-super-admin identity.
pub const BASELINE_RULES: &[Rule] = &[Rule::new(Action::Read, Subject::Dashboard)];

/// Permission key to emitted rules.
///
/// Keys not listed here grant nothing.
pub const PERMISSION_RULES: &[(&str, &[Rule])] = &[
    ("auth.register", &[Rule::new(Action::Create, Subject::User)]),
    (
        "log.user_log",
        &[
            Rule::new(Action::Read, Subject::Logs),
            Rule::new(Action::Read, Subject::User),
        ],
    ),
    (
        "log.scan_log",
        &[
            Rule::new(Action::Read, Subject::Logs),
            Rule::new(Action::Read, Subject::User),
        ],
    ),
    ("role.manage", &[Rule::new(Action::Manage, Subject::Role)]),
    ("scan.submit", &[Rule::new(Action::Manage, Subject::Scan)]),
];

/// Returns the rules a permission key maps to.
pub fn rules_for_key(key: &str) -> &'static [Rule] {
    PERMISSION_RULES
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, rules)| *rules)
        .unwrap_or(&[])
}

// =============================================================================
// CapabilitySet
// =============================================================================

/// The derived collection of permitted action/subject pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CapabilitySet {
    rules: Vec<Rule>,
}

impl CapabilitySet {
    /// Creates an empty capability set (nothing permitted).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates the universal capability set.
    pub fn universal() -> Self {
        Self {
            rules: vec![Rule::universal()],
        }
    }

    /// Adds a rule; duplicates are ignored.
    pub fn add(&mut self, rule: Rule) {
        if !self.rules.contains(&rule) {
            self.rules.push(rule);
        }
    }

    /// Returns `true` if `action` is permitted on `subject`.
    pub fn can(&self, action: Action, subject: Subject) -> bool {
        self.rules.iter().any(|r| r.permits(action, subject))
    }

    /// Returns `true` if `action` is not permitted on `subject`.
    pub fn cannot(&self, action: Action, subject: Subject) -> bool {
        !self.can(action, subject)
    }

    /// Returns the emitted rules in emission order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Returns `true` if the set grants nothing.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns the number of distinct rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }
}

impl FromIterator<Rule> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        let mut set = Self::empty();
        for rule in iter {
            set.add(rule);
        }
        set
    }
}

/// Derives the capability set for an identity and its permissions.
pub fn derive(identity: Option<&Identity>, permissions: &PermissionSet) -> CapabilitySet {
    let Some(identity) = identity else {
        return CapabilitySet::empty();
    };

    if identity.is_super_admin() {
        return CapabilitySet::universal();
    }

    BASELINE_RULES
        .iter()
        .copied()
        .chain(permissions.keys().flat_map(|key| rules_for_key(key).iter().copied()))
        .collect()
}

/// Query primitive used by UI gating.
#[inline]
pub fn can(capabilities: &CapabilitySet, action: Action, subject: Subject) -> bool {
    capabilities.can(action, subject)
}

// =============================================================================
// Tests
// =============================================================================
