// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Permission grants issued by the API at login.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single permission grant.
///
/// `key` is a stable dotted identifier such as `"auth.register"`; the tags are
/// descriptive grouping labels used by the API's admin screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    /// Stable dotted key.
    pub key: String,
    /// Top-level grouping tag.
    #[serde(default)]
    pub main_tag: String,
    /// Secondary grouping tag.
    #[serde(default)]
    pub sub_tag: String,
}

impl Permission {
    /// Creates a permission with empty tags.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            main_tag: String::new(),
            sub_tag: String::new(),
        }
    }

    /// Sets the grouping tags.
    pub fn with_tags(mut self, main_tag: impl Into<String>, sub_tag: impl Into<String>) -> Self {
        self.main_tag = main_tag.into();
        self.sub_tag = sub_tag.into();
        self
    }
}

// =============================================================================
// Permission Set
// =============================================================================

/// An unordered set of permissions keyed by [`Permission::key`].
///
/// Inserting a permission whose key is already present replaces the previous
/// entry. On the wire the set is a plain JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Permission>", into = "Vec<Permission>")]
pub struct PermissionSet {
    permissions: BTreeMap<String, Permission>,
}

impl PermissionSet {
    /// Creates an empty permission set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a permission set from a list of permissions.
    pub fn from_permissions(permissions: impl IntoIterator<Item = Permission>) -> Self {
        permissions.into_iter().collect()
    }

    /// Creates a permission set from bare keys.
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        keys.into_iter().map(Permission::new).collect()
    }

    /// Adds a permission, replacing any entry with the same key.
    pub fn add(&mut self, permission: Permission) {
        self.permissions.insert(permission.key.clone(), permission);
    }

    /// Removes the permission with the given key.
    pub fn remove(&mut self, key: &str) -> Option<Permission> {
        self.permissions.remove(key)
    }

    /// Returns `true` if the set contains the given key.
    pub fn contains(&self, key: &str) -> bool {
        self.permissions.contains_key(key)
    }

    /// Returns the permission with the given key.
    pub fn get(&self, key: &str) -> Option<&Permission> {
        self.permissions.get(key)
    }

    /// Returns the number of permissions in the set.
    pub fn len(&self) -> usize {
        self.permissions.len()
    }

    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }

    /// Removes every permission.
    pub fn clear(&mut self) {
        self.permissions.clear();
    }

    /// Returns an iterator over the permissions, ordered by key.
    pub fn iter(&self) -> impl Iterator<Item = &Permission> {
        self.permissions.values()
    }

    /// Returns an iterator over the keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.permissions.keys().map(String::as_str)
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        let mut set = Self::new();
        for permission in iter {
            set.add(permission);
        }
        set
    }
}

impl From<Vec<Permission>> for PermissionSet {
    fn from(permissions: Vec<Permission>) -> Self {
        permissions.into_iter().collect()
    }
}

impl From<PermissionSet> for Vec<Permission> {
    fn from(set: PermissionSet) -> Self {
        set.permissions.into_values().collect()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_collapse() {
        let set = PermissionSet::from_permissions([
            Permission::new("role.manage").with_tags("role", "old"),
            Permission::new("auth.register"),
            Permission::new("role.manage").with_tags("role", "new"),
        ]);

        assert_eq!(set.len(), 2);
        assert_eq!(set.get("role.manage").unwrap().sub_tag, "new");
    }

    #[test]
    fn test_wire_format_is_array() {
        let json = r#"[{"key":"auth.register","mainTag":"auth","subTag":"register"}]"#;
        let set: PermissionSet = serde_json::from_str(json).unwrap();
        assert!(set.contains("auth.register"));
        assert_eq!(serde_json::to_string(&set).unwrap(), json);
    }

    #[test]
    fn test_missing_tags_default_to_empty() {
        let set: PermissionSet = serde_json::from_str(r#"[{"key":"scan.submit"}]"#).unwrap();
        let perm = set.get("scan.submit").unwrap();
        assert!(perm.main_tag.is_empty());
        assert!(perm.sub_tag.is_empty());
    }
}
