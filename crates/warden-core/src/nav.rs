// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Sidebar navigation entries and their capability gates.

use serde::Serialize;

use crate::ability::{Action, CapabilitySet, Subject};
use crate::guard::Route;

/// A navigation entry gated by one capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    /// Display label.
    pub label: &'static str,
    /// Target route.
    pub route: Route,
    /// Required action.
    pub action: Action,
    /// Required subject.
    pub subject: Subject,
}

impl NavItem {
    /// Returns `true` if the item is visible for `capabilities`.
    pub fn is_visible(&self, capabilities: &CapabilitySet) -> bool {
        capabilities.can(self.action, self.subject)
    }
}

/// The sidebar, in display order.
pub const NAV_ITEMS: &[NavItem] = &[
    NavItem {
        label: "Home",
        route: Route::Home,
        action: Action::Read,
        subject: Subject::Dashboard,
    },
    NavItem {
        label: "Register",
        route: Route::Register,
        action: Action::Create,
        subject: Subject::User,
    },
    NavItem {
        label: "Users",
        route: Route::Users,
        action: Action::Read,
        subject: Subject::User,
    },
    NavItem {
        label: "Logs",
        route: Route::Logs,
        action: Action::Read,
        subject: Subject::Logs,
    },
];

/// Returns the navigation entries visible for `capabilities`.
pub fn visible_items(capabilities: &CapabilitySet) -> Vec<&'static NavItem> {
    NAV_ITEMS.iter().filter(|item| item.is_visible(capabilities)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::derive;
    use crate::permission::PermissionSet;
    use crate::types::{Identity, SUPER_ADMIN_ROLE};

    fn labels(caps: &CapabilitySet) -> Vec<&'static str> {
        visible_items(caps).iter().map(|i| i.label).collect()
    }

    #[test]
    fn test_nothing_visible_when_logged_out() {
        assert!(labels(&CapabilitySet::empty()).is_empty());
    }

    #[test]
    fn test_plain_user_sees_home() {
        let caps = derive(Some(&Identity::new(1, "a@b.com", "user")), &PermissionSet::new());
        assert_eq!(labels(&caps), vec!["Home"]);
    }

    #[test]
    fn test_log_reader_sees_users_and_logs() {
        let caps = derive(
            Some(&Identity::new(1, "a@b.com", "auditor")),
            &PermissionSet::from_keys(["log.scan_log"]),
        );
        assert_eq!(labels(&caps), vec!["Home", "Users", "Logs"]);
    }

    #[test]
    fn test_super_admin_sees_everything() {
        let caps = derive(
            Some(&Identity::new(1, "root@x.io", SUPER_ADMIN_ROLE)),
            &PermissionSet::new(),
        );
        assert_eq!(labels(&caps).len(), NAV_ITEMS.len());
    }
}
