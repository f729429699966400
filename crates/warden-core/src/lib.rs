// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # warden-core
//!
//! Session and authorization core for the Warden admin console.
//!
//! This crate holds everything the console decides locally, with no network
//! access:
//!
//! - **Types**: `Identity`, `Credential`, `UserId`
//! - **Permission**: API permission grants and the keyed `PermissionSet`
//! - **Ability**: capability derivation (`derive`, `can`) from a fixed table
//! - **Storage**: durable key/value storage and the credential primitive
//! - **Session**: the `SessionStore` with persistence and rehydration
//! - **Guard**: route table and the two-state route guard
//! - **Nav**: sidebar entries gated by capabilities
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use warden_core::{
//!     Action, Credential, GuardDecision, Identity, MemoryStorage, PermissionSet, SessionStore,
//!     Subject,
//! };
//!
//! let session = SessionStore::rehydrate(Arc::new(MemoryStorage::new()));
//! assert!(matches!(
//!     session.guard("/dashboard/users"),
//!     GuardDecision::RedirectToLogin { .. }
//! ));
//!
//! session.set_auth(
//!     Identity::new(1, "a@b.com", "user"),
//!     Credential::new("token").unwrap(),
//!     PermissionSet::from_keys(["log.user_log"]),
//! );
//! assert!(session.guard("/dashboard/users").is_allowed());
//! assert!(session.can(Action::Read, Subject::Logs));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

// =============================================================================
// Modules
// =============================================================================

pub mod ability;
pub mod error;
pub mod guard;
pub mod nav;
pub mod permission;
pub mod session;
pub mod storage;
pub mod types;

// =============================================================================
// Re-exports for convenience
// =============================================================================

pub use ability::{derive, Action, CapabilitySet, Rule, Subject};
pub use error::{CoreError, CoreResult};
pub use guard::{guard, GuardDecision, Route, DASHBOARD_PATH, LOGIN_PATH};
pub use nav::{visible_items, NavItem, NAV_ITEMS};
pub use permission::{Permission, PermissionSet};
pub use session::{AuthState, SessionSnapshot, SessionStore};
pub use storage::{
    CredentialStore, FileStorage, MemoryStorage, SharedStorage, Storage, SESSION_KEY, TOKEN_KEY,
};
pub use types::{Credential, Identity, UserId, SUPER_ADMIN_ROLE};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
