// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Identity and credential types.
//!
//! Both values are issued by the remote API and treated as opaque: the core
//! never validates a token's shape and never inspects an identity beyond its
//! role label.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Role label that short-circuits permission evaluation.
pub const SUPER_ADMIN_ROLE: &str = "superAdmin";

// =============================================================================
// UserId
// =============================================================================

/// Numeric identifier of a user as assigned by the API.
///
/// # Examples
///
/// ```
/// use warden_core::types::UserId;
///
/// let id = UserId::new(42);
/// assert_eq!(id.get(), 42);
/// assert_eq!(id.to_string(), "42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Creates a new user ID.
    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw numeric value.
    #[inline]
    pub const fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

// =============================================================================
// Identity
// =============================================================================

/// The authenticated user as returned by the login endpoint.
///
/// Identities are replaced wholesale on login and cleared on logout; they are
/// never patched field by field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// User ID.
    pub id: UserId,
    /// Login email.
    pub email: String,
    /// Coarse role label (e.g. `"user"`, `"admin"`, `"superAdmin"`).
    pub role: String,
}

impl Identity {
    /// Creates a new identity.
    pub fn new(id: impl Into<UserId>, email: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            role: role.into(),
        }
    }

    /// Returns `true` if this identity carries the super-admin role.
    ///
    /// The comparison is exact: `"superadmin"` is an ordinary role.
    pub fn is_super_admin(&self) -> bool {
        self.role == SUPER_ADMIN_ROLE
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (#{}, {})", self.email, self.id, self.role)
    }
}

// =============================================================================
// Credential
// =============================================================================

/// An opaque bearer token.
///
/// The only check performed is that the token is non-empty. `Debug` output is
/// redacted so tokens never end up in logs.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Credential(String);

impl Credential {
    /// Creates a credential from a token string.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptyCredential`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, CoreError> {
        let token = token.into();
        if token.is_empty() {
            return Err(CoreError::EmptyCredential);
        }
        Ok(Self(token))
    }

    /// Returns the raw token.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the value of an `Authorization` header carrying this token.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl TryFrom<String> for Credential {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Credential> for String {
    fn from(credential: Credential) -> Self {
        credential.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

// =============================================================================
// Tests
// =============================================================================
