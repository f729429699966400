// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Error types for the session and authorization core.
//!
//! Nothing in this crate is fatal: storage failures are reported to the caller
//! of the storage primitive, while the session store downgrades them to log
//! lines and keeps its in-memory state authoritative.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// CoreError
// =============================================================================

/// Errors raised by the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Durable storage could not be read or written.
    #[error("Storage error for key '{key}' at '{path}': {source}")]
    Storage {
        /// Storage key being accessed.
        key: String,
        /// Backing path of the entry.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A storage key contains characters that cannot be mapped to an entry.
    #[error("Invalid storage key: '{key}'")]
    InvalidKey {
        /// The rejected key.
        key: String,
    },

    /// A persisted value could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A bearer credential was empty.
    #[error("Credential must not be empty")]
    EmptyCredential,

    /// An action name was not recognised.
    #[error("Unknown action: '{0}'")]
    UnknownAction(String),

    /// A subject name was not recognised.
    #[error("Unknown subject: '{0}'")]
    UnknownSubject(String),
}

impl CoreError {
    /// Creates a storage error.
    pub fn storage(key: impl Into<String>, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Storage {
            key: key.into(),
            path: path.into(),
            source,
        }
    }

    /// Creates an invalid key error.
    pub fn invalid_key(key: impl Into<String>) -> Self {
        Self::InvalidKey { key: key.into() }
    }

    /// Returns `true` if the error comes from the storage backend.
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage { .. } | Self::InvalidKey { .. })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_display() {
        let err = CoreError::storage(
            "auth_token",
            "/tmp/warden/auth_token",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = err.to_string();
        assert!(msg.contains("auth_token"));
        assert!(msg.contains("denied"));
        assert!(err.is_storage());
    }

    #[test]
    fn test_parse_errors_are_not_storage() {
        assert!(!CoreError::UnknownAction("fly".into()).is_storage());
        assert!(!CoreError::EmptyCredential.is_storage());
        assert!(CoreError::invalid_key("../x").is_storage());
    }
}
