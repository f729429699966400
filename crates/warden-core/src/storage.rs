// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Durable key/value storage.
//!
//! The console persists two entries:
//!
//! | Key | Content |
//! |-----|---------|
//! | [`TOKEN_KEY`] | The raw bearer token, read by the transport |
//! | [`SESSION_KEY`] | JSON session snapshot, read by the session store |
//!
//! The token entry is read and written independently of the snapshot so that
//! older clients that only know about `auth_token` keep working.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::{CoreError, CoreResult};
use crate::types::Credential;

/// Storage key for the bearer token.
pub const TOKEN_KEY: &str = "auth_token";

/// Storage key for the combined session snapshot.
pub const SESSION_KEY: &str = "auth-storage";

// =============================================================================
// Storage trait
// =============================================================================

/// A durable string key/value store.
pub trait Storage: Send + Sync + fmt::Debug {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> CoreResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> CoreResult<()>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> CoreResult<()>;
}

/// Shared handle to a storage backend.
pub type SharedStorage = Arc<dyn Storage>;

// =============================================================================
// MemoryStorage
// =============================================================================

/// In-memory storage. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store behind a shared handle.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Returns the number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> CoreResult<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        self.entries.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> CoreResult<()> {
        self.entries.write().remove(key);
        Ok(())
    }
}

// =============================================================================
// FileStorage
// =============================================================================

/// File-backed storage: one file per key inside a directory.
///
/// Writes go to a uniquely named temporary sibling first and are renamed
/// into place, so a crash never leaves a half-written entry behind and
/// concurrent writers never share a temporary file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Opens (and creates if needed) a storage directory.
    pub fn open(dir: impl Into<PathBuf>) -> CoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| CoreError::storage("<root>", &dir, e))?;
        debug!(dir = %dir.display(), "Opened file storage");
        Ok(Self { dir })
    }

    /// Returns the storage directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> CoreResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(CoreError::invalid_key(key));
        }
        Ok(self.dir.join(key))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> CoreResult<Option<String>> {
        let path = self.entry_path(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CoreError::storage(key, path, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        let path = self.entry_path(key)?;
        let mut tmp =
            NamedTempFile::new_in(&self.dir).map_err(|e| CoreError::storage(key, &self.dir, e))?;
        tmp.write_all(value.as_bytes())
            .map_err(|e| CoreError::storage(key, tmp.path(), e))?;
        tmp.persist(&path)
            .map(|_| ())
            .map_err(|e| CoreError::storage(key, &path, e.error))
    }

    fn remove(&self, key: &str) -> CoreResult<()> {
        let path = self.entry_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CoreError::storage(key, path, e)),
        }
    }
}

// =============================================================================
// CredentialStore
// =============================================================================

/// The credential storage primitive shared by the session store and the
/// transport.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    storage: SharedStorage,
}

impl CredentialStore {
    /// Creates a credential store over the given storage.
    pub fn new(storage: SharedStorage) -> Self {
        Self { storage }
    }

    /// Returns the stored credential.
    ///
    /// Unreadable or empty entries are reported as absent.
    pub fn get(&self) -> Option<Credential> {
        match self.storage.get(TOKEN_KEY) {
            Ok(Some(token)) => Credential::new(token).ok(),
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Failed to read stored credential");
                None
            }
        }
    }

    /// Stores a credential.
    pub fn set(&self, credential: &Credential) -> CoreResult<()> {
        self.storage.set(TOKEN_KEY, credential.as_str())
    }

    /// Removes the stored credential.
    pub fn clear(&self) -> CoreResult<()> {
        self.storage.remove(TOKEN_KEY)
    }

    /// Returns the underlying storage handle.
    pub fn storage(&self) -> &SharedStorage {
        &self.storage
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_roundtrip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("k").unwrap(), None);

        storage.set("k", "v").unwrap();
        assert_eq!(storage.get("k").unwrap(), Some("v".to_string()));

        storage.remove("k").unwrap();
        storage.remove("k").unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn test_file_storage_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path().join("nested")).unwrap();

        storage.set(SESSION_KEY, "{}").unwrap();
        assert_eq!(storage.get(SESSION_KEY).unwrap(), Some("{}".to_string()));

        // A second handle sees the same data.
        let other = FileStorage::open(storage.dir()).unwrap();
        assert_eq!(other.get(SESSION_KEY).unwrap(), Some("{}".to_string()));

        storage.remove(SESSION_KEY).unwrap();
        assert_eq!(other.get(SESSION_KEY).unwrap(), None);
    }

    #[test]
    fn test_file_storage_concurrent_writers() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Arc::new(FileStorage::open(dir.path()).unwrap());
        let values: Vec<String> = (0..8).map(|i| format!("{{\"writer\":{i}}}")).collect();

        let handles: Vec<_> = values
            .iter()
            .cloned()
            .map(|value| {
                let storage = storage.clone();
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        storage.set(SESSION_KEY, &value).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let stored = storage.get(SESSION_KEY).unwrap().unwrap();
        assert!(values.contains(&stored), "{stored}");

        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from(SESSION_KEY)]);
    }

    #[test]
    fn test_file_storage_rejects_path_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();

        assert!(matches!(storage.set("../escape", "x"), Err(CoreError::InvalidKey { .. })));
        assert!(matches!(storage.get(".hidden"), Err(CoreError::InvalidKey { .. })));
        assert!(matches!(storage.get(""), Err(CoreError::InvalidKey { .. })));
    }

    #[test]
    fn test_credential_store() {
        let storage = MemoryStorage::shared();
        let creds = CredentialStore::new(storage.clone());
        assert!(creds.get().is_none());

        creds.set(&Credential::new("tok").unwrap()).unwrap();
        assert_eq!(creds.get().unwrap().as_str(), "tok");
        assert_eq!(storage.get(TOKEN_KEY).unwrap(), Some("tok".to_string()));

        creds.clear().unwrap();
        assert!(creds.get().is_none());
    }

    #[test]
    fn test_empty_token_entry_is_absent() {
        let storage = MemoryStorage::shared();
        storage.set(TOKEN_KEY, "").unwrap();
        assert!(CredentialStore::new(storage).get().is_none());
    }
}
