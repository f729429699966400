// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Test Harness
//!
//! A [`Console`] wired to a fresh [`MockApi`], in-memory storage and a
//! recording navigator.
//!
//! ## Design Principles
//!
//! - One mock API per test, so tests run in parallel
//! - Storage outlives the console, so rehydration can be exercised
//! - No retries, so transport failures surface immediately

use std::sync::Arc;

use warden_client::{ClientConfig, Console, HistoryNavigator, RetryPolicy};
use warden_core::{MemoryStorage, SharedStorage};

use super::init_test_logging;
use super::mocks::MockApi;

/// A console under test.
#[derive(Debug)]
pub struct TestHarness {
    /// The mock API.
    pub api: MockApi,
    /// Storage shared by every console the harness opens.
    pub storage: Arc<MemoryStorage>,
    /// Navigator of [`console`](Self::console).
    pub navigator: Arc<HistoryNavigator>,
    /// The console.
    pub console: Console,
}

impl TestHarness {
    /// Starts a mock API and a console positioned at `/`.
    pub async fn start() -> Self {
        Self::start_at("/").await
    }

    /// Starts a mock API and a console positioned at `path`.
    pub async fn start_at(path: &str) -> Self {
        init_test_logging();
        let api = MockApi::start().await;
        let storage = MemoryStorage::shared();
        let navigator = Arc::new(HistoryNavigator::new(path));
        let console = Console::new(
            Self::config_for(&api),
            storage.clone(),
            navigator.clone(),
        )
        .expect("Failed to build console");

        Self {
            api,
            storage,
            navigator,
            console,
        }
    }

    /// Client configuration pointing at `api`.
    pub fn config_for(api: &MockApi) -> ClientConfig {
        ClientConfig::new(api.base_url()).with_retry(RetryPolicy::none())
    }

    /// Returns the shared storage as a trait object.
    pub fn shared_storage(&self) -> SharedStorage {
        self.storage.clone()
    }

    /// Opens a second console over the same storage, as a restart would.
    pub fn reopen(&self, path: &str) -> (Console, Arc<HistoryNavigator>) {
        let navigator = Arc::new(HistoryNavigator::new(path));
        let console = Console::new(
            Self::config_for(&self.api),
            self.shared_storage(),
            navigator.clone(),
        )
        .expect("Failed to reopen console");
        (console, navigator)
    }

    /// Logs in, panicking on failure. Returns the destination.
    pub async fn login(&self, email: &str, password: &str) -> String {
        self.console
            .login(email, password, None)
            .await
            .unwrap_or_else(|e| panic!("login as {email} failed: {e}"))
    }
}
