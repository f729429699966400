// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Per-invocation wiring.
//!
//! Every command runs against a [`Console`] rehydrated from the configured
//! storage directory, so a session survives between invocations.

use std::io::BufRead;
use std::sync::Arc;

use anyhow::Context as _;
use tracing::debug;

use warden_client::{ClientConfig, Console, HistoryNavigator, Navigator, RetryPolicy};
use warden_config::{ApiConfig, WardenConfig};
use warden_core::{Action, FileStorage, GuardDecision, SessionStore, Subject};

use crate::cli::PasswordArgs;
use crate::error::{BinError, BinResult};

/// Builds the client configuration from the `api` section.
pub fn client_config(api: &ApiConfig) -> ClientConfig {
    let retry = RetryPolicy::default()
        .with_max_retries(api.read_retries)
        .with_base_delay(api.retry_delay());
    ClientConfig::new(api.base_url.clone())
        .with_timeout(api.timeout())
        .with_retry(retry)
}

/// Everything a command needs.
#[derive(Debug)]
pub struct AppContext {
    /// Loaded configuration.
    pub config: WardenConfig,
    /// Console over the persisted session.
    pub console: Console,
    /// Records where the console navigated.
    pub navigator: Arc<HistoryNavigator>,
}

impl AppContext {
    /// Opens the storage directory and rehydrates the session.
    pub fn open(config: WardenConfig) -> BinResult<Self> {
        let storage = FileStorage::open(&config.storage.dir)?;
        debug!(dir = %config.storage.dir.display(), "Opened session storage");

        let navigator = Arc::new(HistoryNavigator::new("/"));
        let session = Arc::new(SessionStore::rehydrate(Arc::new(storage)));
        let console = Console::with_session(client_config(&config.api), session, navigator.clone())?;

        Ok(Self {
            config,
            console,
            navigator,
        })
    }

    /// Returns the session.
    pub fn session(&self) -> &SessionStore {
        self.console.session()
    }

    /// Enters the page at `path` through the route guard.
    pub fn enter(&self, path: &str) -> BinResult<()> {
        match self.console.visit(path) {
            GuardDecision::Allow { .. } => Ok(()),
            GuardDecision::RedirectToLogin { from } => Err(BinError::NotAuthenticated { from }),
        }
    }

    /// Enters the page at `path` and checks one capability.
    pub fn enter_with(&self, path: &str, action: Action, subject: Subject) -> BinResult<()> {
        self.enter(path)?;
        if self.session().cannot(action, subject) {
            return Err(BinError::Forbidden { action, subject });
        }
        Ok(())
    }

    /// Returns `true` if the last request sent the console to the login page.
    pub fn was_redirected_to_login(&self) -> bool {
        warden_core::guard::is_login_path(&self.navigator.current_path())
    }
}

/// Resolves a password from the flag, the environment or stdin.
pub fn read_password(args: &PasswordArgs) -> BinResult<String> {
    if let Some(ref password) = args.password {
        return Ok(password.clone());
    }
    if !args.password_stdin {
        return Err(BinError::input(
            "A password is required: pass --password, set WARDEN_PASSWORD or use --password-stdin",
        ));
    }

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password from stdin")?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        return Err(BinError::input("Password read from stdin is empty"));
    }
    Ok(password)
}
