// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Navigation abstraction.
//!
//! The transport redirects to the login surface on a rejected credential.
//! Where that redirect lands is up to the front end, so it is expressed as a
//! [`Navigator`] the front end provides.

use std::fmt;

use parking_lot::Mutex;
use tracing::debug;

/// The front end's location and navigation entry point.
pub trait Navigator: Send + Sync + fmt::Debug {
    /// Returns the current path.
    fn current_path(&self) -> String;

    /// Navigates to `path`.
    fn navigate(&self, path: &str);
}

/// A navigator that records every visited path.
#[derive(Debug)]
pub struct HistoryNavigator {
    history: Mutex<Vec<String>>,
}

impl HistoryNavigator {
    /// Creates a navigator positioned at `initial`.
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            history: Mutex::new(vec![initial.into()]),
        }
    }

    /// Returns every path visited so far, the initial one included.
    pub fn history(&self) -> Vec<String> {
        self.history.lock().clone()
    }

    /// Returns the paths navigated to after construction.
    pub fn navigations(&self) -> Vec<String> {
        self.history.lock().iter().skip(1).cloned().collect()
    }
}

impl Navigator for HistoryNavigator {
    fn current_path(&self) -> String {
        self.history.lock().last().cloned().unwrap_or_else(|| "/".to_string())
    }

    fn navigate(&self, path: &str) {
        debug!(path, "Navigating");
        self.history.lock().push(path.to_string());
    }
}
