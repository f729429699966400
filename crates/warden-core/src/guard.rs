// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Route table and route guard.
//!
//! The guard only looks at session presence. Which navigation entries and
//! actions a user may reach is decided by the capability set, not here.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::session::{AuthState, SessionSnapshot};

/// Path of the login surface.
pub const LOGIN_PATH: &str = "/login";

/// Path of the protected area's landing page.
pub const DASHBOARD_PATH: &str = "/dashboard";

// =============================================================================
// Route
// =============================================================================

/// Routes known to the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    /// Public login page.
    Login,
    /// Dashboard home.
    Home,
    /// User registration form.
    Register,
    /// User management table.
    Users,
    /// Scan-log browser.
    Logs,
}

impl Route {
    /// Returns the canonical path of the route.
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => LOGIN_PATH,
            Route::Home => DASHBOARD_PATH,
            Route::Register => "/dashboard/register",
            Route::Users => "/dashboard/users",
            Route::Logs => "/dashboard/logs",
        }
    }

    /// Resolves a requested path to a route.
    ///
    /// Query strings, fragments and trailing slashes are ignored. `/` and any
    /// unknown path fall back to the dashboard home.
    pub fn resolve(path: &str) -> Route {
        match normalize_path(path).as_str() {
            LOGIN_PATH => Route::Login,
            "/dashboard/register" => Route::Register,
            "/dashboard/users" => Route::Users,
            "/dashboard/logs" => Route::Logs,
            _ => Route::Home,
        }
    }

    /// Returns `true` if the route requires a session.
    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Login)
    }

    /// Returns all routes.
    pub fn all() -> &'static [Route] {
        &[
            Route::Login,
            Route::Home,
            Route::Register,
            Route::Users,
            Route::Logs,
        ]
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Strips query, fragment and trailing slashes from a path.
pub fn normalize_path(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Returns the query string of `path`, without the fragment.
fn query_of(path: &str) -> Option<&str> {
    let before_fragment = path.split('#').next().unwrap_or_default();
    let (_, query) = before_fragment.split_once('?')?;
    (!query.is_empty()).then_some(query)
}

/// Returns the location to remember for `path` once resolved to `route`.
///
/// The query string is kept when `path` names `route` itself. Fallbacks to
/// the dashboard and fragments are dropped.
fn origin_of(path: &str, route: Route) -> String {
    match query_of(path) {
        Some(query) if normalize_path(path) == route.path() => format!("{}?{query}", route.path()),
        _ => route.path().to_string(),
    }
}

/// Returns `true` if `path` is the login surface.
pub fn is_login_path(path: &str) -> bool {
    normalize_path(path) == LOGIN_PATH
}

// =============================================================================
// Guard
// =============================================================================

/// Outcome of a guard check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum GuardDecision {
    /// Navigation may proceed to `route`.
    Allow {
        /// The resolved route.
        route: Route,
    },
    /// Navigation must go to the login page first.
    RedirectToLogin {
        /// The path to return to after a successful login.
        from: String,
    },
}

impl GuardDecision {
    /// Returns `true` if navigation is admitted.
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allow { .. })
    }
}

/// Decides whether `requested_path` may be shown for `session`.
///
/// Unknown paths resolve to the dashboard first, so the remembered return
/// location is always a real route. The query string of a known route is
/// remembered with it.
pub fn guard(session: &SessionSnapshot, requested_path: &str) -> GuardDecision {
    let route = Route::resolve(requested_path);

    match (route.is_protected(), session.auth_state()) {
        (false, _) | (true, AuthState::Authenticated) => GuardDecision::Allow { route },
        (true, AuthState::Unauthenticated) => GuardDecision::RedirectToLogin {
            from: origin_of(requested_path, route),
        },
    }
}

/// Returns where to go after a successful login.
pub fn post_login_destination(from: Option<&str>) -> String {
    match from {
        Some(path) => match Route::resolve(path) {
            route if route.is_protected() => origin_of(path, route),
            _ => DASHBOARD_PATH.to_string(),
        },
        None => DASHBOARD_PATH.to_string(),
    }
}

// =============================================================================
// Tests
// =============================================================================
