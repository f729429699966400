// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Typed endpoint clients.
//!
//! Each group borrows the [`ApiClient`](crate::ApiClient) and maps one API
//! route to one method.

mod auth;
mod dashboard;
mod logs;
mod roles;

pub use auth::AuthApi;
pub use dashboard::DashboardApi;
pub use logs::LogsApi;
pub use roles::RolesApi;
