// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # warden-client
//!
//! HTTP client for the Warden admin console API.
//!
//! This crate provides the credential-carrying transport, typed endpoint
//! clients and the [`Console`] facade that ties them to the session store.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use warden_client::{ClientConfig, Console, HistoryNavigator};
//! use warden_core::MemoryStorage;
//!
//! let nav = Arc::new(HistoryNavigator::new("/login"));
//! let console = Console::new(ClientConfig::default(), MemoryStorage::shared(), nav)?;
//! let destination = console.login("ops@example.com", "secret", Some("/dashboard/users")).await?;
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod client;
pub mod config;
pub mod console;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod navigator;
pub mod retry;
pub mod transport;

pub use client::{ApiClient, REQUEST_ID_HEADER};
pub use config::{ClientConfig, DEFAULT_TIMEOUT};
pub use console::{login_error_message, Console, Registration};
pub use endpoints::{AuthApi, DashboardApi, LogsApi, RolesApi};
pub use error::{ApiFailure, ClientError, ClientResult, ErrorBody};
pub use navigator::{HistoryNavigator, Navigator};
pub use retry::RetryPolicy;
pub use transport::{CredentialTransport, ResponseDisposition};

pub use reqwest::StatusCode;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
