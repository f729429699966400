// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # warden-bin
//!
//! Command-line front end for the Warden admin console.
//!
//! This crate provides the `warden` binary, including:
//!
//! - CLI argument parsing with clap
//! - Session wiring against the configured storage directory
//! - Logging initialization
//! - Command implementations (login, users, scans, validate, etc.)
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         main.rs                              │
//! │                    (Entry Point)                             │
//! └─────────────────────────┬───────────────────────────────────┘
//!                           │
//!                    ┌──────▼──────┐
//!                    │    cli.rs   │
//!                    │ (Argument   │
//!                    │  Parsing)   │
//!                    └──────┬──────┘
//!                           │
//!               ┌───────────┼───────────┐
//!               ▼           ▼           ▼
//!        ┌──────────┐ ┌──────────┐ ┌──────────┐
//!        │ commands │ │ context  │ │ logging  │
//!        └────┬─────┘ └────┬─────┘ └──────────┘
//!             │            │
//!             └─────┬──────┘
//!            ┌──────▼──────┐
//!            │  warden-*   │
//!            │  (crates)   │
//!            └─────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Sign in, returning to the users page afterwards
//! echo "$PASSWORD" | warden login ops@example.com --password-stdin --from /dashboard/users
//!
//! # Who am I, and what may I do?
//! warden whoami
//! warden can read Logs
//!
//! # Browse a user's failed scans as JSON
//! warden scans 42 --status failed -o json
//!
//! # Validate configuration
//! warden validate -c /etc/warden/warden.yaml
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

// =============================================================================
// Modules
// =============================================================================

pub mod cli;
pub mod commands;
pub mod context;
pub mod error;
pub mod logging;

// =============================================================================
// Re-exports
// =============================================================================

pub use cli::{Cli, Commands};
pub use context::AppContext;
pub use error::{BinError, BinResult};
pub use logging::init_logging;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
