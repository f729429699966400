// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Warden Integration Tests
//!
//! Integration tests for the Warden admin console core, plus the shared
//! utilities they run on.
//!
//! ## Module Structure
//!
//! - [`common`]: Shared test utilities, fixtures, and helpers
//!   - `fixtures`: Accounts, identities and permission sets
//!   - `assertions`: Session and navigation assertions
//!   - `mocks`: An in-process mock of the console API
//!   - `harness`: A console wired to the mock API
//!
//! ## Running Tests
//!
//! ```bash
//! # Run all integration tests
//! cargo test -p warden-tests
//!
//! # Run specific test suite
//! cargo test -p warden-tests --test integration_session
//! cargo test -p warden-tests --test integration_client
//! cargo test -p warden-tests --test integration_config
//! ```
//!
//! ## Test Categories
//!
//! ### Session Tests (`integration_session.rs`)
//! - Capability derivation properties
//! - Persistence and rehydration
//! - Route guard and navigation gate
//!
//! ### Client Tests (`integration_client.rs`)
//! - Login, logout and 401 teardown against the mock API
//! - Endpoint clients and error messages
//! - Registration role defaults and scan pagination
//!
//! ### Config Tests (`integration_config.rs`)
//! - YAML, TOML and JSON loading
//! - Placeholders, environment overrides and validation
//!
//! ## Writing New Tests
//!
//! ```rust,ignore
//! use warden_tests::common::{fixtures::*, harness::TestHarness};
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let harness = TestHarness::start().await;
//!     harness.console.login(ADMIN_EMAIL, ADMIN_PASSWORD, None).await.unwrap();
//!     // ... test logic
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod common;

/// Re-export commonly used items for convenience.
pub mod prelude {
    pub use crate::common::assertions::*;
    pub use crate::common::fixtures::*;
    pub use crate::common::harness::*;
    pub use crate::common::mocks::*;
}
