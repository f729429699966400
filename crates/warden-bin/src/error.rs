// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Error types for the Warden binary.

use thiserror::Error;

use warden_client::ClientError;
use warden_core::{Action, Subject};

/// Result type alias for warden-bin operations.
pub type BinResult<T> = Result<T, BinError>;

/// Errors that can occur in the Warden binary.
#[derive(Debug, Error)]
pub enum BinError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// No session; the operator has to sign in first.
    #[error("Not signed in. Run `warden login <email> --from {from}` first")]
    NotAuthenticated {
        /// The page the command stands for.
        from: String,
    },

    /// The session lacks the capability a command needs.
    #[error("Not permitted: {action} on {subject}")]
    Forbidden {
        /// Required action.
        action: Action,
        /// Required subject.
        subject: Subject,
    },

    /// An API request failed; `message` is what the operator sees.
    #[error("{message}")]
    Request {
        /// Operator-facing message.
        message: String,
        /// The client error.
        #[source]
        source: ClientError,
    },

    /// Invalid command input.
    #[error("Invalid input: {0}")]
    Input(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(String),

    /// Config parsing error.
    #[error("Config error: {0}")]
    Config(#[from] warden_config::ConfigError),

    /// Client error.
    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    /// Core error.
    #[error("Session error: {0}")]
    Core(#[from] warden_core::CoreError),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        /// The context description.
        context: String,
        /// The underlying error.
        #[source]
        source: Box<BinError>,
    },
}

impl BinError {
    /// Creates a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Creates an input error.
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    /// Creates an I/O error.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// Wraps a failed request, using `fallback` when the server sent no
    /// message.
    pub fn request(source: ClientError, fallback: &str) -> Self {
        Self::Request {
            message: source.display_message(fallback),
            source,
        }
    }

    /// Adds context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Returns the client error behind this error, if any.
    pub fn client_error(&self) -> Option<&ClientError> {
        match self {
            Self::Request { source, .. } => Some(source),
            Self::Client(e) => Some(e),
            Self::WithContext { source, .. } => source.client_error(),
            _ => None,
        }
    }

    /// Returns the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Configuration(_) | Self::Config(_) => 1,
            Self::NotAuthenticated { .. } => 2,
            Self::Forbidden { .. } => 3,
            Self::Request { source, .. } | Self::Client(source) => {
                if source.is_unauthorized() {
                    2
                } else {
                    4
                }
            }
            Self::Input(_) => 5,
            Self::Io(_) => 6,
            Self::Core(_) => 7,
            Self::WithContext { source, .. } => source.exit_code(),
        }
    }
}

impl From<std::io::Error> for BinError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<anyhow::Error> for BinError {
    fn from(err: anyhow::Error) -> Self {
        Self::Io(format!("{err:#}"))
    }
}

impl From<serde_json::Error> for BinError {
    fn from(err: serde_json::Error) -> Self {
        Self::Io(format!("Failed to render output: {err}"))
    }
}

// =============================================================================
// Error Reporting
// =============================================================================

/// Reports an error with appropriate formatting.
pub fn report_error(error: &BinError) {
    eprintln!("Error: {}", error);

    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        eprintln!("  Caused by: {}", cause);
        source = cause.source();
    }

    if error.client_error().is_some_and(ClientError::is_unauthorized) {
        eprintln!("Session expired or rejected. Run `warden login <email>` to sign in again.");
    }
}

/// Reports an error and exits with the appropriate code.
pub fn report_error_and_exit(error: BinError) -> ! {
    report_error(&error);
    std::process::exit(error.exit_code())
}

// =============================================================================
// Tests
// =============================================================================
