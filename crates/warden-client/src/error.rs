// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Client error types.
//!
//! HTTP failures are classified by status code. The server's `message` field
//! is kept verbatim so callers can surface it; when the server sent none the
//! caller supplies an operation-specific fallback.

use std::fmt;

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

// =============================================================================
// ErrorBody
// =============================================================================

/// Error body returned by the API: `{ message, errorCode? }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Human-readable message.
    #[serde(default)]
    pub message: Option<String>,
    /// Machine-readable error code.
    #[serde(default)]
    pub error_code: Option<String>,
}

impl ErrorBody {
    /// Parses an error body, returning `None` if it is not the expected shape.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        serde_json::from_slice(bytes).ok()
    }
}

// =============================================================================
// ApiFailure
// =============================================================================

/// Details of a non-success HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFailure {
    /// HTTP status code.
    pub status: u16,
    /// The server's message, if it sent one.
    pub message: Option<String>,
    /// The server's error code, if it sent one.
    pub error_code: Option<String>,
}

impl ApiFailure {
    /// Creates a failure from a status and an optional parsed body.
    pub fn new(status: StatusCode, body: Option<ErrorBody>) -> Self {
        let body = body.unwrap_or_default();
        Self {
            status: status.as_u16(),
            message: body.message.filter(|m| !m.trim().is_empty()),
            error_code: body.error_code,
        }
    }
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => f.write_str(message),
            None => {
                let reason = StatusCode::from_u16(self.status)
                    .ok()
                    .and_then(|s| s.canonical_reason())
                    .unwrap_or("Unknown status");
                write!(f, "{} {}", self.status, reason)
            }
        }
    }
}

// =============================================================================
// ClientError
// =============================================================================

/// Errors returned by the API client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// 401. The session has already been torn down when this is returned.
    #[error("Unauthorized: {0}")]
    Unauthorized(ApiFailure),

    /// 400 or 422.
    #[error("Validation failed: {0}")]
    Validation(ApiFailure),

    /// 403.
    #[error("Forbidden: {0}")]
    Forbidden(ApiFailure),

    /// 404.
    #[error("Not found: {0}")]
    NotFound(ApiFailure),

    /// 409.
    #[error("Conflict: {0}")]
    Conflict(ApiFailure),

    /// Any other non-success status below 500.
    #[error("Request rejected: {0}")]
    Rejected(ApiFailure),

    /// 5xx.
    #[error("Server error: {0}")]
    Server(ApiFailure),

    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The response body did not have the expected shape.
    #[error("Failed to decode response from {endpoint}: {source}")]
    Decode {
        /// Endpoint path.
        endpoint: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The request was refused before it was sent.
    #[error("{0}")]
    InvalidRequest(String),

    /// Local session or storage failure.
    #[error("Session error: {0}")]
    Core(#[from] warden_core::CoreError),
}

impl ClientError {
    /// Classifies a non-success response.
    pub fn from_status(status: StatusCode, body: Option<ErrorBody>) -> Self {
        let failure = ApiFailure::new(status, body);
        match status.as_u16() {
            401 => Self::Unauthorized(failure),
            400 | 422 => Self::Validation(failure),
            403 => Self::Forbidden(failure),
            404 => Self::NotFound(failure),
            409 => Self::Conflict(failure),
            500..=599 => Self::Server(failure),
            _ => Self::Rejected(failure),
        }
    }

    /// Creates a decode error.
    pub fn decode(endpoint: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            endpoint: endpoint.into(),
            source,
        }
    }

    /// Creates an invalid request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Returns the HTTP failure details, if this error came from a response.
    pub fn failure(&self) -> Option<&ApiFailure> {
        match self {
            Self::Unauthorized(f)
            | Self::Validation(f)
            | Self::Forbidden(f)
            | Self::NotFound(f)
            | Self::Conflict(f)
            | Self::Rejected(f)
            | Self::Server(f) => Some(f),
            _ => None,
        }
    }

    /// Returns the HTTP status, if this error came from a response.
    pub fn status(&self) -> Option<u16> {
        self.failure().map(|f| f.status)
    }

    /// Returns the message the server sent, if any.
    pub fn server_message(&self) -> Option<&str> {
        self.failure().and_then(|f| f.message.as_deref())
    }

    /// Returns the text to show the operator.
    ///
    /// The server's message wins. HTTP failures without one use `fallback`;
    /// local failures describe themselves.
    pub fn display_message(&self, fallback: &str) -> String {
        match self.failure() {
            Some(failure) => failure
                .message
                .clone()
                .unwrap_or_else(|| fallback.to_string()),
            None => self.to_string(),
        }
    }

    /// Returns `true` for 401 responses.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    /// Returns `true` if repeating the request may succeed.
    ///
    /// Only transport failures qualify; HTTP status errors never do.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// Returns the error type as a string for logging.
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "unauthorized",
            Self::Validation(_) => "validation",
            Self::Forbidden(_) => "forbidden",
            Self::NotFound(_) => "not_found",
            Self::Conflict(_) => "conflict",
            Self::Rejected(_) => "rejected",
            Self::Server(_) => "server",
            Self::Network(_) => "network",
            Self::Decode { .. } => "decode",
            Self::InvalidRequest(_) => "invalid_request",
            Self::Core(_) => "core",
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
