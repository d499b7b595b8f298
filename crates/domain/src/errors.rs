//! Error types used throughout the client layer
//!
//! Every failure that leaves the HTTP layer is an [`ApiError`]. It has three
//! origins:
//! - the server answered with a non-2xx status (`status` = that code, `data`
//!   = the response body)
//! - the request left the process but no response came back (`status` = 0,
//!   fixed [`NETWORK_ERROR_MESSAGE`])
//! - the request could not be built or dispatched (`status` = 0, message of
//!   the underlying failure)

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::constants::{NETWORK_ERROR_MESSAGE, UNEXPECTED_ERROR_MESSAGE};

/// Normalized error returned by every rejected call
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("[{status}] {message}")]
pub struct ApiError {
    /// HTTP status, or 0 when no response was received
    pub status: u16,
    /// Human-readable message, never empty
    pub message: String,
    /// Raw response body for server-rejected calls
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Coarse classification derived from an [`ApiError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// 401 - the session token was rejected
    Unauthorized,
    /// 403
    Forbidden,
    /// 404
    NotFound,
    /// 5xx
    Server,
    /// Any other non-success status
    Client,
    /// Request sent, no response (timeout, DNS, connection reset)
    Unreachable,
    /// Request never left the process
    Unsendable,
}

impl ApiError {
    /// Error for a response received with a non-2xx status.
    pub fn server_rejected(status: u16, message: impl Into<String>, data: Option<Value>) -> Self {
        let message = non_empty(message.into());
        Self { status, message, data }
    }

    /// Error for a request that was sent without any response coming back.
    pub fn unreachable() -> Self {
        Self { status: 0, message: NETWORK_ERROR_MESSAGE.to_string(), data: None }
    }

    /// Error for a request that could not be constructed or dispatched.
    pub fn unsendable(message: impl Into<String>) -> Self {
        Self { status: 0, message: non_empty(message.into()), data: None }
    }

    /// Get the error category for this error
    ///
    /// The two status-0 categories are told apart by message only.
    pub fn category(&self) -> ApiErrorCategory {
        match self.status {
            0 if self.message == NETWORK_ERROR_MESSAGE => ApiErrorCategory::Unreachable,
            0 => ApiErrorCategory::Unsendable,
            401 => ApiErrorCategory::Unauthorized,
            403 => ApiErrorCategory::Forbidden,
            404 => ApiErrorCategory::NotFound,
            500..=599 => ApiErrorCategory::Server,
            _ => ApiErrorCategory::Client,
        }
    }

    /// Whether a response was received from the server
    pub fn has_response(&self) -> bool {
        self.status != 0
    }
}

fn non_empty(message: String) -> String {
    if message.trim().is_empty() {
        UNEXPECTED_ERROR_MESSAGE.to_string()
    } else {
        message
    }
}

/// Errors raised while loading client configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(String),

    #[error("Failed to read config file: {0}")]
    Io(String),

    #[error("Invalid {format} format: {message}")]
    Parse { format: &'static str, message: String },

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    #[error("Unknown channel: {0}")]
    UnknownChannel(String),
}

/// Result type alias for client-layer operations
pub type Result<T> = std::result::Result<T, ApiError>;
