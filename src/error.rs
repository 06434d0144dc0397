//! Unified error types for the Zephyr Scale MCP Server.

use serde_json::{json, Value};
use thiserror::Error;

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable is not set")]
    MissingField(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// API request/response errors.
///
/// Every failure of the request executor ends up here, so callers only
/// need one check regardless of whether the upstream answered.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Request failed: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Failed to create HTTP client: {0}")]
    HttpClientInit(String),
}

impl ApiError {
    /// Upstream HTTP status, present only for HTTP-level failures.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The uniform error record `{error, status_code?}`.
    pub fn to_record(&self) -> Value {
        match self.status_code() {
            Some(status) => json!({ "error": self.to_string(), "status_code": status }),
            None => json!({ "error": self.to_string() }),
        }
    }
}

/// Errors surfaced by a single tool invocation.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Invalid JSON format for {field}")]
    InvalidJson { field: &'static str },

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Failed to render response: {0}")]
    Render(String),
}

impl ToolError {
    /// True when the error was raised before any network activity.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            ToolError::InvalidJson { .. } | ToolError::Api(ApiError::UnsupportedMethod(_))
        )
    }
}
