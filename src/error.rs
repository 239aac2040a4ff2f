//! Error types for the YCLIENTS client
//!
//! Every public call returns `Result<T, Error>`. A call either yields the
//! decoded response or exactly one of the variants below; nothing is retried
//! or swallowed inside the crate.

use crate::types::{JsonValue, Method};
use thiserror::Error;

/// The main error type for the client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Pre-network Errors
    // ============================================================================
    #[error("Missing credentials: {message}")]
    MissingCredentials { message: String },

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Request limit of {limit} requests exceeded")]
    RequestLimitExceeded { limit: u64 },

    #[error("Request cancelled: {method} {path}")]
    Cancelled { method: Method, path: String },

    // ============================================================================
    // Exchange Errors
    // ============================================================================
    #[error("Transport error on {method} {path}: {source}")]
    Transport {
        method: Method,
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Malformed response (HTTP {status}) on {method} {path}: {source}")]
    MalformedResponse {
        method: Method,
        path: String,
        status: u16,
        body: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("API error (HTTP {status}) on {method} {path}: {}", api_message(.body).unwrap_or("no message"))]
    Api {
        method: Method,
        path: String,
        status: u16,
        body: JsonValue,
    },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a missing credentials error
    pub fn missing_credentials(message: impl Into<String>) -> Self {
        Self::MissingCredentials {
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// HTTP status attached to the error, if a response was received
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } | Error::MalformedResponse { status, .. } => Some(*status),
            Error::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Server-provided error message for `Api` errors
    pub fn api_message(&self) -> Option<&str> {
        match self {
            Error::Api { body, .. } => api_message(body),
            _ => None,
        }
    }

    /// Whether a caller-side retry may succeed.
    ///
    /// Advisory only: the client never retries on its own.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Transport { .. } => true,
            Error::Api { status, .. } => is_retryable_status(*status),
            _ => false,
        }
    }
}

/// Check if an HTTP status code is retryable
fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// Pull a human-readable message out of an error body.
///
/// Looks at `meta.message`, then `errors.message`, then the first string
/// inside `errors`, then a top-level `message`.
pub(crate) fn api_message(body: &JsonValue) -> Option<&str> {
    if let Some(msg) = body.pointer("/meta/message").and_then(JsonValue::as_str) {
        return Some(msg);
    }

    match body.get("errors") {
        Some(JsonValue::Object(errors)) => {
            if let Some(msg) = errors.get("message").and_then(JsonValue::as_str) {
                return Some(msg);
            }
            if let Some(msg) = errors.values().find_map(first_string) {
                return Some(msg);
            }
        }
        Some(other) => {
            if let Some(msg) = first_string(other) {
                return Some(msg);
            }
        }
        None => {}
    }

    body.get("message").and_then(JsonValue::as_str)
}

fn first_string(value: &JsonValue) -> Option<&str> {
    match value {
        JsonValue::String(s) => Some(s),
        JsonValue::Array(items) => items.iter().find_map(first_string),
        _ => None,
    }
}

/// Result type alias for the client
pub type Result<T> = std::result::Result<T, Error>;
