//! Error types for the Veritas client

use reqwest::StatusCode;
use thiserror::Error;

/// Result type alias for Veritas operations
pub type Result<T> = std::result::Result<T, Error>;

/// Message surfaced when a login is rejected without a server-provided detail
pub const GENERIC_AUTH_FAILURE: &str = "Authentication failed. Access denied.";

/// Top-level error type for the client and CLI
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Prompt(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Operation failed: {0}")]
    Other(String),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Prompt(err.to_string())
    }
}

impl Error {
    /// The API failure behind this error, if any
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Error::Api(err) => Some(err),
            _ => None,
        }
    }
}

/// Outcome classification for a failed API call.
///
/// The split that matters to callers is [`ApiError::has_response`]: the server
/// either answered (and rejected the call) or nothing came back at all.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    #[error("{}", status_message(*status, detail.as_deref()))]
    Status {
        status: StatusCode,
        detail: Option<String>,
    },

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("No response from API: {0}")]
    NoResponse(String),

    #[error("{0}")]
    AuthenticationFailed(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

fn status_message(status: StatusCode, detail: Option<&str>) -> String {
    match detail {
        Some(detail) => format!("Request failed ({}): {}", status, detail),
        None => format!("Request failed with status {}", status),
    }
}

impl ApiError {
    /// Whether the server produced any response for this failure
    pub fn has_response(&self) -> bool {
        matches!(
            self,
            ApiError::Status { .. } | ApiError::AuthenticationFailed(_) | ApiError::InvalidResponse(_)
        )
    }

    /// Whether the transport gave up waiting
    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Timeout(_))
    }

    /// HTTP status of a server rejection
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout(err.to_string())
        } else if err.is_connect() {
            ApiError::NoResponse("Failed to connect to API".to_string())
        } else if err.is_decode() {
            ApiError::InvalidResponse(err.to_string())
        } else if err.is_builder() {
            ApiError::InvalidRequest(err.to_string())
        } else {
            ApiError::NoResponse(err.to_string())
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
