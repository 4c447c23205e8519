//! API Error Types
//!
//! Errors produced while talking to the boop server's REST API.

use thiserror::Error;

/// Errors that can occur when calling the boop server
#[derive(Error, Debug)]
pub enum ApiError {
    /// Server could not be reached
    #[error("Boop server unavailable")]
    Unavailable,

    /// Request took longer than the configured timeout
    #[error("Request timeout")]
    Timeout,

    /// Any other transport failure
    #[error("Request failed: {0}")]
    Request(reqwest::Error),

    /// Session missing or expired, or credentials rejected
    #[error("Not logged in")]
    Unauthorized,

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Non-success status with the server's message
    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    /// Request rejected before it was sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// Response body did not match the expected shape
    #[error("Invalid response: {0}")]
    Decode(String),

    /// Bad server URL
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout
        } else if e.is_connect() {
            ApiError::Unavailable
        } else {
            ApiError::Request(e)
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
