//! Error types for spotiweb.
//!
//! Two layers exist. [`ApiError`] describes why a *single* request against the
//! Spotify Web API failed; the retry loop inspects it to decide whether a token
//! refresh is needed. [`Error`] is what operations hand back to the HTTP layer
//! once retries are exhausted, and it knows which status code to surface.

use reqwest::StatusCode;
use thiserror::Error;

/// Failure of one outbound request.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Spotify answered with a non-success status.
    #[error("{status}: {message}")]
    Status { status: StatusCode, message: String },

    /// Network or protocol failure before a status was received.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Response had no body where one was required.
    #[error("empty response body")]
    EmptyBody,
}

impl ApiError {
    /// Builds a status error from a Spotify error body.
    ///
    /// The Web API answers `{"error": {"status", "message"}}` while the accounts
    /// service answers `{"error", "error_description"}`; both are understood and
    /// anything else is kept verbatim.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|json| {
                json["error"]["message"]
                    .as_str()
                    .or_else(|| json["error_description"].as_str())
                    .or_else(|| json["error"].as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| body.to_string());

        ApiError::Status { status, message }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// True when the access token is no longer accepted.
    pub fn is_token_expired(&self) -> bool {
        match self {
            ApiError::Status { status, message } => {
                *status == StatusCode::UNAUTHORIZED || message.contains("expired")
            }
            ApiError::Transport(e) => e.status() == Some(StatusCode::UNAUTHORIZED),
            _ => false,
        }
    }
}

/// Errors surfaced by spotiweb operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or malformed input from the caller.
    #[error("{0}")]
    Validation(String),

    /// Credentials could not be used or renewed.
    #[error("{operation}: authentication failed: {source}")]
    Auth {
        operation: &'static str,
        #[source]
        source: ApiError,
    },

    /// A Spotify call failed after all retries.
    #[error("{operation}: {source}")]
    Vendor {
        operation: &'static str,
        #[source]
        source: ApiError,
    },

    /// A referenced entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Required configuration is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Status code the HTTP layer should answer with.
    pub fn status(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Auth { source, .. } | Error::Vendor { source, .. } => source
                .status()
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Result type for spotiweb operations.
pub type Result<T> = std::result::Result<T, Error>;
