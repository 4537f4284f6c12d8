//! Client error types.

use thiserror::Error;

/// Errors returned by [`crate::UserApiClient`] operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Configured URL cannot be parsed
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Connection refused, timeout, or any other transport-level failure
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Server answered with a status the operation does not accept
    #[error("Unexpected status code: {status}")]
    UnexpectedStatus { status: u16 },

    /// Server answered 404 for a user id
    #[error("User with ID {id} not found")]
    NotFound { id: u64 },

    /// Response body is not the expected JSON shape
    #[error("Failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Health endpoint answered 200 but the status is not UP
    #[error("Service status is '{status}', expected 'UP'")]
    Unhealthy { status: String },
}

impl ClientError {
    /// True for the expected-absence case (404 on a user id).
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound { .. })
    }

    /// HTTP status attached to the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::UnexpectedStatus { status } => Some(*status),
            ClientError::NotFound { .. } => Some(404),
            ClientError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
