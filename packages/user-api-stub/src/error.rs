//! Store error types.

use thiserror::Error;

/// User store operation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No user with this id
    #[error("User not found with id: {id}")]
    NotFound { id: u64 },

    /// Another user already owns the email
    #[error("User with email {email} already exists")]
    EmailConflict { email: String },

    /// Payload violates field constraints
    #[error("Validation failed: {0}")]
    Validation(String),
}
