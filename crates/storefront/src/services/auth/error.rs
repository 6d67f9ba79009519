//! Authentication error types.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No record matches the submitted email and password.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Signup password and confirmation differ.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// A record with this email already exists.
    #[error("email already registered")]
    EmailTaken,

    /// Reading or writing local storage failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// A persisted value could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
