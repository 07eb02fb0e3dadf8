//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username is blank or too long.
    #[error("invalid username: {0}")]
    InvalidUsername(#[from] dynamic_pricing_core::UsernameError),

    /// Username is already registered.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Password too short.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
