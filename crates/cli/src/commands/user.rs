//! User management commands.
//!
//! # Usage
//!
//! ```bash
//! dp-cli user create --username alice --password 's3cret!'
//! ```
//!
//! # Environment Variables
//!
//! - `DASHBOARD_DATABASE_URL` - `SQLite` connection string (falls back to
//!   `DATABASE_URL`, then `sqlite://users.db?mode=rwc`)

use thiserror::Error;

use dynamic_pricing_core::UserId;
use dynamic_pricing_dashboard::db::RepositoryError;
use dynamic_pricing_dashboard::services::{AuthError, AuthService, check_password_length};

/// Errors that can occur during user operations.
#[derive(Debug, Error)]
pub enum UserError {
    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Rejected by the same checks as the signup form.
    #[error("{0}")]
    Auth(#[from] AuthError),
}

/// Create a dashboard user.
///
/// Applies the signup checks: non-empty fields, minimum password length,
/// unique username.
///
/// # Returns
///
/// The ID of the created user.
///
/// # Errors
///
/// Returns `UserError::Auth` if a check fails or the username is taken.
pub async fn create(username: &str, password: &str) -> Result<UserId, UserError> {
    check_password_length(password)?;

    let pool = super::connect().await?;
    let user = AuthService::new(&pool)
        .create_user(username, password)
        .await?;

    tracing::info!(
        "User created successfully! ID: {}, Username: {}",
        user.id,
        user.username
    );
    Ok(user.id)
}
