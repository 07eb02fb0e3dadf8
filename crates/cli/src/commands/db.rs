//! Schema management.
//!
//! # Usage
//!
//! ```bash
//! dp-cli init-db
//! ```

use dynamic_pricing_dashboard::db::{RepositoryError, UserRepository};

/// Create the `users` and `chat_history` tables if they do not exist.
///
/// # Errors
///
/// Returns `RepositoryError` if the database cannot be opened or the schema
/// cannot be created.
pub async fn init() -> Result<(), RepositoryError> {
    let pool = super::connect().await?;
    let users = UserRepository::new(&pool).count().await?;

    tracing::info!("Schema ready ({users} users)");
    Ok(())
}
