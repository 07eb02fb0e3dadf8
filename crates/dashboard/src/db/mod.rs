//! Database operations for the dashboard `SQLite` file.
//!
//! ## Tables
//!
//! - `users` - Accounts (unique username, Argon2 password hash)
//! - `chat_history` - One row per chat exchange (message and response)
//!
//! # Schema
//!
//! There is no migration framework. [`init_schema`] runs `CREATE TABLE IF NOT
//! EXISTS` for both tables at startup, and `dp-cli init-db` does the same.

pub mod chat;
pub mod users;

use std::str::FromStr;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;

pub use chat::ChatRepository;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (e.g., unique username).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

const CREATE_USERS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT UNIQUE NOT NULL,
    password_hash TEXT NOT NULL
)";

const CREATE_CHAT_HISTORY_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS chat_history (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER,
    message TEXT,
    response TEXT
)";

/// Create a `SQLite` connection pool.
///
/// The pool holds a single connection, so every statement goes through one
/// shared handle and the pool serialises access to it. An in-memory database
/// (`sqlite::memory:`) lives exactly as long as that connection.
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is malformed or the file cannot be opened.
pub async fn create_pool(database_url: &SecretString) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url.expose_secret())?;

    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

/// Create both tables if they do not exist yet.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if either statement fails.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), RepositoryError> {
    sqlx::query(CREATE_USERS_TABLE).execute(pool).await?;
    sqlx::query(CREATE_CHAT_HISTORY_TABLE).execute(pool).await?;
    Ok(())
}
