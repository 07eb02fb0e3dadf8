//! `dp-cli` subcommands.

pub mod db;
pub mod export;
pub mod user;

use secrecy::ExposeSecret;
use sqlx::SqlitePool;

use dynamic_pricing_dashboard::{config::database_url_from_env, db as dashboard_db};

/// Connect to the dashboard database and make sure the schema exists.
async fn connect() -> Result<SqlitePool, dashboard_db::RepositoryError> {
    let database_url = database_url_from_env();
    tracing::info!(
        "Connecting to {}",
        redact_url(database_url.expose_secret())
    );

    let pool = dashboard_db::create_pool(&database_url).await?;
    dashboard_db::init_schema(&pool).await?;
    Ok(pool)
}

/// Strip query parameters before logging a connection string.
fn redact_url(url: &str) -> &str {
    url.split_once('?').map_or(url, |(path, _)| path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_url() {
        assert_eq!(redact_url("sqlite://users.db?mode=rwc"), "sqlite://users.db");
        assert_eq!(redact_url("sqlite::memory:"), "sqlite::memory:");
    }
}
