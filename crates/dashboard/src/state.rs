//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::DashboardConfig;
use crate::groq::{GroqClient, GroqError};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the database pool and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: DashboardConfig,
    pool: SqlitePool,
    groq: Option<GroqClient>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The Groq client is only built when the configuration carries an API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the Groq client cannot be constructed.
    pub fn new(config: DashboardConfig, pool: SqlitePool) -> Result<Self, GroqError> {
        let groq = config.groq().map(GroqClient::new).transpose()?;

        if groq.is_none() {
            tracing::warn!("GROQ_API_KEY missing or rejected; chat assistant disabled");
        }

        Ok(Self {
            inner: Arc::new(AppStateInner { config, pool, groq }),
        })
    }

    /// Get a reference to the dashboard configuration.
    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }

    /// Get the Groq client, if the chat assistant is configured.
    #[must_use]
    pub fn groq(&self) -> Option<&GroqClient> {
        self.inner.groq.as_ref()
    }
}
