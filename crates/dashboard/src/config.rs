//! Dashboard configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `DASHBOARD_DATABASE_URL` - `SQLite` connection string (falls back to
//!   `DATABASE_URL`, then `sqlite://users.db?mode=rwc`)
//! - `DASHBOARD_HOST` - Bind address (default: 127.0.0.1)
//! - `DASHBOARD_PORT` - Listen port (default: 8501)
//! - `DASHBOARD_BASE_URL` - Public URL (default: `http://{host}:{port}`)
//! - `GROQ_API_KEY` - Groq API key (chat assistant is disabled without it)
//! - `GROQ_MODEL` - Model ID (default: llama3-8b-8192)
//! - `GROQ_BASE_URL` - API base URL (default: <https://api.groq.com/openai/v1>)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Traces sample rate (default: 0.1)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;
const DEFAULT_DATABASE_URL: &str = "sqlite://users.db?mode=rwc";
pub const DEFAULT_GROQ_MODEL: &str = "llama3-8b-8192";
pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Words that only show up in hand-written placeholder keys (case-insensitive,
/// matched against whole `-`/`_` separated segments)
const PLACEHOLDER_WORDS: &[&str] = &[
    "your",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Dashboard application configuration.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// `SQLite` database connection URL
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the dashboard
    pub base_url: String,
    /// Groq configuration (`None` disables the chat assistant)
    pub groq: Option<GroqConfig>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// Groq chat-completion API configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct GroqConfig {
    /// Groq API key
    pub api_key: SecretString,
    /// Model ID (e.g., llama3-8b-8192)
    pub model: String,
    /// Base URL of the OpenAI-compatible API
    pub base_url: String,
}

impl std::fmt::Debug for GroqConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroqConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl GroqConfig {
    /// Load Groq configuration from environment.
    ///
    /// Returns `None` if `GROQ_API_KEY` is not set (chat disabled).
    fn from_env() -> Option<Self> {
        Self::from_key(get_optional_env("GROQ_API_KEY"))
    }

    /// Build the configuration around an API key.
    ///
    /// A key that fails validation disables the chat assistant the same way a
    /// missing one does; the dashboard still starts.
    fn from_key(api_key: Option<String>) -> Option<Self> {
        let api_key = api_key?;
        // Runs before the subscriber exists; the state logs the disabled assistant
        validate_secret_strength(&api_key, "GROQ_API_KEY").ok()?;

        Some(Self {
            api_key: SecretString::from(api_key),
            model: get_env_or_default("GROQ_MODEL", DEFAULT_GROQ_MODEL),
            base_url: get_env_or_default("GROQ_BASE_URL", DEFAULT_GROQ_BASE_URL)
                .trim_end_matches('/')
                .to_owned(),
        })
    }
}

impl DashboardConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the host or port is malformed. An unusable
    /// Groq API key only disables the chat assistant.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("DASHBOARD_DATABASE_URL");
        let host = get_env_or_default("DASHBOARD_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("DASHBOARD_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("DASHBOARD_PORT", "8501")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("DASHBOARD_PORT".to_string(), e.to_string()))?;
        let base_url = get_optional_env("DASHBOARD_BASE_URL")
            .unwrap_or_else(|| format!("http://{host}:{port}"));

        let groq = GroqConfig::from_env();
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(0.1);

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            groq,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Returns a reference to the Groq configuration, if available.
    ///
    /// Returns `None` if `GROQ_API_KEY` was not set or was rejected.
    #[must_use]
    pub const fn groq(&self) -> Option<&GroqConfig> {
        self.groq.as_ref()
    }

    /// Whether session cookies should carry the `Secure` attribute.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

/// Database URL alone, for tools that do not need the rest of the configuration.
///
/// Same lookup order as [`DashboardConfig::from_env`].
#[must_use]
pub fn database_url_from_env() -> SecretString {
    let _ = dotenvy::dotenv();
    get_database_url("DASHBOARD_DATABASE_URL")
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get database URL with fallback to generic `DATABASE_URL`, then the local file.
fn get_database_url(primary_key: &str) -> SecretString {
    let value = std::env::var(primary_key)
        .or_else(|_| std::env::var("DATABASE_URL"))
        .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
    SecretString::from(value)
}

/// Get an optional environment variable. Empty values count as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)]
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for segment in lower.split(['-', '_']) {
        if let Some(word) = PLACEHOLDER_WORDS.iter().find(|w| segment == **w) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{word}')"),
            ));
        }
    }

    // Real API keys are random; a low score means someone typed it by hand
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1})"
            ),
        ));
    }

    Ok(())
}
