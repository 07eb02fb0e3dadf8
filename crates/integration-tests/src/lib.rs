//! Integration tests for the dynamic pricing dashboard.
//!
//! Each test gets its own in-memory `SQLite` database and its own server on
//! an ephemeral port, driven by a cookie-keeping HTTP client.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p dynamic-pricing-integration-tests
//! ```

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use reqwest::{Client, Response, StatusCode, redirect::Policy};
use secrecy::SecretString;
use sqlx::SqlitePool;

use dynamic_pricing_dashboard::{
    app::build_app,
    config::{DEFAULT_GROQ_MODEL, DashboardConfig, GroqConfig},
    db,
    state::AppState,
};

/// A running dashboard plus a client holding one browser session.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
    pub pool: SqlitePool,
}

impl TestContext {
    /// Start a dashboard with the chat assistant disabled.
    pub async fn new() -> Self {
        Self::start(None).await
    }

    /// Start a dashboard whose Groq client points at `groq_base_url`.
    pub async fn with_groq(groq_base_url: &str) -> Self {
        Self::start(Some(GroqConfig {
            api_key: SecretString::from("gsk_integration_test_key"),
            model: DEFAULT_GROQ_MODEL.to_string(),
            base_url: groq_base_url.to_string(),
        }))
        .await
    }

    async fn start(groq: Option<GroqConfig>) -> Self {
        let database_url = SecretString::from("sqlite::memory:");
        let pool = db::create_pool(&database_url)
            .await
            .expect("Failed to create database pool");
        db::init_schema(&pool)
            .await
            .expect("Failed to create schema");

        let listener = tokio::net::TcpListener::bind(SocketAddr::new(
            IpAddr::V4(Ipv4Addr::LOCALHOST),
            0,
        ))
        .await
        .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");

        let config = DashboardConfig {
            database_url,
            host: addr.ip(),
            port: addr.port(),
            base_url: format!("http://{addr}"),
            groq,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        };
        let state = AppState::new(config, pool.clone()).expect("Failed to build app state");
        let app = build_app(state);

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server error");
        });

        Self {
            client: new_client(),
            base_url: format!("http://{addr}"),
            pool,
        }
    }

    /// Replace the client, dropping its session cookie.
    pub fn new_session(&mut self) {
        self.client = new_client();
    }

    /// Absolute URL for a path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// GET a path without following redirects.
    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request failed")
    }

    /// Render `/` and return the HTML.
    pub async fn page(&self) -> String {
        let resp = self.get("/").await;
        assert_eq!(resp.status(), StatusCode::OK);
        resp.text().await.expect("Failed to read page")
    }

    /// POST a form, expect the usual redirect to `/`, then render `/`.
    pub async fn submit(&self, path: &str, form: &[(&str, &str)]) -> String {
        let resp = self
            .client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("POST request failed");

        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "POST {path}");
        assert_eq!(
            resp.headers()
                .get("location")
                .and_then(|v| v.to_str().ok()),
            Some("/")
        );
        self.page().await
    }

    /// Sign up a user and return the page rendered afterwards.
    pub async fn signup(&self, username: &str, password: &str) -> String {
        self.submit(
            "/auth/signup",
            &[("username", username), ("password", password)],
        )
        .await
    }

    /// Log in and return the page rendered afterwards.
    pub async fn login(&self, username: &str, password: &str) -> String {
        self.submit(
            "/auth/login",
            &[("username", username), ("password", password)],
        )
        .await
    }

    /// Switch to a page and return it.
    pub async fn navigate(&self, page: &str) -> String {
        self.submit("/navigate", &[("page", page)]).await
    }

    /// Sign up and log in in one go.
    pub async fn signed_in(&self, username: &str) -> String {
        self.signup(username, "correct-horse").await;
        self.login(username, "correct-horse").await
    }
}

fn new_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

/// Markers identifying which page was rendered.
pub mod markers {
    pub const LOGIN: &str = r#"action="/auth/login""#;
    pub const SIGNUP: &str = r#"action="/auth/signup""#;
    pub const OVERVIEW: &str = "Top-Selling Products";
    pub const CHATBOT: &str = r#"action="/chat/messages""#;
    pub const HISTORY: &str = "Chat History";
}
