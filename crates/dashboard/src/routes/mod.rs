//! HTTP route handlers for the dashboard.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Render the current page
//! POST /navigate               - Switch the page flag
//!
//! # Auth
//! POST /auth/login             - Username/password login
//! POST /auth/signup            - Create an account
//! POST /auth/logout            - Logout
//!
//! # Chat (Groq)
//! POST /chat/messages          - Send a chat message
//!
//! # Overview
//! POST /overview/upload        - Sales data upload (acknowledged only)
//! POST /overview/refresh       - Refresh predictions
//! GET  /export/csv             - Filtered products as CSV
//! GET  /export/xlsx            - Filtered products as a spreadsheet
//! ```
//!
//! Every form handler stores its outcome in the session (page flag, flash,
//! transcript) and redirects to `/`.

pub mod auth;
pub mod chat;
pub mod overview;
pub mod pages;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Build the dashboard router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::index))
        .route("/navigate", post(pages::navigate))
        .merge(auth::router())
        .merge(chat::router())
        .merge(overview::router())
}
