//! HTTP middleware for the dashboard.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request tracing)
//! 3. Session layer (tower-sessions with an in-memory store)

pub mod auth;
pub mod navigation;
pub mod session;

pub use auth::{OptionalAuth, RequireAuth, clear_current_user, set_current_user};
pub use navigation::{
    current_page, load_transcript, seed_page_once, set_flash, set_page, store_transcript,
    take_flash,
};
pub use session::create_session_layer;
