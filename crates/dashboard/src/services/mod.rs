//! Business logic services.
//!
//! # Services
//!
//! - `auth` - Username/password accounts (Argon2id hashes)
//! - `chat` - Relay between the chat page, Groq and `chat_history`

pub mod auth;
pub mod chat;

pub use auth::{AuthError, AuthService, MIN_PASSWORD_LENGTH, check_password_length};
pub use chat::{CHAT_UNAVAILABLE_MESSAGE, ChatError, ChatService};
