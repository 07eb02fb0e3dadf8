//! Domain models for the dashboard.

pub mod chat;
pub mod page;
pub mod session;
pub mod user;

pub use chat::{ChatExchange, Transcript, TranscriptEntry};
pub use page::{Flash, FlashKind, Page};
pub use session::{CurrentUser, keys as session_keys};
pub use user::User;
