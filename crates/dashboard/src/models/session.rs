//! Session-related types.
//!
//! Types stored in the session for authentication and navigation state.

use serde::{Deserialize, Serialize};

use dynamic_pricing_core::{UserId, Username};

use super::user::User;

/// Session-stored user identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's database ID.
    pub id: UserId,
    /// User's login name.
    pub username: Username,
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
        }
    }
}

/// Session keys.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the page flag selecting the next rendered view.
    pub const PAGE: &str = "page";

    /// Set once the first request of a session has been handled.
    pub const PAGE_INITIALISED: &str = "page_initialised";

    /// Key for the in-memory chat transcript.
    pub const TRANSCRIPT: &str = "transcript";

    /// Key for the one-shot flash message.
    pub const FLASH: &str = "flash";
}
