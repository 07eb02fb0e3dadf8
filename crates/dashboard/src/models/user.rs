//! User domain model.

use serde::{Deserialize, Serialize};

use dynamic_pricing_core::{UserId, Username};

/// A registered dashboard account.
///
/// The password hash is deliberately absent; it only leaves the database
/// through [`crate::db::UserRepository::get_password_hash`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Database ID.
    pub id: UserId,
    /// Unique login name.
    pub username: Username,
}
