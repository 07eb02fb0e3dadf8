//! Authentication service.
//!
//! Username/password accounts. Passwords are stored as Argon2id PHC strings;
//! there are no tokens, expiry, rate limiting or lockout.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::SqlitePool;

use dynamic_pricing_core::Username;

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::User;

/// Minimum password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Authentication service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Register a new user.
    ///
    /// Only the username is validated here. Callers are expected to run
    /// [`check_password_length`] first.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidUsername` if the username is blank or too long.
    /// Returns `AuthError::UserAlreadyExists` if the username is taken.
    pub async fn create_user(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let username = Username::parse(username)?;
        let password_hash = hash_password(password)?;

        let user = self
            .users
            .create(&username, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        tracing::info!(user_id = %user.id, "User created");
        Ok(user)
    }

    /// Check a username/password pair.
    ///
    /// Returns `Ok(None)` for an unknown username and for a wrong password
    /// alike, so callers cannot tell the two apart.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the lookup fails.
    pub async fn check_user(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, AuthError> {
        let Ok(username) = Username::parse(username) else {
            return Ok(None);
        };

        let Some((user, password_hash)) = self.users.get_password_hash(&username).await? else {
            return Ok(None);
        };

        if verify_password(password, &password_hash) {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }
}

/// Check the minimum password length.
///
/// # Errors
///
/// Returns `AuthError::WeakPassword` if the password is shorter than
/// [`MIN_PASSWORD_LENGTH`] characters.
pub fn check_password_length(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored hash. A malformed hash never matches.
fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        tracing::warn!("Stored password hash is not a valid PHC string");
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}
