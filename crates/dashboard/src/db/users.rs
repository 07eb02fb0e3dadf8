//! User repository for database operations.

use sqlx::SqlitePool;

use dynamic_pricing_core::{UserId, Username};

use super::RepositoryError;
use crate::models::User;

/// Internal row type for `users` queries.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let username = Username::parse(&row.username).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid username in database: {e}"))
        })?;

        Ok(Self {
            id: UserId::new(row.id),
            username,
        })
    }
}

/// Internal row type for credential lookups.
#[derive(Debug, sqlx::FromRow)]
struct UserCredentialRow {
    id: i64,
    username: String,
    password_hash: String,
}

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new user with an already-hashed password.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username is taken.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(
        &self,
        username: &Username,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            INSERT INTO users (username, password_hash)
            VALUES (?, ?)
            RETURNING id, username
            ",
        )
        .bind(username.as_str())
        .bind(password_hash)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("username already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        row.try_into()
    }

    /// Get a user and their password hash by username.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored username is invalid.
    pub async fn get_password_hash(
        &self,
        username: &Username,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, UserCredentialRow>(
            "SELECT id, username, password_hash FROM users WHERE username = ?",
        )
        .bind(username.as_str())
        .fetch_optional(self.pool)
        .await?;

        match row {
            Some(r) => {
                let user = User::try_from(UserRow {
                    id: r.id,
                    username: r.username,
                })?;
                Ok(Some((user, r.password_hash)))
            }
            None => Ok(None),
        }
    }

    /// Count registered users.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;

    use super::*;
    use crate::db::{create_pool, init_schema};

    async fn test_pool() -> SqlitePool {
        let pool = create_pool(&SecretString::from("sqlite::memory:"))
            .await
            .unwrap();
        init_schema(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn test_create_and_lookup() {
        let pool = test_pool().await;
        let repo = UserRepository::new(&pool);
        let alice = Username::parse("alice").unwrap();

        let user = repo.create(&alice, "hash-1").await.unwrap();
        assert_eq!(user.username, alice);

        let (found, hash) = repo.get_password_hash(&alice).await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert_eq!(hash, "hash-1");
    }

    #[tokio::test]
    async fn test_duplicate_username_is_conflict() {
        let pool = test_pool().await;
        let repo = UserRepository::new(&pool);
        let bob = Username::parse("bob").unwrap();

        repo.create(&bob, "hash-1").await.unwrap();
        let err = repo.create(&bob, "hash-2").await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));

        let (_, hash) = repo.get_password_hash(&bob).await.unwrap().unwrap();
        assert_eq!(hash, "hash-1");
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_unknown_username() {
        let pool = test_pool().await;
        let repo = UserRepository::new(&pool);
        let ghost = Username::parse("ghost").unwrap();

        assert!(repo.get_password_hash(&ghost).await.unwrap().is_none());
    }
}
