//! Database operations for chat history.

use sqlx::SqlitePool;

use dynamic_pricing_core::{ChatMessageId, UserId};

use super::RepositoryError;
use crate::models::ChatExchange;

/// Internal row type for `chat_history` queries.
///
/// The columns are nullable in the schema; a `NULL` text reads back as empty.
#[derive(Debug, sqlx::FromRow)]
struct ChatExchangeRow {
    id: i64,
    user_id: Option<i64>,
    message: Option<String>,
    response: Option<String>,
}

impl TryFrom<ChatExchangeRow> for ChatExchange {
    type Error = RepositoryError;

    fn try_from(row: ChatExchangeRow) -> Result<Self, Self::Error> {
        let user_id = row.user_id.ok_or_else(|| {
            RepositoryError::DataCorruption(format!("chat_history row {} has no user_id", row.id))
        })?;

        Ok(Self {
            id: ChatMessageId::new(row.id),
            user_id: UserId::new(user_id),
            message: row.message.unwrap_or_default(),
            response: row.response.unwrap_or_default(),
        })
    }
}

/// Repository for chat history database operations.
pub struct ChatRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ChatRepository<'a> {
    /// Create a new chat repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Store one exchange verbatim.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn save_exchange(
        &self,
        user_id: UserId,
        message: &str,
        response: &str,
    ) -> Result<ChatMessageId, RepositoryError> {
        let (id,): (i64,) = sqlx::query_as(
            r"
            INSERT INTO chat_history (user_id, message, response)
            VALUES (?, ?, ?)
            RETURNING id
            ",
        )
        .bind(user_id.as_i64())
        .bind(message)
        .bind(response)
        .fetch_one(self.pool)
        .await?;

        Ok(ChatMessageId::new(id))
    }

    /// All exchanges for a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn history(&self, user_id: UserId) -> Result<Vec<ChatExchange>, RepositoryError> {
        let rows = sqlx::query_as::<_, ChatExchangeRow>(
            r"
            SELECT id, user_id, message, response
            FROM chat_history
            WHERE user_id = ?
            ORDER BY id DESC
            ",
        )
        .bind(user_id.as_i64())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;

    use super::*;
    use crate::db::{create_pool, init_schema};

    #[tokio::test]
    async fn test_history_is_newest_first_and_per_user() {
        let pool = create_pool(&SecretString::from("sqlite::memory:"))
            .await
            .unwrap();
        init_schema(&pool).await.unwrap();
        let repo = ChatRepository::new(&pool);

        let me = UserId::new(1);
        let other = UserId::new(2);

        repo.save_exchange(me, "first", "one").await.unwrap();
        repo.save_exchange(other, "not mine", "nope").await.unwrap();
        repo.save_exchange(me, "second", "two").await.unwrap();

        let history = repo.history(me).await.unwrap();
        let messages: Vec<&str> = history.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, ["second", "first"]);
        assert!(history.iter().all(|e| e.user_id == me));
        assert_eq!(history[0].response, "two");
    }

    #[tokio::test]
    async fn test_history_empty() {
        let pool = create_pool(&SecretString::from("sqlite::memory:"))
            .await
            .unwrap();
        init_schema(&pool).await.unwrap();

        let history = ChatRepository::new(&pool)
            .history(UserId::new(7))
            .await
            .unwrap();
        assert!(history.is_empty());
    }
}
