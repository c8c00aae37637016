//! Consultation message repository.

use sqlx::PgPool;

use edureach_core::{MessageId, MessageStatus};

use super::{RepositoryError, expect_affected};
use crate::models::UserMessage;
use crate::models::message::NewMessage;

/// Repository for inbound consultation requests.
pub struct MessageRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MessageRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All messages, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<UserMessage>, RepositoryError> {
        let messages = sqlx::query_as::<_, UserMessage>(
            r"
            SELECT id, name, email, phone, message, status, created_at, updated_at
            FROM edureach.user_message
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(messages)
    }

    /// Store a new request. The status is always `unread`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, message: &NewMessage) -> Result<UserMessage, RepositoryError> {
        let created = sqlx::query_as::<_, UserMessage>(
            r"
            INSERT INTO edureach.user_message (name, email, phone, message, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, phone, message, status, created_at, updated_at
            ",
        )
        .bind(&message.name)
        .bind(&message.email)
        .bind(&message.phone)
        .bind(&message.message)
        .bind(MessageStatus::Unread)
        .fetch_one(self.pool)
        .await?;
        Ok(created)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the message does not exist.
    pub async fn set_status(
        &self,
        id: MessageId,
        status: MessageStatus,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE edureach.user_message SET status = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(status)
        .execute(self.pool)
        .await?;
        expect_affected(result.rows_affected())
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the message does not exist.
    pub async fn delete(&self, id: MessageId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM edureach.user_message WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        expect_affected(result.rows_affected())
    }

    /// Total and unread counts, for the dashboard.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn counts(&self) -> Result<(i64, i64), RepositoryError> {
        let counts: (i64, i64) = sqlx::query_as(
            r"
            SELECT COUNT(*), COUNT(*) FILTER (WHERE status = 'unread')
            FROM edureach.user_message
            ",
        )
        .fetch_one(self.pool)
        .await?;
        Ok(counts)
    }
}
