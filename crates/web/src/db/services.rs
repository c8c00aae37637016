//! Service repository.

use sqlx::PgPool;

use edureach_core::ServiceId;

use super::{RepositoryError, expect_affected};
use crate::models::Service;
use crate::models::content::ServiceInput;

/// Repository for the services offered on the landing page.
pub struct ServiceRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ServiceRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All services, newest first (back-office).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Service>, RepositoryError> {
        let services = sqlx::query_as::<_, Service>(
            r"
            SELECT id, title, description, icon, is_active, created_at, updated_at
            FROM edureach.service
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(services)
    }

    /// Active services in the order they were added (public site).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_active(&self) -> Result<Vec<Service>, RepositoryError> {
        let services = sqlx::query_as::<_, Service>(
            r"
            SELECT id, title, description, icon, is_active, created_at, updated_at
            FROM edureach.service
            WHERE is_active
            ORDER BY created_at ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(services)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ServiceId) -> Result<Option<Service>, RepositoryError> {
        let service = sqlx::query_as::<_, Service>(
            r"
            SELECT id, title, description, icon, is_active, created_at, updated_at
            FROM edureach.service
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(service)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_active(&self, id: ServiceId) -> Result<Option<Service>, RepositoryError> {
        Ok(self.get(id).await?.filter(|s| s.is_active))
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM edureach.service")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, input: &ServiceInput) -> Result<Service, RepositoryError> {
        let service = sqlx::query_as::<_, Service>(
            r"
            INSERT INTO edureach.service (title, description, icon, is_active)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, description, icon, is_active, created_at, updated_at
            ",
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.icon.name())
        .bind(input.is_active)
        .fetch_one(self.pool)
        .await?;
        Ok(service)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the service does not exist.
    pub async fn update(&self, id: ServiceId, input: &ServiceInput) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE edureach.service
            SET title = $2, description = $3, icon = $4, is_active = $5, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.icon.name())
        .bind(input.is_active)
        .execute(self.pool)
        .await?;
        expect_affected(result.rows_affected())
    }

    /// Flip `is_active`, leaving every other column unchanged.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the service does not exist.
    pub async fn toggle_active(&self, id: ServiceId) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE edureach.service SET is_active = NOT is_active, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(self.pool)
        .await?;
        expect_affected(result.rows_affected())
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the service does not exist.
    pub async fn delete(&self, id: ServiceId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM edureach.service WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        expect_affected(result.rows_affected())
    }
}
