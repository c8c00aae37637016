//! Program image repository.

use sqlx::PgPool;

use edureach_core::ProgramImageId;

use super::{RepositoryError, expect_affected};
use crate::models::ProgramImage;
use crate::models::content::ProgramImageInput;

/// Repository for the program gallery.
pub struct ProgramImageRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProgramImageRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<ProgramImage>, RepositoryError> {
        let images = sqlx::query_as::<_, ProgramImage>(
            r"
            SELECT id, title, description, image_url, is_active, created_at, updated_at
            FROM edureach.program_image
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(images)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_active(&self) -> Result<Vec<ProgramImage>, RepositoryError> {
        let images = sqlx::query_as::<_, ProgramImage>(
            r"
            SELECT id, title, description, image_url, is_active, created_at, updated_at
            FROM edureach.program_image
            WHERE is_active
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(images)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProgramImageId) -> Result<Option<ProgramImage>, RepositoryError> {
        let image = sqlx::query_as::<_, ProgramImage>(
            r"
            SELECT id, title, description, image_url, is_active, created_at, updated_at
            FROM edureach.program_image
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(image)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM edureach.program_image")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, input: &ProgramImageInput) -> Result<ProgramImage, RepositoryError> {
        let image = sqlx::query_as::<_, ProgramImage>(
            r"
            INSERT INTO edureach.program_image (title, description, image_url, is_active)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, description, image_url, is_active, created_at, updated_at
            ",
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.image_url)
        .bind(input.is_active)
        .fetch_one(self.pool)
        .await?;
        Ok(image)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the image does not exist.
    pub async fn update(
        &self,
        id: ProgramImageId,
        input: &ProgramImageInput,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE edureach.program_image
            SET title = $2, description = $3, image_url = $4, is_active = $5, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.image_url)
        .bind(input.is_active)
        .execute(self.pool)
        .await?;
        expect_affected(result.rows_affected())
    }

    /// Flip `is_active`, leaving every other column unchanged.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the image does not exist.
    pub async fn toggle_active(&self, id: ProgramImageId) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE edureach.program_image
            SET is_active = NOT is_active, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id)
        .execute(self.pool)
        .await?;
        expect_affected(result.rows_affected())
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the image does not exist.
    pub async fn delete(&self, id: ProgramImageId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM edureach.program_image WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        expect_affected(result.rows_affected())
    }
}
