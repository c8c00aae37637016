//! Testimonial repositories.
//!
//! Curated testimonials are managed from the back-office. User testimonials
//! are owned by the identity that wrote them and every query on them is
//! scoped by owner.

use sqlx::PgPool;

use edureach_core::{TestimonialId, UserId, UserTestimonialId};

use super::{RepositoryError, expect_affected};
use crate::models::content::TestimonialInput;
use crate::models::{Testimonial, UserTestimonial};

/// Repository for curated testimonials.
pub struct TestimonialRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TestimonialRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All testimonials, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Testimonial>, RepositoryError> {
        let rows = sqlx::query_as::<_, Testimonial>(
            r"
            SELECT id, name, role, content, rating, avatar_url, is_active, created_at, updated_at
            FROM edureach.testimonial
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    /// Active testimonials, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_active(&self) -> Result<Vec<Testimonial>, RepositoryError> {
        let rows = sqlx::query_as::<_, Testimonial>(
            r"
            SELECT id, name, role, content, rating, avatar_url, is_active, created_at, updated_at
            FROM edureach.testimonial
            WHERE is_active
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: TestimonialId) -> Result<Option<Testimonial>, RepositoryError> {
        let row = sqlx::query_as::<_, Testimonial>(
            r"
            SELECT id, name, role, content, rating, avatar_url, is_active, created_at, updated_at
            FROM edureach.testimonial
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(row)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM edureach.testimonial")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, input: &TestimonialInput) -> Result<Testimonial, RepositoryError> {
        let row = sqlx::query_as::<_, Testimonial>(
            r"
            INSERT INTO edureach.testimonial (name, role, content, rating, avatar_url, is_active)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, role, content, rating, avatar_url, is_active, created_at, updated_at
            ",
        )
        .bind(&input.name)
        .bind(&input.role)
        .bind(&input.content)
        .bind(input.rating.get())
        .bind(&input.avatar_url)
        .bind(input.is_active)
        .fetch_one(self.pool)
        .await?;
        Ok(row)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the testimonial does not exist.
    pub async fn update(
        &self,
        id: TestimonialId,
        input: &TestimonialInput,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE edureach.testimonial
            SET name = $2, role = $3, content = $4, rating = $5, avatar_url = $6,
                is_active = $7, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.role)
        .bind(&input.content)
        .bind(input.rating.get())
        .bind(&input.avatar_url)
        .bind(input.is_active)
        .execute(self.pool)
        .await?;
        expect_affected(result.rows_affected())
    }

    /// Flip `is_active`, leaving every other column unchanged.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the testimonial does not exist.
    pub async fn toggle_active(&self, id: TestimonialId) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE edureach.testimonial SET is_active = NOT is_active, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(self.pool)
        .await?;
        expect_affected(result.rows_affected())
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the testimonial does not exist.
    pub async fn delete(&self, id: TestimonialId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM edureach.testimonial WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        expect_affected(result.rows_affected())
    }
}

/// Repository for testimonials written by signed-in users.
pub struct UserTestimonialRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserTestimonialRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Active user testimonials from every user, newest first (public site).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_active(&self) -> Result<Vec<UserTestimonial>, RepositoryError> {
        let rows = sqlx::query_as::<_, UserTestimonial>(
            r"
            SELECT id, user_id, name, role, content, rating, avatar_url, is_active,
                   created_at, updated_at
            FROM edureach.user_testimonial
            WHERE is_active
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    /// One user's testimonials, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<UserTestimonial>, RepositoryError> {
        let rows = sqlx::query_as::<_, UserTestimonial>(
            r"
            SELECT id, user_id, name, role, content, rating, avatar_url, is_active,
                   created_at, updated_at
            FROM edureach.user_testimonial
            WHERE user_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_for_user(
        &self,
        user_id: UserId,
        id: UserTestimonialId,
    ) -> Result<Option<UserTestimonial>, RepositoryError> {
        let row = sqlx::query_as::<_, UserTestimonial>(
            r"
            SELECT id, user_id, name, role, content, rating, avatar_url, is_active,
                   created_at, updated_at
            FROM edureach.user_testimonial
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;
        Ok(row)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        user_id: UserId,
        input: &TestimonialInput,
    ) -> Result<UserTestimonial, RepositoryError> {
        let row = sqlx::query_as::<_, UserTestimonial>(
            r"
            INSERT INTO edureach.user_testimonial
                (user_id, name, role, content, rating, avatar_url, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_id, name, role, content, rating, avatar_url, is_active,
                      created_at, updated_at
            ",
        )
        .bind(user_id)
        .bind(&input.name)
        .bind(&input.role)
        .bind(&input.content)
        .bind(input.rating.get())
        .bind(&input.avatar_url)
        .bind(input.is_active)
        .fetch_one(self.pool)
        .await?;
        Ok(row)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user owns no testimonial with this ID.
    pub async fn update(
        &self,
        user_id: UserId,
        id: UserTestimonialId,
        input: &TestimonialInput,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE edureach.user_testimonial
            SET name = $3, role = $4, content = $5, rating = $6, avatar_url = $7,
                is_active = $8, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(id)
        .bind(user_id)
        .bind(&input.name)
        .bind(&input.role)
        .bind(&input.content)
        .bind(input.rating.get())
        .bind(&input.avatar_url)
        .bind(input.is_active)
        .execute(self.pool)
        .await?;
        expect_affected(result.rows_affected())
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user owns no testimonial with this ID.
    pub async fn toggle_active(
        &self,
        user_id: UserId,
        id: UserTestimonialId,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE edureach.user_testimonial
            SET is_active = NOT is_active, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(id)
        .bind(user_id)
        .execute(self.pool)
        .await?;
        expect_affected(result.rows_affected())
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user owns no testimonial with this ID.
    pub async fn delete(
        &self,
        user_id: UserId,
        id: UserTestimonialId,
    ) -> Result<(), RepositoryError> {
        let result =
            sqlx::query("DELETE FROM edureach.user_testimonial WHERE id = $1 AND user_id = $2")
                .bind(id)
                .bind(user_id)
                .execute(self.pool)
                .await?;
        expect_affected(result.rows_affected())
    }
}
