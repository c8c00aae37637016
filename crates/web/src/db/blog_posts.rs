//! Blog post repository.

use sqlx::PgPool;

use edureach_core::BlogPostId;

use super::{RepositoryError, expect_affected};
use crate::models::BlogPost;
use crate::models::content::BlogPostInput;

/// Number of posts shown in the landing page blog section.
pub const LATEST_POSTS_LIMIT: i64 = 6;

/// Repository for blog posts.
pub struct BlogPostRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> BlogPostRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All posts, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<BlogPost>, RepositoryError> {
        let posts = sqlx::query_as::<_, BlogPost>(
            r"
            SELECT id, title, description, content, category, video_url, thumbnail_url,
                   author_name, author_avatar, is_active, views, likes, created_at, updated_at
            FROM edureach.blog_post
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(posts)
    }

    /// The most recent active posts.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_latest_active(&self, limit: i64) -> Result<Vec<BlogPost>, RepositoryError> {
        let posts = sqlx::query_as::<_, BlogPost>(
            r"
            SELECT id, title, description, content, category, video_url, thumbnail_url,
                   author_name, author_avatar, is_active, views, likes, created_at, updated_at
            FROM edureach.blog_post
            WHERE is_active
            ORDER BY created_at DESC
            LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(self.pool)
        .await?;
        Ok(posts)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: BlogPostId) -> Result<Option<BlogPost>, RepositoryError> {
        let post = sqlx::query_as::<_, BlogPost>(
            r"
            SELECT id, title, description, content, category, video_url, thumbnail_url,
                   author_name, author_avatar, is_active, views, likes, created_at, updated_at
            FROM edureach.blog_post
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(post)
    }

    /// Fetch an active post for reading and count the view.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn record_view(&self, id: BlogPostId) -> Result<Option<BlogPost>, RepositoryError> {
        let post = sqlx::query_as::<_, BlogPost>(
            r"
            UPDATE edureach.blog_post
            SET views = views + 1
            WHERE id = $1 AND is_active
            RETURNING id, title, description, content, category, video_url, thumbnail_url,
                      author_name, author_avatar, is_active, views, likes, created_at, updated_at
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(post)
    }

    /// Count a like on an active post.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no active post has this ID.
    pub async fn record_like(&self, id: BlogPostId) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE edureach.blog_post SET likes = likes + 1 WHERE id = $1 AND is_active",
        )
        .bind(id)
        .execute(self.pool)
        .await?;
        expect_affected(result.rows_affected())
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, input: &BlogPostInput) -> Result<BlogPost, RepositoryError> {
        let post = sqlx::query_as::<_, BlogPost>(
            r"
            INSERT INTO edureach.blog_post
                (title, description, content, category, video_url, thumbnail_url,
                 author_name, author_avatar, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, title, description, content, category, video_url, thumbnail_url,
                      author_name, author_avatar, is_active, views, likes, created_at, updated_at
            ",
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.content)
        .bind(&input.category)
        .bind(&input.video_url)
        .bind(&input.thumbnail_url)
        .bind(&input.author_name)
        .bind(&input.author_avatar)
        .bind(input.is_active)
        .fetch_one(self.pool)
        .await?;
        Ok(post)
    }

    /// Update editable fields; view and like counters are left alone.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the post does not exist.
    pub async fn update(&self, id: BlogPostId, input: &BlogPostInput) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE edureach.blog_post
            SET title = $2, description = $3, content = $4, category = $5, video_url = $6,
                thumbnail_url = $7, author_name = $8, author_avatar = $9, is_active = $10,
                updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.content)
        .bind(&input.category)
        .bind(&input.video_url)
        .bind(&input.thumbnail_url)
        .bind(&input.author_name)
        .bind(&input.author_avatar)
        .bind(input.is_active)
        .execute(self.pool)
        .await?;
        expect_affected(result.rows_affected())
    }

    /// Flip `is_active`, leaving every other column unchanged.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the post does not exist.
    pub async fn toggle_active(&self, id: BlogPostId) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE edureach.blog_post SET is_active = NOT is_active, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(self.pool)
        .await?;
        expect_affected(result.rows_affected())
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the post does not exist.
    pub async fn delete(&self, id: BlogPostId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM edureach.blog_post WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        expect_affected(result.rows_affected())
    }
}
