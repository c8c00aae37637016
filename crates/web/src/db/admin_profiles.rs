//! Admin profile repository.

use sqlx::PgPool;

use edureach_core::{AdminProfileId, Email, UserId};

use super::{RepositoryError, expect_affected};
use crate::models::AdminProfile;
use crate::models::admin_profile::{AdminProfileUpdate, DEFAULT_PERMISSIONS, NewAdminProfile};

/// Repository for admin profile database operations.
pub struct AdminProfileRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AdminProfileRepository<'a> {
    /// Create a new admin profile repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get the admin profile that belongs to an identity.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_user_id(
        &self,
        user_id: UserId,
    ) -> Result<Option<AdminProfile>, RepositoryError> {
        let profile = sqlx::query_as::<_, AdminProfile>(
            r"
            SELECT id, user_id, name, email, avatar_url, is_super_admin, is_active,
                   permissions, force_password_change, last_login, created_at, updated_at
            FROM edureach.admin_profile
            WHERE user_id = $1
            ",
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(profile)
    }

    /// Get an admin profile by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(
        &self,
        id: AdminProfileId,
    ) -> Result<Option<AdminProfile>, RepositoryError> {
        let profile = sqlx::query_as::<_, AdminProfile>(
            r"
            SELECT id, user_id, name, email, avatar_url, is_super_admin, is_active,
                   permissions, force_password_change, last_login, created_at, updated_at
            FROM edureach.admin_profile
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(profile)
    }

    /// List all admin profiles, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<AdminProfile>, RepositoryError> {
        let profiles = sqlx::query_as::<_, AdminProfile>(
            r"
            SELECT id, user_id, name, email, avatar_url, is_super_admin, is_active,
                   permissions, force_password_change, last_login, created_at, updated_at
            FROM edureach.admin_profile
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(profiles)
    }

    /// Count admin profiles.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM edureach.admin_profile")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    /// Whether the super admin has been seeded.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn super_admin_exists(&self) -> Result<bool, RepositoryError> {
        let exists = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM edureach.admin_profile WHERE is_super_admin)",
        )
        .fetch_one(self.pool)
        .await?;
        Ok(exists)
    }

    /// Create an identity and its admin profile in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is taken or a second
    /// super admin is requested.
    pub async fn create_with_identity(
        &self,
        email: &Email,
        password_hash: &str,
        profile: &NewAdminProfile,
    ) -> Result<AdminProfile, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let user_id: UserId = sqlx::query_scalar(
            r"
            INSERT INTO edureach.auth_user (email, password_hash, display_name)
            VALUES ($1, $2, $3)
            RETURNING id
            ",
        )
        .bind(email)
        .bind(password_hash)
        .bind(&profile.name)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| RepositoryError::from_unique_violation(e, "email"))?;

        let created = sqlx::query_as::<_, AdminProfile>(
            r"
            INSERT INTO edureach.admin_profile
                (user_id, name, email, is_super_admin, is_active, permissions, force_password_change)
            VALUES ($1, $2, $3, $4, TRUE, $5, $6)
            RETURNING id, user_id, name, email, avatar_url, is_super_admin, is_active,
                      permissions, force_password_change, last_login, created_at, updated_at
            ",
        )
        .bind(user_id)
        .bind(&profile.name)
        .bind(&profile.email)
        .bind(profile.is_super_admin)
        .bind(DEFAULT_PERMISSIONS.map(String::from).to_vec())
        .bind(profile.force_password_change)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| RepositoryError::from_unique_violation(e, "super admin"))?;

        tx.commit().await?;
        Ok(created)
    }

    /// Record a successful back-office login.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn touch_last_login(&self, user_id: UserId) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE edureach.admin_profile SET last_login = NOW() WHERE user_id = $1")
            .bind(user_id)
            .execute(self.pool)
            .await?;
        Ok(())
    }

    /// Update an admin's own name, email, and avatar.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the profile does not exist.
    pub async fn update_profile(
        &self,
        id: AdminProfileId,
        update: &AdminProfileUpdate,
    ) -> Result<AdminProfile, RepositoryError> {
        sqlx::query_as::<_, AdminProfile>(
            r"
            UPDATE edureach.admin_profile
            SET name = $2, email = $3, avatar_url = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_id, name, email, avatar_url, is_super_admin, is_active,
                      permissions, force_password_change, last_login, created_at, updated_at
            ",
        )
        .bind(id)
        .bind(&update.name)
        .bind(&update.email)
        .bind(&update.avatar_url)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)
    }

    /// Flip `is_active` on a regular admin. The super admin row never matches.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no regular admin has this ID.
    pub async fn toggle_active(&self, id: AdminProfileId) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE edureach.admin_profile
            SET is_active = NOT is_active, updated_at = NOW()
            WHERE id = $1 AND NOT is_super_admin
            ",
        )
        .bind(id)
        .execute(self.pool)
        .await?;
        expect_affected(result.rows_affected())
    }

    /// Delete a regular admin's profile. The identity remains as a plain user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no regular admin has this ID.
    pub async fn delete(&self, id: AdminProfileId) -> Result<(), RepositoryError> {
        let result =
            sqlx::query("DELETE FROM edureach.admin_profile WHERE id = $1 AND NOT is_super_admin")
                .bind(id)
                .execute(self.pool)
                .await?;
        expect_affected(result.rows_affected())
    }
}
