//! Identity repository.
//!
//! Identities are shared by site users and admins. Password hashes only
//! leave this module for verification, through
//! [`UserRepository::get_password_hash`] and [`CredentialTransaction`].

use sqlx::{PgPool, Postgres, Transaction};

use edureach_core::{Email, UserId};

use super::RepositoryError;
use crate::models::User;

/// Repository for identity database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            r"
            SELECT id, email, display_name, created_at, updated_at
            FROM edureach.auth_user
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Get a user by their email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            r"
            SELECT id, email, display_name, created_at, updated_at
            FROM edureach.auth_user
            WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Get a user together with their password hash, for sign-in.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let Some(user) = self.get_by_email(email).await? else {
            return Ok(None);
        };
        let password_hash = self.get_password_hash_by_id(user.id).await?;
        Ok(Some((user, password_hash)))
    }

    /// Get the password hash for an identity.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the identity does not exist.
    pub async fn get_password_hash_by_id(&self, id: UserId) -> Result<String, RepositoryError> {
        let hash: Option<String> =
            sqlx::query_scalar("SELECT password_hash FROM edureach.auth_user WHERE id = $1")
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        hash.ok_or(RepositoryError::NotFound)
    }

    /// Create a new identity with a password hash.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        email: &Email,
        password_hash: &str,
        display_name: Option<&str>,
    ) -> Result<User, RepositoryError> {
        sqlx::query_as::<_, User>(
            r"
            INSERT INTO edureach.auth_user (email, password_hash, display_name)
            VALUES ($1, $2, $3)
            RETURNING id, email, display_name, created_at, updated_at
            ",
        )
        .bind(email)
        .bind(password_hash)
        .bind(display_name)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_unique_violation(e, "email"))
    }

    /// Open a credential update for an identity.
    ///
    /// The identity row stays locked until the returned transaction is
    /// applied or dropped.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the identity does not exist.
    pub async fn begin_credential_update(
        &self,
        id: UserId,
    ) -> Result<CredentialTransaction, RepositoryError> {
        let mut tx = self.pool.begin().await?;
        let stored_hash: Option<String> = sqlx::query_scalar(
            "SELECT password_hash FROM edureach.auth_user WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        Ok(CredentialTransaction {
            tx,
            id,
            stored_hash: stored_hash.ok_or(RepositoryError::NotFound)?,
        })
    }
}

/// An open credential update holding a lock on one identity.
///
/// Dropping it without calling [`apply`](Self::apply) rolls everything back.
pub struct CredentialTransaction {
    tx: Transaction<'static, Postgres>,
    id: UserId,
    stored_hash: String,
}

impl CredentialTransaction {
    /// The password hash stored when the update was opened.
    #[must_use]
    pub fn stored_hash(&self) -> &str {
        &self.stored_hash
    }

    /// Replace an admin's provisioned credentials and commit.
    ///
    /// Stores the new hash, moves the identity and the admin profile to
    /// `new_email` when given, clears the force-password-change flag and
    /// stamps `last_login`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if `new_email` belongs to another identity.
    /// Returns `RepositoryError::NotFound` if the identity has no admin profile.
    pub async fn apply(
        mut self,
        password_hash: &str,
        new_email: Option<&Email>,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            UPDATE edureach.auth_user
            SET password_hash = $2,
                email = COALESCE($3, email),
                updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(self.id)
        .bind(password_hash)
        .bind(new_email)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| RepositoryError::from_unique_violation(e, "email"))?;

        let result = sqlx::query(
            r"
            UPDATE edureach.admin_profile
            SET force_password_change = FALSE,
                email = COALESCE($2, email),
                last_login = NOW(),
                updated_at = NOW()
            WHERE user_id = $1
            ",
        )
        .bind(self.id)
        .bind(new_email)
        .execute(&mut *self.tx)
        .await?;
        super::expect_affected(result.rows_affected())?;

        self.tx.commit().await?;
        Ok(())
    }
}
