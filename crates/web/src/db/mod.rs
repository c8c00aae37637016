//! Database operations for the EduReach `PostgreSQL` schema.
//!
//! # Schema: `edureach`
//!
//! ## Tables
//!
//! - `auth_user` - Identities (email + argon2 password hash)
//! - `admin_profile` - Back-office access, one per identity at most
//! - `service`, `testimonial`, `blog_post`, `program_image` - Site content
//! - `user_testimonial` - Testimonials owned by signed-in users
//! - `user_message` - Consultation requests
//! - `session` - Tower-sessions storage
//!
//! # Migrations
//!
//! Migrations are stored in `crates/web/migrations/` and run via:
//! ```bash
//! cargo run -p edureach-cli -- migrate
//! ```

pub mod admin_profiles;
pub mod blog_posts;
pub mod messages;
pub mod program_images;
pub mod services;
pub mod testimonials;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use admin_profiles::AdminProfileRepository;
pub use blog_posts::BlogPostRepository;
pub use messages::MessageRepository;
pub use program_images::ProgramImageRepository;
pub use services::ServiceRepository;
pub use testimonials::{TestimonialRepository, UserTestimonialRepository};
pub use users::{CredentialTransaction, UserRepository};

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

impl RepositoryError {
    /// Map a unique violation to `Conflict`, anything else to `Database`.
    pub(crate) fn from_unique_violation(e: sqlx::Error, what: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = e
            && db_err.is_unique_violation()
        {
            return Self::Conflict(format!("{what} already exists"));
        }
        Self::Database(e)
    }
}

/// Turn an affected-row count into `NotFound` when nothing matched.
pub(crate) const fn expect_affected(rows: u64) -> Result<(), RepositoryError> {
    if rows == 0 {
        return Err(RepositoryError::NotFound);
    }
    Ok(())
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expect_affected() {
        assert!(expect_affected(1).is_ok());
        assert!(matches!(expect_affected(0), Err(RepositoryError::NotFound)));
    }

    #[test]
    fn test_non_database_error_is_not_conflict() {
        let err = RepositoryError::from_unique_violation(sqlx::Error::RowNotFound, "email");
        assert!(matches!(err, RepositoryError::Database(_)));
    }
}
