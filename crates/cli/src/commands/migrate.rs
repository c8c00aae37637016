//! Database migration command.
//!
//! Migrations live in `crates/web/migrations/` and are embedded at compile
//! time. The server never runs them on startup.
//!
//! # Environment Variables
//!
//! - `EDUREACH_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)

use super::{CommandError, connect};

/// Errors that can occur while migrating.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error(transparent)]
    Connect(#[from] CommandError),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run all pending migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), MigrationError> {
    let pool = connect().await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../web/migrations").run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
