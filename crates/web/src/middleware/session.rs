//! Session middleware configuration.
//!
//! Sets up `PostgreSQL`-backed sessions using tower-sessions. Sessions live
//! in `edureach.session`, created by the initial migration.

use sqlx::PgPool;
use thiserror::Error;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::WebConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "edureach_session";

/// Schema holding the session table.
const SESSION_SCHEMA: &str = "edureach";

/// Session table name.
const SESSION_TABLE: &str = "session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// The session store rejected a schema or table name.
#[derive(Debug, Error)]
#[error("Invalid session store name: {0}")]
pub struct SessionStoreError(String);

/// Create the session layer with `PostgreSQL` store.
///
/// Cookies are marked `Secure` when the site is served over HTTPS.
///
/// # Errors
///
/// Returns an error if the store rejects the schema or table name.
pub fn create_session_layer(
    pool: &PgPool,
    config: &WebConfig,
) -> Result<SessionManagerLayer<PostgresStore>, SessionStoreError> {
    let store = PostgresStore::new(pool.clone())
        .with_schema_name(SESSION_SCHEMA)
        .map_err(SessionStoreError)?
        .with_table_name(SESSION_TABLE)
        .map_err(SessionStoreError)?;

    Ok(SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(time::Duration::seconds(
            SESSION_EXPIRY_SECONDS,
        )))
        .with_secure(config.is_https())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/"))
}
