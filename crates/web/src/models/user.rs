//! Site identity types.

use chrono::{DateTime, Utc};

use edureach_core::{Email, UserId};

/// A signed-up identity. Admins are identities that also have an
/// [`AdminProfile`](super::AdminProfile).
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Name shown in the header: display name, else the email local part.
    #[must_use]
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| self.email.local_part())
    }
}
