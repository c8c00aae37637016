//! Admin profile domain types.

use chrono::{DateTime, Utc};

use edureach_core::{AdminFlags, AdminProfileId, AdminRole, UserId};

/// Permissions granted to admins created from the back-office.
pub const DEFAULT_PERMISSIONS: [&str; 3] = ["messages", "services", "testimonials"];

/// Back-office access record for an identity.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AdminProfile {
    pub id: AdminProfileId,
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub is_super_admin: bool,
    pub is_active: bool,
    /// Recorded and displayed; access is decided by role alone.
    pub permissions: Vec<String>,
    pub force_password_change: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AdminProfile {
    #[must_use]
    pub const fn flags(&self) -> AdminFlags {
        AdminFlags {
            is_super_admin: self.is_super_admin,
            is_active: self.is_active,
            force_password_change: self.force_password_change,
        }
    }

    #[must_use]
    pub const fn role(&self) -> AdminRole {
        AdminRole::from_super_admin_flag(self.is_super_admin)
    }
}

/// Fields for creating an admin profile.
#[derive(Debug, Clone)]
pub struct NewAdminProfile {
    pub name: String,
    pub email: String,
    pub is_super_admin: bool,
    pub force_password_change: bool,
}

/// Self-service profile edits.
#[derive(Debug, Clone)]
pub struct AdminProfileUpdate {
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
}
