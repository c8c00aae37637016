//! Status enums for various entities.

use serde::{Deserialize, Serialize};

/// Read state of an inbound consultation message.
///
/// New submissions are always stored as [`MessageStatus::Unread`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "edureach.message_status", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum MessageStatus {
    #[default]
    Unread,
    Read,
}

impl MessageStatus {
    /// The status an admin flips to from this one.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Unread => Self::Read,
            Self::Read => Self::Unread,
        }
    }

    #[must_use]
    pub const fn is_unread(self) -> bool {
        matches!(self, Self::Unread)
    }
}

impl std::fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unread => write!(f, "unread"),
            Self::Read => write!(f, "read"),
        }
    }
}

impl std::str::FromStr for MessageStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unread" => Ok(Self::Unread),
            "read" => Ok(Self::Read),
            _ => Err(format!("invalid message status: {s}")),
        }
    }
}

/// Admin role with different permission levels.
///
/// Stored as the `is_super_admin` flag on an admin profile; at most one
/// profile carries [`AdminRole::SuperAdmin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    /// Full access including admin-account management.
    SuperAdmin,
    /// Full access to site content and messages.
    Admin,
}

impl AdminRole {
    #[must_use]
    pub const fn from_super_admin_flag(is_super_admin: bool) -> Self {
        if is_super_admin {
            Self::SuperAdmin
        } else {
            Self::Admin
        }
    }

    /// Whether this role may list, create, toggle, or delete admin accounts.
    #[must_use]
    pub const fn can_manage_admins(self) -> bool {
        matches!(self, Self::SuperAdmin)
    }
}

impl std::fmt::Display for AdminRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SuperAdmin => write!(f, "super_admin"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for AdminRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "super_admin" => Ok(Self::SuperAdmin),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("invalid admin role: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_message_status_defaults_to_unread() {
        assert_eq!(MessageStatus::default(), MessageStatus::Unread);
        assert!(MessageStatus::default().is_unread());
    }

    #[test]
    fn test_message_status_toggle() {
        assert_eq!(MessageStatus::Unread.toggled(), MessageStatus::Read);
        assert_eq!(MessageStatus::Read.toggled(), MessageStatus::Unread);
    }

    #[test]
    fn test_message_status_parse() {
        assert_eq!("read".parse::<MessageStatus>().unwrap(), MessageStatus::Read);
        assert!("archived".parse::<MessageStatus>().is_err());
    }

    #[test]
    fn test_admin_role_from_flag() {
        assert_eq!(AdminRole::from_super_admin_flag(true), AdminRole::SuperAdmin);
        assert_eq!(AdminRole::from_super_admin_flag(false), AdminRole::Admin);
    }

    #[test]
    fn test_only_super_admin_manages_admins() {
        assert!(AdminRole::SuperAdmin.can_manage_admins());
        assert!(!AdminRole::Admin.can_manage_admins());
    }
}
