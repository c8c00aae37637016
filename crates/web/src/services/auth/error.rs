//! Authentication error types.

use thiserror::Error;

use edureach_core::{CredentialError, EmailError, PermissionError};

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Invalid credentials (wrong password or user not found).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The current password on the credential-update form is wrong.
    #[error("current password is incorrect")]
    CurrentPasswordIncorrect,

    /// User already exists.
    #[error("user already exists")]
    UserAlreadyExists,

    /// New credentials failed validation.
    #[error("{0}")]
    Credential(#[from] CredentialError),

    /// The actor may not perform this admin-account operation.
    #[error("{0}")]
    Permission(#[from] PermissionError),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}

impl AuthError {
    /// Message safe to show on a form.
    ///
    /// Returns `None` for server-side failures, which callers report generically.
    #[must_use]
    pub fn user_message(&self) -> Option<String> {
        match self {
            Self::InvalidEmail(_) => Some("Please enter a valid email address".to_owned()),
            Self::InvalidCredentials => Some("Invalid email or password".to_owned()),
            Self::CurrentPasswordIncorrect => Some("Current password is incorrect".to_owned()),
            Self::UserAlreadyExists => Some("An account with this email already exists".to_owned()),
            Self::Credential(e) => Some(e.to_string()),
            Self::Permission(e) => Some(e.to_string()),
            Self::Repository(_) | Self::PasswordHash => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert_eq!(
            AuthError::Credential(CredentialError::Mismatch)
                .user_message()
                .as_deref(),
            Some("New passwords do not match")
        );
        assert_eq!(
            AuthError::Permission(PermissionError::CannotDeleteSuperAdmin)
                .user_message()
                .as_deref(),
            Some("Cannot delete super admin account")
        );
        assert!(AuthError::PasswordHash.user_message().is_none());
        assert!(
            AuthError::Repository(RepositoryError::NotFound)
                .user_message()
                .is_none()
        );
    }
}
