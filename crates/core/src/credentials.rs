//! Credential-update rules for the force-password-change screen.

use thiserror::Error;

use crate::types::{Email, EmailError};

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Why a credential update was rejected before touching storage.
///
/// Display strings are shown to the admin verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    #[error("New passwords do not match")]
    Mismatch,
    #[error("Password must be at least 8 characters long")]
    TooShort,
    #[error("Please enter a valid email address")]
    InvalidEmail(#[source] EmailError),
}

/// A validated credential update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialUpdate {
    pub new_password: String,
    /// `None` keeps the current email.
    pub new_email: Option<Email>,
}

impl CredentialUpdate {
    /// Validate the form fields.
    ///
    /// The confirmation check runs first, so a short mismatched pair reports
    /// the mismatch. A blank `new_email` means "keep the current one".
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError`] describing the first failed rule.
    pub fn validate(
        new_password: &str,
        confirm_password: &str,
        new_email: &str,
    ) -> Result<Self, CredentialError> {
        if new_password != confirm_password {
            return Err(CredentialError::Mismatch);
        }
        if new_password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(CredentialError::TooShort);
        }
        let new_email = if new_email.trim().is_empty() {
            None
        } else {
            Some(Email::parse(new_email).map_err(CredentialError::InvalidEmail)?)
        };
        Ok(Self {
            new_password: new_password.to_owned(),
            new_email,
        })
    }
}

/// Check a password on its own (sign-up, admin creation).
///
/// # Errors
///
/// Returns [`CredentialError::TooShort`] below the minimum length.
pub fn check_password_length(password: &str) -> Result<(), CredentialError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CredentialError::TooShort);
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatch() {
        assert_eq!(
            CredentialUpdate::validate("longenough1", "longenough2", ""),
            Err(CredentialError::Mismatch)
        );
        assert_eq!(
            CredentialError::Mismatch.to_string(),
            "New passwords do not match"
        );
    }

    #[test]
    fn test_too_short() {
        assert_eq!(
            CredentialUpdate::validate("short", "short", ""),
            Err(CredentialError::TooShort)
        );
        assert_eq!(
            CredentialError::TooShort.to_string(),
            "Password must be at least 8 characters long"
        );
    }

    #[test]
    fn test_exactly_minimum_length() {
        assert!(CredentialUpdate::validate("12345678", "12345678", "").is_ok());
    }

    #[test]
    fn test_blank_email_keeps_current() {
        let update = CredentialUpdate::validate("new-password", "new-password", "   ").unwrap();
        assert!(update.new_email.is_none());
    }

    #[test]
    fn test_new_email_is_parsed() {
        let update =
            CredentialUpdate::validate("new-password", "new-password", "Admin@EduReach.org")
                .unwrap();
        assert_eq!(
            update.new_email.map(Email::into_inner).as_deref(),
            Some("admin@edureach.org")
        );
    }

    #[test]
    fn test_invalid_email() {
        assert!(matches!(
            CredentialUpdate::validate("new-password", "new-password", "nope"),
            Err(CredentialError::InvalidEmail(_))
        ));
    }

    #[test]
    fn test_check_password_length() {
        assert!(check_password_length("abcdefgh").is_ok());
        assert_eq!(check_password_length("abc"), Err(CredentialError::TooShort));
    }
}
