//! Authentication service.
//!
//! Provides password sign-up and sign-in for site users, back-office login
//! with the admin gate, the forced credential update, and admin account
//! provisioning.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use rand::Rng;
use rand::distr::Alphanumeric;
use sqlx::PgPool;

use edureach_core::{
    AdminAccountAction, AdminGate, AdminRole, CredentialUpdate, Email, UserId,
    authorize_admin_account_action, check_password_length,
};

use crate::db::{AdminProfileRepository, RepositoryError, UserRepository};
use crate::models::admin_profile::NewAdminProfile;
use crate::models::{AdminProfile, User};

/// Length of generated temporary passwords.
const TEMPORARY_PASSWORD_LENGTH: usize = 16;

/// Result of a back-office login attempt with valid credentials.
#[derive(Debug)]
pub struct AdminLogin {
    pub user: User,
    pub gate: AdminGate,
}

/// Authentication service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
    admins: AdminProfileRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
            admins: AdminProfileRepository::new(pool),
        }
    }

    // =========================================================================
    // Site users
    // =========================================================================

    /// Register a new user with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::Credential` if the password is too short.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> Result<User, AuthError> {
        let email = Email::parse(email)?;
        check_password_length(password)?;
        let password_hash = hash_password(password)?;
        let display_name = display_name.map(str::trim).filter(|n| !n.is_empty());

        self.users
            .create(&email, &password_hash, display_name)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let (user, password_hash) = self
            .users
            .get_password_hash(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;
        Ok(user)
    }

    // =========================================================================
    // Back-office
    // =========================================================================

    /// Sign in through the back-office login form.
    ///
    /// Credentials are checked first; the returned gate says what happens
    /// next. `last_login` is stamped only when the account may proceed
    /// (granted, or sent to the credential update).
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    pub async fn admin_sign_in(&self, email: &str, password: &str) -> Result<AdminLogin, AuthError> {
        let user = self.sign_in(email, password).await?;
        let profile = self.admins.get_by_user_id(user.id).await?;
        let gate = edureach_core::admin_gate(true, profile.as_ref().map(AdminProfile::flags));

        if matches!(
            gate,
            AdminGate::Granted(_) | AdminGate::CredentialUpdateRequired
        ) {
            self.admins.touch_last_login(user.id).await?;
        }

        Ok(AdminLogin { user, gate })
    }

    /// Replace provisioned credentials and clear the force-password-change flag.
    ///
    /// Returns the identity's email after the update.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Credential` if the new password/email fails validation.
    /// Returns `AuthError::CurrentPasswordIncorrect` if `current_password` is wrong.
    /// Returns `AuthError::UserAlreadyExists` if the new email is taken.
    pub async fn update_admin_credentials(
        &self,
        user_id: UserId,
        current_email: &Email,
        current_password: &str,
        new_password: &str,
        confirm_password: &str,
        new_email: &str,
    ) -> Result<Email, AuthError> {
        let update = CredentialUpdate::validate(new_password, confirm_password, new_email)?;

        let credentials = self.users.begin_credential_update(user_id).await?;
        verify_password(current_password, credentials.stored_hash())
            .map_err(|_| AuthError::CurrentPasswordIncorrect)?;

        let password_hash = hash_password(&update.new_password)?;
        credentials
            .apply(&password_hash, update.new_email.as_ref())
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        Ok(update.new_email.unwrap_or_else(|| current_email.clone()))
    }

    /// Create a regular admin account on behalf of `actor`.
    ///
    /// The account starts active, with default permissions, and must replace
    /// its password on first login.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Permission` unless `actor` is the super admin.
    /// Returns `AuthError::UserAlreadyExists` if the email is taken.
    pub async fn create_admin(
        &self,
        actor: AdminRole,
        email: &str,
        name: &str,
        password: &str,
    ) -> Result<AdminProfile, AuthError> {
        authorize_admin_account_action(actor, AdminAccountAction::Create, false)?;
        self.provision_admin(email, name, password, false).await
    }

    /// Seed the super admin if none exists yet.
    ///
    /// Returns `None` when a super admin is already present.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserAlreadyExists` if the email belongs to another identity.
    pub async fn ensure_super_admin(
        &self,
        email: &str,
        name: &str,
        password: &str,
    ) -> Result<Option<AdminProfile>, AuthError> {
        if self.admins.super_admin_exists().await? {
            return Ok(None);
        }
        self.provision_admin(email, name, password, true)
            .await
            .map(Some)
    }

    async fn provision_admin(
        &self,
        email: &str,
        name: &str,
        password: &str,
        is_super_admin: bool,
    ) -> Result<AdminProfile, AuthError> {
        let email = Email::parse(email)?;
        check_password_length(password)?;
        let name = name.trim();
        let name = if name.is_empty() {
            email.local_part().to_owned()
        } else {
            name.to_owned()
        };
        let password_hash = hash_password(password)?;

        let profile = NewAdminProfile {
            name,
            email: email.as_str().to_owned(),
            is_super_admin,
            force_password_change: true,
        };

        self.admins
            .create_with_identity(&email, &password_hash, &profile)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })
    }
}

/// Generate a random temporary password for a newly provisioned admin.
#[must_use]
pub fn generate_temporary_password() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(TEMPORARY_PASSWORD_LENGTH)
        .map(char::from)
        .collect()
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("correct horse battery", &hash).is_ok());
        assert!(matches!(
            verify_password("wrong password", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        assert!(matches!(
            verify_password("anything", "not-a-phc-string"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_temporary_password_shape() {
        let password = generate_temporary_password();
        assert_eq!(password.len(), TEMPORARY_PASSWORD_LENGTH);
        assert!(password.chars().all(|c| c.is_ascii_alphanumeric()));
        assert!(check_password_length(&password).is_ok());
    }
}
