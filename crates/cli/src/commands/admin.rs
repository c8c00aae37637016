//! Admin account commands.
//!
//! # Usage
//!
//! ```bash
//! # Create the super admin (only once)
//! edureach admin bootstrap -e owner@example.com -n "Owner"
//!
//! # Create a regular admin
//! edureach admin create -e staff@example.com -n "Staff"
//! ```
//!
//! Both accounts must replace their password on first login. When `-p` is
//! omitted, a random temporary password is generated and logged once.

use thiserror::Error;

use edureach_core::AdminRole;
use edureach_web::models::AdminProfile;
use edureach_web::services::auth::generate_temporary_password;
use edureach_web::services::{AuthError, AuthService};

use super::{CommandError, connect};

/// Errors that can occur during admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    #[error(transparent)]
    Connect(#[from] CommandError),

    #[error("{0}")]
    Auth(#[from] AuthError),

    /// A super admin is already present.
    #[error("A super admin already exists")]
    SuperAdminExists,
}

/// Create the super admin.
///
/// # Errors
///
/// Returns `AdminError::SuperAdminExists` if one has already been seeded.
pub async fn bootstrap(
    email: &str,
    name: &str,
    password: Option<String>,
) -> Result<AdminProfile, AdminError> {
    let pool = connect().await?;
    let (password, generated) = resolve_password(password);

    let profile = AuthService::new(&pool)
        .ensure_super_admin(email, name, &password)
        .await?
        .ok_or(AdminError::SuperAdminExists)?;

    report(&profile, &password, generated);
    Ok(profile)
}

/// Create a regular admin.
///
/// # Errors
///
/// Returns an error if the email is invalid or already registered.
pub async fn create(
    email: &str,
    name: &str,
    password: Option<String>,
) -> Result<AdminProfile, AdminError> {
    let pool = connect().await?;
    let (password, generated) = resolve_password(password);

    // CLI operators act with super admin rights.
    let profile = AuthService::new(&pool)
        .create_admin(AdminRole::SuperAdmin, email, name, &password)
        .await?;

    report(&profile, &password, generated);
    Ok(profile)
}

fn resolve_password(password: Option<String>) -> (String, bool) {
    password.map_or_else(|| (generate_temporary_password(), true), |p| (p, false))
}

fn report(profile: &AdminProfile, password: &str, generated: bool) {
    tracing::info!(
        "Admin created successfully! ID: {}, Email: {}, Role: {}",
        profile.id,
        profile.email,
        profile.role()
    );
    if generated {
        tracing::info!("Temporary password: {password}");
    }
    tracing::warn!("The password must be changed on first login at /admin/login.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_password_keeps_supplied_value() {
        assert_eq!(
            resolve_password(Some("long-enough-pass".to_string())),
            ("long-enough-pass".to_string(), false)
        );
    }

    #[test]
    fn test_resolve_password_generates_when_missing() {
        let (password, generated) = resolve_password(None);
        assert!(generated);
        assert!(password.len() >= edureach_core::MIN_PASSWORD_LENGTH);
    }
}
