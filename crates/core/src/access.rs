//! Viewer classification and back-office access decisions.
//!
//! Every request is classified as one of the [`Viewer`] variants from two
//! facts: whether the session carries an identity, and which admin profile
//! (if any) belongs to that identity. The back-office runs every request
//! through [`admin_gate`] before rendering anything.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::AdminRole;

/// Who is looking at the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Viewer {
    #[default]
    Anonymous,
    User,
    Admin,
    SuperAdmin,
}

impl Viewer {
    /// Classify a request.
    ///
    /// `profile` is only consulted when an identity is present. An inactive
    /// profile still classifies as an admin; [`admin_gate`] is what blocks it.
    #[must_use]
    pub const fn classify(signed_in: bool, profile: Option<AdminFlags>) -> Self {
        match (signed_in, profile) {
            (false, _) => Self::Anonymous,
            (true, None) => Self::User,
            (true, Some(flags)) if flags.is_super_admin => Self::SuperAdmin,
            (true, Some(_)) => Self::Admin,
        }
    }

    #[must_use]
    pub const fn is_signed_in(self) -> bool {
        !matches!(self, Self::Anonymous)
    }

    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin | Self::SuperAdmin)
    }

    /// Where a successful public sign-in sends this viewer.
    #[must_use]
    pub const fn landing_path(self) -> &'static str {
        match self {
            Self::Admin | Self::SuperAdmin => "/admin",
            Self::User => "/profile",
            Self::Anonymous => "/",
        }
    }
}

/// The admin-profile flags that drive access decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AdminFlags {
    pub is_super_admin: bool,
    pub is_active: bool,
    pub force_password_change: bool,
}

impl AdminFlags {
    #[must_use]
    pub const fn role(self) -> AdminRole {
        AdminRole::from_super_admin_flag(self.is_super_admin)
    }
}

/// Outcome of running a request through the back-office gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdminGate {
    /// No identity in the session.
    SignInRequired,
    /// Signed in, but no admin profile exists for the identity.
    NotAdmin,
    /// The admin profile has been deactivated.
    Deactivated,
    /// The admin must replace the provisioned credentials first.
    CredentialUpdateRequired,
    /// Access granted with the given role.
    Granted(AdminRole),
}

impl AdminGate {
    /// Message shown on the login screen when access is refused.
    #[must_use]
    pub const fn denial_message(self) -> Option<&'static str> {
        match self {
            Self::NotAdmin => Some("Access denied. Admin privileges required."),
            Self::Deactivated => Some("Account is deactivated. Contact super admin."),
            Self::SignInRequired | Self::CredentialUpdateRequired | Self::Granted(_) => None,
        }
    }
}

/// Decide whether a request may enter the back-office.
///
/// Deactivation is checked before the credential-update requirement, so a
/// deactivated account never reaches the credential form.
#[must_use]
pub const fn admin_gate(signed_in: bool, profile: Option<AdminFlags>) -> AdminGate {
    if !signed_in {
        return AdminGate::SignInRequired;
    }
    let Some(flags) = profile else {
        return AdminGate::NotAdmin;
    };
    if !flags.is_active {
        return AdminGate::Deactivated;
    }
    if flags.force_password_change {
        return AdminGate::CredentialUpdateRequired;
    }
    AdminGate::Granted(flags.role())
}

/// Operations on admin accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdminAccountAction {
    List,
    Create,
    ToggleActive,
    Delete,
}

/// Why an admin-account operation was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PermissionError {
    #[error("Only the super admin can manage admin accounts")]
    NotSuperAdmin,
    #[error("Cannot delete super admin account")]
    CannotDeleteSuperAdmin,
    #[error("Cannot deactivate super admin account")]
    CannotDeactivateSuperAdmin,
}

/// Check an admin-account operation.
///
/// `target_is_super_admin` describes the account being acted on and is
/// ignored for `List` and `Create`.
///
/// # Errors
///
/// Returns [`PermissionError`] when the actor is not the super-admin, or when
/// the target is the super-admin account itself.
pub const fn authorize_admin_account_action(
    actor: AdminRole,
    action: AdminAccountAction,
    target_is_super_admin: bool,
) -> Result<(), PermissionError> {
    if !actor.can_manage_admins() {
        return Err(PermissionError::NotSuperAdmin);
    }
    match action {
        AdminAccountAction::Delete if target_is_super_admin => {
            Err(PermissionError::CannotDeleteSuperAdmin)
        }
        AdminAccountAction::ToggleActive if target_is_super_admin => {
            Err(PermissionError::CannotDeactivateSuperAdmin)
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn flags(is_super_admin: bool, is_active: bool, force: bool) -> AdminFlags {
        AdminFlags {
            is_super_admin,
            is_active,
            force_password_change: force,
        }
    }

    #[test]
    fn test_classify() {
        assert_eq!(Viewer::classify(false, None), Viewer::Anonymous);
        assert_eq!(
            Viewer::classify(false, Some(flags(true, true, false))),
            Viewer::Anonymous
        );
        assert_eq!(Viewer::classify(true, None), Viewer::User);
        assert_eq!(
            Viewer::classify(true, Some(flags(false, true, false))),
            Viewer::Admin
        );
        assert_eq!(
            Viewer::classify(true, Some(flags(true, true, false))),
            Viewer::SuperAdmin
        );
    }

    #[test]
    fn test_landing_path() {
        assert_eq!(Viewer::Admin.landing_path(), "/admin");
        assert_eq!(Viewer::SuperAdmin.landing_path(), "/admin");
        assert_eq!(Viewer::User.landing_path(), "/profile");
    }

    #[test]
    fn test_gate_requires_sign_in() {
        assert_eq!(admin_gate(false, None), AdminGate::SignInRequired);
    }

    #[test]
    fn test_gate_rejects_plain_user() {
        let gate = admin_gate(true, None);
        assert_eq!(gate, AdminGate::NotAdmin);
        assert_eq!(
            gate.denial_message(),
            Some("Access denied. Admin privileges required.")
        );
    }

    #[test]
    fn test_gate_rejects_deactivated_before_credential_update() {
        let gate = admin_gate(true, Some(flags(false, false, true)));
        assert_eq!(gate, AdminGate::Deactivated);
        assert_eq!(
            gate.denial_message(),
            Some("Account is deactivated. Contact super admin.")
        );
    }

    #[test]
    fn test_force_password_change_always_gates() {
        for is_super_admin in [false, true] {
            assert_eq!(
                admin_gate(true, Some(flags(is_super_admin, true, true))),
                AdminGate::CredentialUpdateRequired
            );
        }
    }

    #[test]
    fn test_gate_grants_role() {
        assert_eq!(
            admin_gate(true, Some(flags(false, true, false))),
            AdminGate::Granted(AdminRole::Admin)
        );
        assert_eq!(
            admin_gate(true, Some(flags(true, true, false))),
            AdminGate::Granted(AdminRole::SuperAdmin)
        );
    }

    #[test]
    fn test_regular_admin_cannot_manage_admins() {
        for action in [
            AdminAccountAction::List,
            AdminAccountAction::Create,
            AdminAccountAction::ToggleActive,
            AdminAccountAction::Delete,
        ] {
            for target in [false, true] {
                assert_eq!(
                    authorize_admin_account_action(AdminRole::Admin, action, target),
                    Err(PermissionError::NotSuperAdmin)
                );
            }
        }
    }

    #[test]
    fn test_super_admin_cannot_remove_itself() {
        assert_eq!(
            authorize_admin_account_action(AdminRole::SuperAdmin, AdminAccountAction::Delete, true),
            Err(PermissionError::CannotDeleteSuperAdmin)
        );
        assert_eq!(
            PermissionError::CannotDeleteSuperAdmin.to_string(),
            "Cannot delete super admin account"
        );
        assert_eq!(
            authorize_admin_account_action(
                AdminRole::SuperAdmin,
                AdminAccountAction::ToggleActive,
                true
            ),
            Err(PermissionError::CannotDeactivateSuperAdmin)
        );
    }

    #[test]
    fn test_super_admin_manages_regular_admins() {
        for action in [
            AdminAccountAction::List,
            AdminAccountAction::Create,
            AdminAccountAction::ToggleActive,
            AdminAccountAction::Delete,
        ] {
            assert_eq!(
                authorize_admin_account_action(AdminRole::SuperAdmin, action, false),
                Ok(())
            );
        }
    }
}
