//! Authentication extractors.
//!
//! The session stores only the signed-in identity. Admin status is read
//! from `admin_profile` on every back-office request, so deactivation and
//! role changes take effect on the next request without re-login.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use edureach_core::{AdminGate, AdminRole, Viewer, admin_gate};

use crate::db::AdminProfileRepository;
use crate::models::session::keys;
use crate::models::{AdminProfile, CurrentUser};
use crate::state::AppState;

/// Site sign-in page.
pub const SIGN_IN_PATH: &str = "/auth/sign-in";

/// Back-office login page.
pub const ADMIN_LOGIN_PATH: &str = "/admin/login";

/// Forced credential update page.
pub const ADMIN_CREDENTIALS_PATH: &str = "/admin/credentials";

/// Back-office dashboard.
pub const ADMIN_HOME_PATH: &str = "/admin";

/// Query code carried to the login page for a denied gate.
#[must_use]
pub const fn denial_code(gate: AdminGate) -> Option<&'static str> {
    match gate {
        AdminGate::NotAdmin => Some("not_admin"),
        AdminGate::Deactivated => Some("deactivated"),
        _ => None,
    }
}

/// Message for a denial code produced by [`denial_code`].
#[must_use]
pub fn denial_message_for_code(code: &str) -> Option<&'static str> {
    let gate = match code {
        "not_admin" => AdminGate::NotAdmin,
        "deactivated" => AdminGate::Deactivated,
        _ => return None,
    };
    gate.denial_message()
}

fn is_api(parts: &Parts) -> bool {
    parts.uri.path().starts_with("/api/")
}

async fn session_user(parts: &Parts) -> Option<CurrentUser> {
    let session = parts.extensions.get::<Session>()?;
    session
        .get::<CurrentUser>(keys::CURRENT_USER)
        .await
        .ok()
        .flatten()
}

/// Look up the admin profile for an identity. A failed lookup is logged
/// and treated as "no profile".
async fn lookup_profile(state: &AppState, user: &CurrentUser) -> Option<AdminProfile> {
    AdminProfileRepository::new(state.pool())
        .get_by_user_id(user.id)
        .await
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, user_id = %user.id, "Admin profile lookup failed");
            None
        })
}

// =============================================================================
// Site users
// =============================================================================

/// Extractor that requires a signed-in identity.
///
/// Redirects to the sign-in page for HTML requests, 401 for API requests.
pub struct RequireUser(pub CurrentUser);

/// Error returned when sign-in is required but nobody is signed in.
pub enum AuthRejection {
    /// Redirect to sign-in page (for HTML requests).
    RedirectToSignIn,
    /// Unauthorized response (for API requests).
    Unauthorized,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToSignIn => Redirect::to(SIGN_IN_PATH).into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        session_user(parts).await.map(Self).ok_or_else(|| {
            if is_api(parts) {
                AuthRejection::Unauthorized
            } else {
                AuthRejection::RedirectToSignIn
            }
        })
    }
}

/// Extractor that classifies the viewer for public pages.
///
/// Never rejects.
pub struct CurrentViewer {
    pub viewer: Viewer,
}

impl FromRequestParts<AppState> for CurrentViewer {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(user) = session_user(parts).await else {
            return Ok(Self { viewer: Viewer::Anonymous });
        };

        let profile = lookup_profile(state, &user).await;
        Ok(Self {
            viewer: Viewer::classify(true, profile.as_ref().map(AdminProfile::flags)),
        })
    }
}

// =============================================================================
// Back-office
// =============================================================================

/// A signed-in identity with its admin profile.
#[derive(Debug, Clone)]
pub struct AdminContext {
    pub user: CurrentUser,
    pub profile: AdminProfile,
}

impl AdminContext {
    #[must_use]
    pub const fn role(&self) -> AdminRole {
        self.profile.role()
    }

    #[must_use]
    pub const fn is_super_admin(&self) -> bool {
        self.profile.is_super_admin
    }
}

/// Error returned when a back-office gate does not grant access.
pub enum AdminRejection {
    /// Nobody is signed in (HTML requests).
    RedirectToLogin,
    /// Nobody is signed in (API requests).
    Unauthorized,
    /// Signed in, but not an active admin.
    Denied(&'static str),
    /// Provisioned credentials must be replaced first.
    RedirectToCredentials,
    /// No credential update is pending.
    RedirectToDashboard,
    /// Admin, but not the super admin.
    Forbidden,
}

impl IntoResponse for AdminRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to(ADMIN_LOGIN_PATH).into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
            Self::Denied(code) => {
                Redirect::to(&format!("{ADMIN_LOGIN_PATH}?error={code}")).into_response()
            }
            Self::RedirectToCredentials => Redirect::to(ADMIN_CREDENTIALS_PATH).into_response(),
            Self::RedirectToDashboard => Redirect::to(ADMIN_HOME_PATH).into_response(),
            Self::Forbidden => (
                StatusCode::FORBIDDEN,
                "Only the super admin can manage admin accounts",
            )
                .into_response(),
        }
    }
}

/// Run the admin gate for the current request.
async fn resolve_admin(
    parts: &Parts,
    state: &AppState,
) -> Result<(AdminGate, Option<AdminContext>), AdminRejection> {
    let Some(user) = session_user(parts).await else {
        return Err(if is_api(parts) {
            AdminRejection::Unauthorized
        } else {
            AdminRejection::RedirectToLogin
        });
    };

    let profile = lookup_profile(state, &user).await;
    let gate = admin_gate(true, profile.as_ref().map(AdminProfile::flags));
    Ok((gate, profile.map(|profile| AdminContext { user, profile })))
}

/// Map a non-granting gate to its rejection.
fn reject(gate: AdminGate) -> AdminRejection {
    match gate {
        AdminGate::CredentialUpdateRequired => AdminRejection::RedirectToCredentials,
        AdminGate::SignInRequired => AdminRejection::RedirectToLogin,
        other => denial_code(other).map_or(AdminRejection::RedirectToLogin, AdminRejection::Denied),
    }
}

/// Extractor that requires an active admin with settled credentials.
pub struct RequireAdmin(pub AdminContext);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AdminRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match resolve_admin(parts, state).await? {
            (AdminGate::Granted(_), Some(admin)) => Ok(Self(admin)),
            (gate, _) => Err(reject(gate)),
        }
    }
}

/// Extractor that requires the super admin.
///
/// Regular admins get 403 Forbidden.
pub struct RequireSuperAdmin(pub AdminContext);

impl FromRequestParts<AppState> for RequireSuperAdmin {
    type Rejection = AdminRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let RequireAdmin(admin) = RequireAdmin::from_request_parts(parts, state).await?;
        if !admin.role().can_manage_admins() {
            return Err(AdminRejection::Forbidden);
        }
        Ok(Self(admin))
    }
}

/// Extractor for the credential update screen.
///
/// Admits only an active admin whose force-password-change flag is set.
/// Anyone else is sent where their gate points.
pub struct PendingCredentialUpdate(pub AdminContext);

impl FromRequestParts<AppState> for PendingCredentialUpdate {
    type Rejection = AdminRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match resolve_admin(parts, state).await? {
            (AdminGate::CredentialUpdateRequired, Some(admin)) => Ok(Self(admin)),
            (AdminGate::Granted(_), _) => Err(AdminRejection::RedirectToDashboard),
            (gate, _) => Err(reject(gate)),
        }
    }
}

// =============================================================================
// Session helpers
// =============================================================================

/// Store the signed-in identity in the session.
///
/// The session ID is cycled first so a pre-login ID cannot be reused.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(keys::CURRENT_USER, user).await
}

/// Clear the signed-in identity from the session (sign-out).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.remove::<CurrentUser>(keys::CURRENT_USER).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_denial_codes_round_trip_to_messages() {
        for gate in [AdminGate::NotAdmin, AdminGate::Deactivated] {
            let code = denial_code(gate).unwrap_or_default();
            assert_eq!(denial_message_for_code(code), gate.denial_message());
        }
    }

    #[test]
    fn test_non_denials_have_no_code() {
        assert!(denial_code(AdminGate::SignInRequired).is_none());
        assert!(denial_code(AdminGate::CredentialUpdateRequired).is_none());
        assert!(denial_code(AdminGate::Granted(AdminRole::Admin)).is_none());
        assert!(denial_message_for_code("unknown").is_none());
    }

    #[test]
    fn test_gate_rejections() {
        assert!(matches!(
            reject(AdminGate::CredentialUpdateRequired),
            AdminRejection::RedirectToCredentials
        ));
        assert!(matches!(
            reject(AdminGate::Deactivated),
            AdminRejection::Denied("deactivated")
        ));
        assert!(matches!(
            reject(AdminGate::NotAdmin),
            AdminRejection::Denied("not_admin")
        ));
    }

    #[test]
    fn test_denied_redirects_with_code() {
        let response = AdminRejection::Denied("deactivated").into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get("location").map(|v| v.to_str().unwrap_or_default()),
            Some("/admin/login?error=deactivated")
        );
    }

    #[test]
    fn test_forbidden_is_403() {
        assert_eq!(
            AdminRejection::Forbidden.into_response().status(),
            StatusCode::FORBIDDEN
        );
    }
}
