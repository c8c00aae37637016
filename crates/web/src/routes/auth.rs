//! Site authentication route handlers.
//!
//! Password sign-up and sign-in for site users. Admins may sign in here too;
//! they land on the dashboard instead of the profile page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use edureach_core::Viewer;

use crate::db::AdminProfileRepository;
use crate::error::{clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{CurrentViewer, clear_current_user, set_current_user};
use crate::models::{AdminProfile, CurrentUser, User};
use crate::routes::{GENERIC_FAILURE, NoticeQuery, redirect_with_error, redirect_with_notice};
use crate::services::{AuthError, AuthService};
use crate::state::AppState;

const SIGN_IN_PATH: &str = "/auth/sign-in";
const SIGN_UP_PATH: &str = "/auth/sign-up";

// =============================================================================
// Form Types
// =============================================================================

/// Sign-in form data.
#[derive(Debug, Deserialize)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

/// Sign-up form data.
#[derive(Debug, Deserialize)]
pub struct SignUpForm {
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Sign-in page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/sign_in.html")]
pub struct SignInTemplate {
    pub viewer: Viewer,
    pub error: Option<String>,
    pub notice: Option<String>,
}

/// Sign-up page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/sign_up.html")]
pub struct SignUpTemplate {
    pub viewer: Viewer,
    pub error: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the sign-in page.
pub async fn sign_in_page(viewer: CurrentViewer, Query(query): Query<NoticeQuery>) -> Response {
    if viewer.viewer.is_signed_in() {
        return Redirect::to(viewer.viewer.landing_path()).into_response();
    }
    SignInTemplate {
        viewer: viewer.viewer,
        error: query.error,
        notice: query.notice,
    }
    .into_response()
}

/// Handle sign-in form submission.
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn sign_in(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SignInForm>,
) -> Response {
    let auth = AuthService::new(state.pool());
    let user = match auth.sign_in(&form.email, &form.password).await {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!(error = %e, "Sign-in failed");
            let message = e
                .user_message()
                .unwrap_or_else(|| GENERIC_FAILURE.to_string());
            return redirect_with_error(SIGN_IN_PATH, &message).into_response();
        }
    };

    if let Err(e) = start_session(&session, &user).await {
        tracing::error!(error = %e, "Failed to set session");
        return redirect_with_error(SIGN_IN_PATH, "Could not start a session").into_response();
    }

    let profile = AdminProfileRepository::new(state.pool())
        .get_by_user_id(user.id)
        .await
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, user_id = %user.id, "Admin profile lookup failed");
            None
        });
    let viewer = Viewer::classify(true, profile.as_ref().map(AdminProfile::flags));

    tracing::info!(user_id = %user.id, viewer = ?viewer, "Signed in");
    Redirect::to(viewer.landing_path()).into_response()
}

/// Display the sign-up page.
pub async fn sign_up_page(viewer: CurrentViewer, Query(query): Query<NoticeQuery>) -> Response {
    if viewer.viewer.is_signed_in() {
        return Redirect::to(viewer.viewer.landing_path()).into_response();
    }
    SignUpTemplate {
        viewer: viewer.viewer,
        error: query.error,
    }
    .into_response()
}

/// Handle sign-up form submission.
///
/// New accounts are signed in immediately and sent to their profile.
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn sign_up(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SignUpForm>,
) -> Response {
    if form.password != form.password_confirm {
        return redirect_with_error(SIGN_UP_PATH, "Passwords do not match").into_response();
    }

    let auth = AuthService::new(state.pool());
    let user = match auth
        .sign_up(&form.email, &form.password, form.display_name.as_deref())
        .await
    {
        Ok(user) => user,
        Err(e) => {
            if matches!(e, AuthError::Repository(_) | AuthError::PasswordHash) {
                tracing::error!(error = %e, "Sign-up failed");
            } else {
                tracing::info!(error = %e, "Sign-up rejected");
            }
            let message = e
                .user_message()
                .unwrap_or_else(|| GENERIC_FAILURE.to_string());
            return redirect_with_error(SIGN_UP_PATH, &message).into_response();
        }
    };

    if let Err(e) = start_session(&session, &user).await {
        tracing::error!(error = %e, "Failed to set session");
        return redirect_with_notice(SIGN_IN_PATH, "Account created. Please sign in.")
            .into_response();
    }

    tracing::info!(user_id = %user.id, "Account created");
    redirect_with_notice("/profile", "Welcome to EduReach!").into_response()
}

/// Handle sign-out.
pub async fn sign_out(session: Session) -> Redirect {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!(error = %e, "Failed to clear session");
    }
    clear_sentry_user();
    Redirect::to("/")
}

/// Store the identity in the session and tag Sentry events with it.
pub(crate) async fn start_session(
    session: &Session,
    user: &User,
) -> Result<(), tower_sessions::session::Error> {
    let current = CurrentUser {
        id: user.id,
        email: user.email.clone(),
    };
    set_current_user(session, &current).await?;
    set_sentry_user(&user.id, Some(user.email.as_str()));
    Ok(())
}
