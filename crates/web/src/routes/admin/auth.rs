//! Back-office login, logout, and the forced credential update.

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

use edureach_core::AdminGate;

use crate::error::clear_sentry_user;
use crate::filters;
use crate::middleware::auth::{
    ADMIN_CREDENTIALS_PATH, ADMIN_HOME_PATH, ADMIN_LOGIN_PATH, denial_code,
    denial_message_for_code,
};
use crate::middleware::{PendingCredentialUpdate, clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::routes::auth::start_session;
use crate::routes::{GENERIC_FAILURE, NoticeQuery, redirect_with_error, redirect_with_notice};
use crate::services::AuthService;
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Back-office login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Credential update form data.
#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
    #[serde(default)]
    pub new_email: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Back-office login page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub notice: Option<String>,
}

/// Credential update page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/credentials.html")]
pub struct CredentialsTemplate {
    pub name: String,
    pub current_email: String,
    pub error: Option<String>,
}

// =============================================================================
// Login
// =============================================================================

/// Display the back-office login page.
///
/// `?error=` carries either a gate denial code or a message.
pub async fn login_page(Query(query): Query<NoticeQuery>) -> impl IntoResponse {
    let error = query.error.map(|e| {
        denial_message_for_code(&e)
            .map(ToOwned::to_owned)
            .unwrap_or(e)
    });
    LoginTemplate {
        error,
        notice: query.notice,
    }
}

/// Handle back-office login.
///
/// Valid credentials without an active admin profile clear the session and
/// return to the login page with the denial message. A pending credential
/// update always comes before the dashboard.
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let auth = AuthService::new(state.pool());
    let login = match auth.admin_sign_in(&form.email, &form.password).await {
        Ok(login) => login,
        Err(e) => {
            tracing::warn!(error = %e, "Admin login failed");
            let message = e.user_message().unwrap_or_else(|| GENERIC_FAILURE.to_string());
            return redirect_with_error(ADMIN_LOGIN_PATH, &message).into_response();
        }
    };

    let target = match login.gate {
        AdminGate::CredentialUpdateRequired => ADMIN_CREDENTIALS_PATH,
        AdminGate::Granted(_) => ADMIN_HOME_PATH,
        denied => {
            if let Err(e) = clear_current_user(&session).await {
                tracing::error!(error = %e, "Failed to clear session");
            }
            tracing::warn!(user_id = %login.user.id, gate = ?denied, "Admin login denied");
            let code = denial_code(denied).unwrap_or("not_admin");
            return Redirect::to(&format!("{ADMIN_LOGIN_PATH}?error={code}")).into_response();
        }
    };

    if let Err(e) = start_session(&session, &login.user).await {
        tracing::error!(error = %e, "Failed to set session");
        return redirect_with_error(ADMIN_LOGIN_PATH, GENERIC_FAILURE).into_response();
    }

    tracing::info!(user_id = %login.user.id, gate = ?login.gate, "Admin signed in");
    Redirect::to(target).into_response()
}

/// Handle back-office logout.
pub async fn logout(session: Session) -> Redirect {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!(error = %e, "Failed to clear session");
    }
    clear_sentry_user();
    redirect_with_notice(ADMIN_LOGIN_PATH, "Signed out")
}

// =============================================================================
// Credential update
// =============================================================================

/// Display the credential update form.
pub async fn credentials_page(PendingCredentialUpdate(admin): PendingCredentialUpdate) -> Response {
    CredentialsTemplate {
        name: admin.profile.name,
        current_email: admin.user.email.into_inner(),
        error: None,
    }
    .into_response()
}

/// Replace the provisioned password (and optionally email).
///
/// On failure the form is shown again with the error and nothing changes.
#[instrument(skip(state, session, admin, form), fields(user_id = %admin.user.id))]
pub async fn update_credentials(
    State(state): State<AppState>,
    session: Session,
    PendingCredentialUpdate(admin): PendingCredentialUpdate,
    Form(form): Form<CredentialsForm>,
) -> Response {
    let auth = AuthService::new(state.pool());
    let result = auth
        .update_admin_credentials(
            admin.user.id,
            &admin.user.email,
            &form.current_password,
            &form.new_password,
            &form.confirm_password,
            &form.new_email,
        )
        .await;

    let email = match result {
        Ok(email) => email,
        Err(e) => {
            let message = e.user_message().unwrap_or_else(|| {
                let event_id = sentry::capture_error(&e);
                tracing::error!(error = %e, sentry_event_id = %event_id, "Credential update failed");
                GENERIC_FAILURE.to_string()
            });
            return CredentialsTemplate {
                name: admin.profile.name,
                current_email: admin.user.email.into_inner(),
                error: Some(message),
            }
            .into_response();
        }
    };

    let current = CurrentUser {
        id: admin.user.id,
        email,
    };
    if let Err(e) = set_current_user(&session, &current).await {
        tracing::error!(error = %e, "Failed to refresh session");
    }

    tracing::info!("Admin credentials updated");
    redirect_with_notice(ADMIN_HOME_PATH, "Credentials updated").into_response()
}
