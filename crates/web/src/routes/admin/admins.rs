//! Admin account management. Super admin only.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tracing::instrument;

use edureach_core::{AdminAccountAction, AdminProfileId, authorize_admin_account_action};

use crate::db::AdminProfileRepository;
use crate::error::Result;
use crate::filters;
use crate::middleware::{AdminContext, RequireSuperAdmin};
use crate::models::AdminProfile;
use crate::routes::admin::AdminNav;
use crate::routes::{
    GENERIC_FAILURE, NoticeQuery, after_mutation, redirect_with_error, redirect_with_notice,
};
use crate::services::AuthService;
use crate::state::AppState;

const ADMINS_PATH: &str = "/admin/admins";

/// New admin form data.
#[derive(Debug, Deserialize)]
pub struct CreateAdminForm {
    pub email: String,
    #[serde(default)]
    pub name: String,
    pub password: String,
}

/// Admin account list template, with the create form.
#[derive(Template, WebTemplate)]
#[template(path = "admin/admins.html")]
pub struct AdminsTemplate {
    pub nav: AdminNav,
    pub admins: Vec<AdminProfile>,
    pub notice: Option<String>,
    pub error: Option<String>,
}

/// List every admin profile.
#[instrument(skip(state, admin, query))]
pub async fn index(
    State(state): State<AppState>,
    RequireSuperAdmin(admin): RequireSuperAdmin,
    Query(query): Query<NoticeQuery>,
) -> Result<impl IntoResponse> {
    let admins = AdminProfileRepository::new(state.pool()).list().await?;
    Ok(AdminsTemplate {
        nav: AdminNav::new(&admin, ADMINS_PATH),
        admins,
        notice: query.notice,
        error: query.error,
    })
}

/// Provision a regular admin with an identity and a temporary password.
///
/// The new admin must replace the password on first login.
#[instrument(skip(state, admin, form), fields(email = %form.email))]
pub async fn create(
    State(state): State<AppState>,
    RequireSuperAdmin(admin): RequireSuperAdmin,
    Form(form): Form<CreateAdminForm>,
) -> Redirect {
    let auth = AuthService::new(state.pool());
    match auth
        .create_admin(admin.role(), &form.email, &form.name, &form.password)
        .await
    {
        Ok(created) => {
            tracing::info!(admin_id = %created.id, by = %admin.profile.id, "Admin created");
            redirect_with_notice(ADMINS_PATH, "Admin created")
        }
        Err(e) => {
            let message = e.user_message().unwrap_or_else(|| {
                let event_id = sentry::capture_error(&e);
                tracing::error!(error = %e, sentry_event_id = %event_id, "Admin creation failed");
                GENERIC_FAILURE.to_string()
            });
            redirect_with_error(ADMINS_PATH, &message)
        }
    }
}

/// Activate or deactivate a regular admin.
#[instrument(skip(state, admin))]
pub async fn toggle(
    State(state): State<AppState>,
    RequireSuperAdmin(admin): RequireSuperAdmin,
    Path(id): Path<AdminProfileId>,
) -> Redirect {
    let repo = AdminProfileRepository::new(state.pool());
    if let Err(redirect) = check_target(&repo, &admin, id, AdminAccountAction::ToggleActive).await {
        return redirect;
    }
    let result = repo.toggle_active(id).await;
    if result.is_ok() {
        tracing::info!(target_id = %id, by = %admin.profile.id, "Admin status toggled");
    }
    after_mutation(ADMINS_PATH, result, "Admin status updated")
}

/// Delete a regular admin's profile. The identity stays as a plain user.
#[instrument(skip(state, admin))]
pub async fn delete(
    State(state): State<AppState>,
    RequireSuperAdmin(admin): RequireSuperAdmin,
    Path(id): Path<AdminProfileId>,
) -> Redirect {
    let repo = AdminProfileRepository::new(state.pool());
    if let Err(redirect) = check_target(&repo, &admin, id, AdminAccountAction::Delete).await {
        return redirect;
    }
    let result = repo.delete(id).await;
    if result.is_ok() {
        tracing::info!(target_id = %id, by = %admin.profile.id, "Admin deleted");
    }
    after_mutation(ADMINS_PATH, result, "Admin deleted")
}

/// Look up the target account and check the action against it.
async fn check_target(
    repo: &AdminProfileRepository<'_>,
    admin: &AdminContext,
    id: AdminProfileId,
    action: AdminAccountAction,
) -> std::result::Result<(), Redirect> {
    let target = match repo.get_by_id(id).await {
        Ok(Some(target)) => target,
        Ok(None) => return Err(redirect_with_error(ADMINS_PATH, "Item not found")),
        Err(e) => return Err(after_mutation(ADMINS_PATH, Err(e), "")),
    };

    authorize_admin_account_action(admin.role(), action, target.is_super_admin).map_err(|e| {
        tracing::warn!(target_id = %id, action = ?action, "Admin account action refused");
        redirect_with_error(ADMINS_PATH, &e.to_string())
    })
}
