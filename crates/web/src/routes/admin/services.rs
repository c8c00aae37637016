//! Service management.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect},
};
use tracing::instrument;

use edureach_core::{ServiceIcon, ServiceId};

use crate::db::ServiceRepository;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::models::Service;
use crate::routes::admin::AdminNav;
use crate::routes::forms::ServiceForm;
use crate::routes::{NoticeQuery, after_mutation, redirect_with_error};
use crate::state::AppState;

const SERVICES_PATH: &str = "/admin/services";

/// Service list template, with the create form.
#[derive(Template, WebTemplate)]
#[template(path = "admin/services/index.html")]
pub struct ServicesTemplate {
    pub nav: AdminNav,
    pub services: Vec<Service>,
    pub icons: &'static [ServiceIcon],
    pub notice: Option<String>,
    pub error: Option<String>,
}

/// Service edit template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/services/edit.html")]
pub struct EditServiceTemplate {
    pub nav: AdminNav,
    pub service: Service,
    pub icons: &'static [ServiceIcon],
    pub error: Option<String>,
}

/// List all services, newest first.
#[instrument(skip(state, admin, query))]
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Query(query): Query<NoticeQuery>,
) -> Result<impl IntoResponse> {
    let services = ServiceRepository::new(state.pool()).list_all().await?;
    Ok(ServicesTemplate {
        nav: AdminNav::new(&admin, SERVICES_PATH),
        services,
        icons: &ServiceIcon::ALL,
        notice: query.notice,
        error: query.error,
    })
}

/// Create a service.
#[instrument(skip(state))]
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Form(form): Form<ServiceForm>,
) -> Redirect {
    let input = match form.to_input() {
        Ok(input) => input,
        Err(e) => return redirect_with_error(SERVICES_PATH, &e.to_string()),
    };
    let result = ServiceRepository::new(state.pool())
        .create(&input)
        .await
        .map(|_| ());
    after_mutation(SERVICES_PATH, result, "Service created")
}

/// Display the edit form.
///
/// # Errors
///
/// Returns 404 if the service doesn't exist.
#[instrument(skip(state, admin, query))]
pub async fn edit(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<ServiceId>,
    Query(query): Query<NoticeQuery>,
) -> Result<impl IntoResponse> {
    let service = ServiceRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("service".to_string()))?;
    Ok(EditServiceTemplate {
        nav: AdminNav::new(&admin, SERVICES_PATH),
        service,
        icons: &ServiceIcon::ALL,
        error: query.error,
    })
}

/// Update a service.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(id): Path<ServiceId>,
    Form(form): Form<ServiceForm>,
) -> Redirect {
    let input = match form.to_input() {
        Ok(input) => input,
        Err(e) => {
            return redirect_with_error(&format!("{SERVICES_PATH}/{id}/edit"), &e.to_string());
        }
    };
    let result = ServiceRepository::new(state.pool()).update(id, &input).await;
    after_mutation(SERVICES_PATH, result, "Service updated")
}

/// Show or hide a service on the public site.
#[instrument(skip(state))]
pub async fn toggle(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(id): Path<ServiceId>,
) -> Redirect {
    let result = ServiceRepository::new(state.pool()).toggle_active(id).await;
    after_mutation(SERVICES_PATH, result, "Service visibility updated")
}

/// Delete a service.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(id): Path<ServiceId>,
) -> Redirect {
    let result = ServiceRepository::new(state.pool()).delete(id).await;
    after_mutation(SERVICES_PATH, result, "Service deleted")
}
