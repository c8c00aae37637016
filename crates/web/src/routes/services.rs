//! Service detail route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use tracing::instrument;

use edureach_core::{ServiceId, Viewer};

use crate::db::ServiceRepository;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::CurrentViewer;
use crate::models::Service;
use crate::state::AppState;

/// Service detail template.
#[derive(Template, WebTemplate)]
#[template(path = "services/show.html")]
pub struct ServiceShowTemplate {
    pub viewer: Viewer,
    pub service: Service,
}

/// Display an active service.
///
/// # Errors
///
/// Returns 404 if the service doesn't exist or is inactive.
#[instrument(skip(state, viewer))]
pub async fn show(
    State(state): State<AppState>,
    viewer: CurrentViewer,
    Path(id): Path<ServiceId>,
) -> Result<impl IntoResponse> {
    let service = ServiceRepository::new(state.pool())
        .get_active(id)
        .await?
        .ok_or_else(|| AppError::NotFound("service".to_string()))?;

    Ok(ServiceShowTemplate {
        viewer: viewer.viewer,
        service,
    })
}
