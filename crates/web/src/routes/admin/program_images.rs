//! Program image gallery management.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect},
};
use tracing::instrument;

use edureach_core::ProgramImageId;

use crate::db::ProgramImageRepository;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::models::ProgramImage;
use crate::routes::admin::AdminNav;
use crate::routes::forms::ProgramImageForm;
use crate::routes::{NoticeQuery, after_mutation, redirect_with_error};
use crate::state::AppState;

const PROGRAM_IMAGES_PATH: &str = "/admin/program-images";

/// Program image list template, with the create form.
#[derive(Template, WebTemplate)]
#[template(path = "admin/program_images/index.html")]
pub struct ProgramImagesTemplate {
    pub nav: AdminNav,
    pub images: Vec<ProgramImage>,
    pub notice: Option<String>,
    pub error: Option<String>,
}

/// Program image edit template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/program_images/edit.html")]
pub struct EditProgramImageTemplate {
    pub nav: AdminNav,
    pub image: ProgramImage,
    pub error: Option<String>,
}

#[instrument(skip(state, admin, query))]
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Query(query): Query<NoticeQuery>,
) -> Result<impl IntoResponse> {
    let images = ProgramImageRepository::new(state.pool()).list_all().await?;
    Ok(ProgramImagesTemplate {
        nav: AdminNav::new(&admin, PROGRAM_IMAGES_PATH),
        images,
        notice: query.notice,
        error: query.error,
    })
}

#[instrument(skip(state))]
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Form(form): Form<ProgramImageForm>,
) -> Redirect {
    let input = match form.to_input() {
        Ok(input) => input,
        Err(e) => return redirect_with_error(PROGRAM_IMAGES_PATH, &e.to_string()),
    };
    let result = ProgramImageRepository::new(state.pool())
        .create(&input)
        .await
        .map(|_| ());
    after_mutation(PROGRAM_IMAGES_PATH, result, "Program image added")
}

/// # Errors
///
/// Returns 404 if the image doesn't exist.
#[instrument(skip(state, admin, query))]
pub async fn edit(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<ProgramImageId>,
    Query(query): Query<NoticeQuery>,
) -> Result<impl IntoResponse> {
    let image = ProgramImageRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("program image".to_string()))?;
    Ok(EditProgramImageTemplate {
        nav: AdminNav::new(&admin, PROGRAM_IMAGES_PATH),
        image,
        error: query.error,
    })
}

#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(id): Path<ProgramImageId>,
    Form(form): Form<ProgramImageForm>,
) -> Redirect {
    let input = match form.to_input() {
        Ok(input) => input,
        Err(e) => {
            return redirect_with_error(
                &format!("{PROGRAM_IMAGES_PATH}/{id}/edit"),
                &e.to_string(),
            );
        }
    };
    let result = ProgramImageRepository::new(state.pool())
        .update(id, &input)
        .await;
    after_mutation(PROGRAM_IMAGES_PATH, result, "Program image updated")
}

#[instrument(skip(state))]
pub async fn toggle(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(id): Path<ProgramImageId>,
) -> Redirect {
    let result = ProgramImageRepository::new(state.pool())
        .toggle_active(id)
        .await;
    after_mutation(PROGRAM_IMAGES_PATH, result, "Program image visibility updated")
}

#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(id): Path<ProgramImageId>,
) -> Redirect {
    let result = ProgramImageRepository::new(state.pool()).delete(id).await;
    after_mutation(PROGRAM_IMAGES_PATH, result, "Program image deleted")
}
