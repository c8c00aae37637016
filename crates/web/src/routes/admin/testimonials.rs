//! Curated testimonial management.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect},
};
use tracing::instrument;

use edureach_core::TestimonialId;

use crate::db::TestimonialRepository;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::models::Testimonial;
use crate::routes::admin::AdminNav;
use crate::routes::forms::TestimonialForm;
use crate::routes::{NoticeQuery, after_mutation, redirect_with_error};
use crate::state::AppState;

const TESTIMONIALS_PATH: &str = "/admin/testimonials";

/// Testimonial list template, with the create form.
#[derive(Template, WebTemplate)]
#[template(path = "admin/testimonials/index.html")]
pub struct TestimonialsTemplate {
    pub nav: AdminNav,
    pub testimonials: Vec<Testimonial>,
    pub notice: Option<String>,
    pub error: Option<String>,
}

/// Testimonial edit template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/testimonials/edit.html")]
pub struct EditTestimonialTemplate {
    pub nav: AdminNav,
    pub testimonial: Testimonial,
    pub error: Option<String>,
}

/// List all curated testimonials, newest first.
#[instrument(skip(state, admin, query))]
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Query(query): Query<NoticeQuery>,
) -> Result<impl IntoResponse> {
    let testimonials = TestimonialRepository::new(state.pool()).list_all().await?;
    Ok(TestimonialsTemplate {
        nav: AdminNav::new(&admin, TESTIMONIALS_PATH),
        testimonials,
        notice: query.notice,
        error: query.error,
    })
}

/// Create a testimonial.
#[instrument(skip(state))]
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Form(form): Form<TestimonialForm>,
) -> Redirect {
    let input = match form.to_input() {
        Ok(input) => input,
        Err(e) => return redirect_with_error(TESTIMONIALS_PATH, &e.to_string()),
    };
    let result = TestimonialRepository::new(state.pool())
        .create(&input)
        .await
        .map(|_| ());
    after_mutation(TESTIMONIALS_PATH, result, "Testimonial created")
}

/// Display the edit form.
///
/// # Errors
///
/// Returns 404 if the testimonial doesn't exist.
#[instrument(skip(state, admin, query))]
pub async fn edit(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<TestimonialId>,
    Query(query): Query<NoticeQuery>,
) -> Result<impl IntoResponse> {
    let testimonial = TestimonialRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("testimonial".to_string()))?;
    Ok(EditTestimonialTemplate {
        nav: AdminNav::new(&admin, TESTIMONIALS_PATH),
        testimonial,
        error: query.error,
    })
}

/// Update a testimonial.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(id): Path<TestimonialId>,
    Form(form): Form<TestimonialForm>,
) -> Redirect {
    let input = match form.to_input() {
        Ok(input) => input,
        Err(e) => {
            return redirect_with_error(&format!("{TESTIMONIALS_PATH}/{id}/edit"), &e.to_string());
        }
    };
    let result = TestimonialRepository::new(state.pool())
        .update(id, &input)
        .await;
    after_mutation(TESTIMONIALS_PATH, result, "Testimonial updated")
}

/// Show or hide a testimonial on the landing page.
#[instrument(skip(state))]
pub async fn toggle(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(id): Path<TestimonialId>,
) -> Redirect {
    let result = TestimonialRepository::new(state.pool())
        .toggle_active(id)
        .await;
    after_mutation(TESTIMONIALS_PATH, result, "Testimonial visibility updated")
}

/// Delete a testimonial.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(id): Path<TestimonialId>,
) -> Redirect {
    let result = TestimonialRepository::new(state.pool()).delete(id).await;
    after_mutation(TESTIMONIALS_PATH, result, "Testimonial deleted")
}
