//! Signed-in user profile and own-testimonial management.
//!
//! Every testimonial query is scoped to the signed-in user, so a user can
//! only see and change their own rows.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use tracing::instrument;

use edureach_core::{UserTestimonialId, Viewer};

use crate::db::{UserRepository, UserTestimonialRepository};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::{CurrentViewer, RequireUser};
use crate::models::{User, UserTestimonial};
use crate::routes::forms::TestimonialForm;
use crate::routes::{NoticeQuery, after_mutation, redirect_with_error};
use crate::state::AppState;

const PROFILE_PATH: &str = "/profile";

/// Profile page template.
#[derive(Template, WebTemplate)]
#[template(path = "profile/index.html")]
pub struct ProfileTemplate {
    pub viewer: Viewer,
    pub user: User,
    pub testimonials: Vec<UserTestimonial>,
    pub notice: Option<String>,
    pub error: Option<String>,
}

/// Own testimonial edit template.
#[derive(Template, WebTemplate)]
#[template(path = "profile/edit_testimonial.html")]
pub struct EditTestimonialTemplate {
    pub viewer: Viewer,
    pub testimonial: UserTestimonial,
    pub error: Option<String>,
}

/// Display the profile page.
#[instrument(skip(state, viewer, query), fields(user_id = %current.id))]
pub async fn index(
    State(state): State<AppState>,
    RequireUser(current): RequireUser,
    viewer: CurrentViewer,
    Query(query): Query<NoticeQuery>,
) -> Result<impl IntoResponse> {
    let user = UserRepository::new(state.pool())
        .get_by_id(current.id)
        .await?
        .ok_or_else(|| AppError::NotFound("account".to_string()))?;
    let testimonials = UserTestimonialRepository::new(state.pool())
        .list_for_user(current.id)
        .await?;

    Ok(ProfileTemplate {
        viewer: viewer.viewer,
        user,
        testimonials,
        notice: query.notice,
        error: query.error,
    })
}

/// Create a testimonial owned by the signed-in user.
#[instrument(skip(state, form), fields(user_id = %current.id))]
pub async fn create_testimonial(
    State(state): State<AppState>,
    RequireUser(current): RequireUser,
    Form(form): Form<TestimonialForm>,
) -> Redirect {
    let input = match form.to_input() {
        Ok(input) => input,
        Err(e) => return redirect_with_error(PROFILE_PATH, &e.to_string()),
    };
    let result = UserTestimonialRepository::new(state.pool())
        .create(current.id, &input)
        .await
        .map(|_| ());
    after_mutation(PROFILE_PATH, result, "Testimonial added")
}

/// Display the edit form for one of the user's testimonials.
///
/// # Errors
///
/// Returns 404 if the user owns no testimonial with this ID.
#[instrument(skip(state, viewer, query), fields(user_id = %current.id))]
pub async fn edit_testimonial(
    State(state): State<AppState>,
    RequireUser(current): RequireUser,
    viewer: CurrentViewer,
    Path(id): Path<UserTestimonialId>,
    Query(query): Query<NoticeQuery>,
) -> Result<Response> {
    let testimonial = UserTestimonialRepository::new(state.pool())
        .get_for_user(current.id, id)
        .await?
        .ok_or_else(|| AppError::NotFound("testimonial".to_string()))?;

    Ok(EditTestimonialTemplate {
        viewer: viewer.viewer,
        testimonial,
        error: query.error,
    }
    .into_response())
}

/// Update one of the user's testimonials.
#[instrument(skip(state, form), fields(user_id = %current.id))]
pub async fn update_testimonial(
    State(state): State<AppState>,
    RequireUser(current): RequireUser,
    Path(id): Path<UserTestimonialId>,
    Form(form): Form<TestimonialForm>,
) -> Redirect {
    let input = match form.to_input() {
        Ok(input) => input,
        Err(e) => {
            return redirect_with_error(
                &format!("{PROFILE_PATH}/testimonials/{id}/edit"),
                &e.to_string(),
            );
        }
    };
    let result = UserTestimonialRepository::new(state.pool())
        .update(current.id, id, &input)
        .await;
    after_mutation(PROFILE_PATH, result, "Testimonial updated")
}

/// Show or hide one of the user's testimonials.
#[instrument(skip(state), fields(user_id = %current.id))]
pub async fn toggle_testimonial(
    State(state): State<AppState>,
    RequireUser(current): RequireUser,
    Path(id): Path<UserTestimonialId>,
) -> Redirect {
    let result = UserTestimonialRepository::new(state.pool())
        .toggle_active(current.id, id)
        .await;
    after_mutation(PROFILE_PATH, result, "Testimonial visibility updated")
}

/// Delete one of the user's testimonials.
#[instrument(skip(state), fields(user_id = %current.id))]
pub async fn delete_testimonial(
    State(state): State<AppState>,
    RequireUser(current): RequireUser,
    Path(id): Path<UserTestimonialId>,
) -> Redirect {
    let result = UserTestimonialRepository::new(state.pool())
        .delete(current.id, id)
        .await;
    after_mutation(PROFILE_PATH, result, "Testimonial deleted")
}
