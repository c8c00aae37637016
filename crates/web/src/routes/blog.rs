//! Blog route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect};
use tracing::instrument;

use edureach_core::{BlogPostId, Viewer};

use crate::db::BlogPostRepository;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::CurrentViewer;
use crate::models::BlogPost;
use crate::state::AppState;

/// Blog post detail template.
#[derive(Template, WebTemplate)]
#[template(path = "blog/show.html")]
pub struct BlogShowTemplate {
    pub viewer: Viewer,
    pub post: BlogPost,
}

/// Display an active blog post and count the view.
///
/// # Errors
///
/// Returns 404 if the post doesn't exist or is inactive.
#[instrument(skip(state, viewer))]
pub async fn show(
    State(state): State<AppState>,
    viewer: CurrentViewer,
    Path(id): Path<BlogPostId>,
) -> Result<impl IntoResponse> {
    let post = BlogPostRepository::new(state.pool())
        .record_view(id)
        .await?
        .ok_or_else(|| AppError::NotFound("blog post".to_string()))?;

    Ok(BlogShowTemplate {
        viewer: viewer.viewer,
        post,
    })
}

/// Like an active blog post.
///
/// # Errors
///
/// Returns 404 if the post doesn't exist or is inactive.
#[instrument(skip(state))]
pub async fn like(
    State(state): State<AppState>,
    Path(id): Path<BlogPostId>,
) -> Result<Redirect> {
    BlogPostRepository::new(state.pool()).record_like(id).await?;
    Ok(Redirect::to(&format!("/blog/{id}")))
}
