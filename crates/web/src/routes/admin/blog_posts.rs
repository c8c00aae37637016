//! Blog post management.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect},
};
use tracing::instrument;

use edureach_core::BlogPostId;

use crate::db::BlogPostRepository;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::models::BlogPost;
use crate::routes::admin::AdminNav;
use crate::routes::forms::BlogPostForm;
use crate::routes::{NoticeQuery, after_mutation, redirect_with_error};
use crate::state::AppState;

const BLOG_POSTS_PATH: &str = "/admin/blog-posts";

/// Blog post list template, with the create form.
#[derive(Template, WebTemplate)]
#[template(path = "admin/blog_posts/index.html")]
pub struct BlogPostsTemplate {
    pub nav: AdminNav,
    pub posts: Vec<BlogPost>,
    pub notice: Option<String>,
    pub error: Option<String>,
}

/// Blog post edit template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/blog_posts/edit.html")]
pub struct EditBlogPostTemplate {
    pub nav: AdminNav,
    pub post: BlogPost,
    pub error: Option<String>,
}

/// List all posts, newest first, with view and like counts.
#[instrument(skip(state, admin, query))]
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Query(query): Query<NoticeQuery>,
) -> Result<impl IntoResponse> {
    let posts = BlogPostRepository::new(state.pool()).list_all().await?;
    Ok(BlogPostsTemplate {
        nav: AdminNav::new(&admin, BLOG_POSTS_PATH),
        posts,
        notice: query.notice,
        error: query.error,
    })
}

/// Create a post.
#[instrument(skip(state, form))]
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Form(form): Form<BlogPostForm>,
) -> Redirect {
    let input = match form.to_input() {
        Ok(input) => input,
        Err(e) => return redirect_with_error(BLOG_POSTS_PATH, &e.to_string()),
    };
    let result = BlogPostRepository::new(state.pool())
        .create(&input)
        .await
        .map(|post| tracing::info!(post_id = %post.id, "Blog post created"));
    after_mutation(BLOG_POSTS_PATH, result, "Blog post created")
}

/// Display the edit form.
///
/// # Errors
///
/// Returns 404 if the post doesn't exist.
#[instrument(skip(state, admin, query))]
pub async fn edit(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<BlogPostId>,
    Query(query): Query<NoticeQuery>,
) -> Result<impl IntoResponse> {
    let post = BlogPostRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("blog post".to_string()))?;
    Ok(EditBlogPostTemplate {
        nav: AdminNav::new(&admin, BLOG_POSTS_PATH),
        post,
        error: query.error,
    })
}

/// Update a post. View and like counts are left alone.
#[instrument(skip(state, form))]
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(id): Path<BlogPostId>,
    Form(form): Form<BlogPostForm>,
) -> Redirect {
    let input = match form.to_input() {
        Ok(input) => input,
        Err(e) => {
            return redirect_with_error(&format!("{BLOG_POSTS_PATH}/{id}/edit"), &e.to_string());
        }
    };
    let result = BlogPostRepository::new(state.pool()).update(id, &input).await;
    after_mutation(BLOG_POSTS_PATH, result, "Blog post updated")
}

/// Publish or unpublish a post.
#[instrument(skip(state))]
pub async fn toggle(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(id): Path<BlogPostId>,
) -> Redirect {
    let result = BlogPostRepository::new(state.pool()).toggle_active(id).await;
    after_mutation(BLOG_POSTS_PATH, result, "Blog post visibility updated")
}

/// Delete a post.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(id): Path<BlogPostId>,
) -> Redirect {
    let result = BlogPostRepository::new(state.pool()).delete(id).await;
    after_mutation(BLOG_POSTS_PATH, result, "Blog post deleted")
}
