//! Landing page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use tracing::instrument;

use edureach_core::Viewer;

use crate::db::blog_posts::LATEST_POSTS_LIMIT;
use crate::db::{
    BlogPostRepository, ProgramImageRepository, ServiceRepository, TestimonialRepository,
    UserTestimonialRepository,
};
use crate::error::Result;
use crate::filters;
use crate::middleware::CurrentViewer;
use crate::models::content::TestimonialCard;
use crate::models::{BlogPost, ProgramImage, Service};
use crate::routes::NoticeQuery;
use crate::state::AppState;

/// Landing page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub viewer: Viewer,
    pub services: Vec<Service>,
    pub program_images: Vec<ProgramImage>,
    pub testimonials: Vec<TestimonialCard>,
    pub posts: Vec<BlogPost>,
    pub notice: Option<String>,
    pub error: Option<String>,
}

/// Display the landing page.
///
/// Every section shows active rows only. Testimonials combine the curated
/// list with active user testimonials.
#[instrument(skip(state, viewer, query))]
pub async fn home(
    State(state): State<AppState>,
    viewer: CurrentViewer,
    Query(query): Query<NoticeQuery>,
) -> Result<impl IntoResponse> {
    let pool = state.pool();

    let services = ServiceRepository::new(pool).list_active().await?;
    let program_images = ProgramImageRepository::new(pool).list_active().await?;
    let posts = BlogPostRepository::new(pool)
        .list_latest_active(LATEST_POSTS_LIMIT)
        .await?;

    let mut testimonials: Vec<TestimonialCard> = TestimonialRepository::new(pool)
        .list_active()
        .await?
        .into_iter()
        .map(TestimonialCard::from)
        .collect();
    testimonials.extend(
        UserTestimonialRepository::new(pool)
            .list_active()
            .await?
            .into_iter()
            .map(TestimonialCard::from),
    );

    Ok(HomeTemplate {
        viewer: viewer.viewer,
        services,
        program_images,
        testimonials,
        posts,
        notice: query.notice,
        error: query.error,
    })
}
