//! Back-office dashboard.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use tracing::instrument;

use crate::db::{
    AdminProfileRepository, MessageRepository, ProgramImageRepository, ServiceRepository,
    TestimonialRepository,
};
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::routes::NoticeQuery;
use crate::routes::admin::AdminNav;
use crate::state::AppState;

/// Counts shown on the dashboard.
#[derive(Debug, Clone, Default)]
pub struct DashboardStats {
    pub total_messages: i64,
    pub unread_messages: i64,
    pub services: i64,
    pub testimonials: i64,
    pub program_images: i64,
    /// Only loaded for the super admin.
    pub admins: Option<i64>,
}

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub nav: AdminNav,
    pub stats: DashboardStats,
    pub notice: Option<String>,
}

/// Display the dashboard.
#[instrument(skip(state, admin, query), fields(admin_id = %admin.profile.id))]
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Query(query): Query<NoticeQuery>,
) -> Result<impl IntoResponse> {
    let pool = state.pool();
    let (total_messages, unread_messages) = MessageRepository::new(pool).counts().await?;
    let admins = if admin.role().can_manage_admins() {
        Some(AdminProfileRepository::new(pool).count().await?)
    } else {
        None
    };

    let stats = DashboardStats {
        total_messages,
        unread_messages,
        services: ServiceRepository::new(pool).count().await?,
        testimonials: TestimonialRepository::new(pool).count().await?,
        program_images: ProgramImageRepository::new(pool).count().await?,
        admins,
    };

    Ok(DashboardTemplate {
        nav: AdminNav::new(&admin, "/admin"),
        stats,
        notice: query.notice,
    })
}
