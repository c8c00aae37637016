//! Back-office route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /admin/login                        - Login page (mounted with the auth actions)
//! POST /admin/login                        - Login action
//! POST /admin/logout                       - Logout action
//! GET  /admin/credentials                  - Forced credential update form
//! POST /admin/credentials                  - Credential update action
//! GET  /admin                              - Dashboard stats
//!
//! # Content (same shape for each resource)
//! GET  /admin/{resource}                   - List with create form
//! POST /admin/{resource}                   - Create
//! GET  /admin/{resource}/{id}/edit         - Edit form
//! POST /admin/{resource}/{id}              - Update
//! POST /admin/{resource}/{id}/toggle       - Toggle active
//! POST /admin/{resource}/{id}/delete       - Delete
//!
//! resource = services | testimonials | blog-posts | program-images
//!
//! # Inbox
//! GET  /admin/messages                     - Messages, newest first
//! POST /admin/messages/{id}/status         - Mark read/unread
//! POST /admin/messages/{id}/delete         - Delete
//!
//! # Admin accounts (super admin only)
//! GET  /admin/admins                       - Admin list with create form
//! POST /admin/admins                       - Create admin
//! POST /admin/admins/{id}/toggle           - Activate/deactivate
//! POST /admin/admins/{id}/delete           - Delete
//!
//! # Own profile
//! GET  /admin/profile                      - Profile form
//! POST /admin/profile                      - Update name, email, avatar
//! ```

pub mod admins;
pub mod auth;
pub mod blog_posts;
pub mod dashboard;
pub mod messages;
pub mod profile;
pub mod program_images;
pub mod services;
pub mod testimonials;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::AdminContext;
use crate::state::AppState;

/// Signed-in admin shown in the back-office chrome.
#[derive(Debug, Clone)]
pub struct AdminNav {
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    /// Shows the "Admin Management" link.
    pub is_super_admin: bool,
    pub current_path: &'static str,
}

impl AdminNav {
    #[must_use]
    pub fn new(admin: &AdminContext, current_path: &'static str) -> Self {
        Self {
            name: admin.profile.name.clone(),
            email: admin.profile.email.clone(),
            avatar_url: admin.profile.avatar_url.clone(),
            is_super_admin: admin.is_super_admin(),
            current_path,
        }
    }

    /// Whether a nav link points at the current section.
    #[must_use]
    pub fn is_current(&self, path: &str) -> bool {
        if path == "/admin" {
            return self.current_path == path;
        }
        self.current_path.starts_with(path)
    }
}

/// Create the content routes for one resource.
macro_rules! content_routes {
    ($module:ident) => {
        Router::new()
            .route("/", get($module::index).post($module::create))
            .route("/{id}", post($module::update))
            .route("/{id}/edit", get($module::edit))
            .route("/{id}/toggle", post($module::toggle))
            .route("/{id}/delete", post($module::delete))
    };
}

/// Create the inbox routes router.
pub fn message_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(messages::index))
        .route("/{id}/status", post(messages::set_status))
        .route("/{id}/delete", post(messages::delete))
}

/// Create the admin account routes router.
pub fn admin_account_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(admins::index).post(admins::create))
        .route("/{id}/toggle", post(admins::toggle))
        .route("/{id}/delete", post(admins::delete))
}

/// Create all back-office routes, nested under `/admin`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::index))
        .route("/logout", post(auth::logout))
        .route(
            "/credentials",
            get(auth::credentials_page).post(auth::update_credentials),
        )
        .route("/profile", get(profile::index).post(profile::update))
        .nest("/services", content_routes!(services))
        .nest("/testimonials", content_routes!(testimonials))
        .nest("/blog-posts", content_routes!(blog_posts))
        .nest("/program-images", content_routes!(program_images))
        .nest("/messages", message_routes())
        .nest("/admins", admin_account_routes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nav(current_path: &'static str) -> AdminNav {
        AdminNav {
            name: "Ops".to_string(),
            email: "ops@edureach.test".to_string(),
            avatar_url: None,
            is_super_admin: false,
            current_path,
        }
    }

    #[test]
    fn test_dashboard_link_only_matches_exactly() {
        assert!(nav("/admin").is_current("/admin"));
        assert!(!nav("/admin/services").is_current("/admin"));
    }

    #[test]
    fn test_section_link_matches_prefix() {
        assert!(nav("/admin/services").is_current("/admin/services"));
        assert!(!nav("/admin/messages").is_current("/admin/services"));
    }
}
