//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                                   - Landing page
//! GET  /services/{id}                      - Service detail
//! GET  /blog/{id}                          - Blog post (counts a view)
//! POST /blog/{id}/like                     - Like a blog post
//! POST /contact                            - Consultation form (redirects to /#contact)
//! POST /api/consultation                   - Consultation request (JSON)
//!
//! # Auth
//! GET  /auth/sign-up                       - Sign-up page
//! POST /auth/sign-up                       - Sign-up action
//! GET  /auth/sign-in                       - Sign-in page
//! POST /auth/sign-in                       - Sign-in action
//! POST /auth/sign-out                      - Sign-out action
//!
//! # Profile (signed in)
//! GET  /profile                            - Account info and own testimonials
//! POST /profile/testimonials               - Create testimonial
//! GET  /profile/testimonials/{id}/edit     - Edit form
//! POST /profile/testimonials/{id}          - Update
//! POST /profile/testimonials/{id}/toggle   - Toggle active
//! POST /profile/testimonials/{id}/delete   - Delete
//!
//! # Back-office (see `admin`)
//! /admin/...
//! ```

pub mod admin;
pub mod auth;
pub mod blog;
pub mod contact;
pub mod forms;
pub mod home;
pub mod profile;
pub mod services;

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};
use serde::Deserialize;

use crate::db::RepositoryError;
use crate::middleware::{auth_rate_limiter, contact_rate_limiter};
use crate::state::AppState;

// =============================================================================
// Notices
// =============================================================================

/// Inline notice carried across a redirect in the query string.
#[derive(Debug, Default, Deserialize)]
pub struct NoticeQuery {
    pub notice: Option<String>,
    pub error: Option<String>,
}

/// Redirect to `target` with a success notice.
///
/// A `#fragment` in `target` is kept after the query string.
#[must_use]
pub fn redirect_with_notice(target: &str, message: &str) -> Redirect {
    Redirect::to(&with_query(target, "notice", message))
}

/// Redirect to `target` with an error notice.
#[must_use]
pub fn redirect_with_error(target: &str, message: &str) -> Redirect {
    Redirect::to(&with_query(target, "error", message))
}

fn with_query(target: &str, key: &str, message: &str) -> String {
    let (path, fragment) = target
        .split_once('#')
        .map_or((target, None), |(p, f)| (p, Some(f)));
    let mut url = format!("{path}?{key}={}", urlencoding::encode(message));
    if let Some(fragment) = fragment {
        url.push('#');
        url.push_str(fragment);
    }
    url
}

/// Message shown when a mutation fails server-side.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Redirect back to a list after a mutation, with a notice or an error.
///
/// Database failures are reported to Sentry and shown generically.
#[must_use]
pub fn after_mutation(
    target: &str,
    result: Result<(), RepositoryError>,
    success: &str,
) -> Redirect {
    match result {
        Ok(()) => redirect_with_notice(target, success),
        Err(RepositoryError::NotFound) => redirect_with_error(target, "Item not found"),
        Err(RepositoryError::Conflict(what)) => redirect_with_error(target, &format!("That {what}")),
        Err(e) => {
            let event_id = sentry::capture_error(&e);
            tracing::error!(error = %e, sentry_event_id = %event_id, "Mutation failed");
            redirect_with_error(target, GENERIC_FAILURE)
        }
    }
}

/// HTML checkbox value: present means checked.
#[must_use]
pub fn is_checked(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty() && v != "false" && v != "off")
}

// =============================================================================
// Routers
// =============================================================================

/// Create the sign-in pages.
pub fn auth_pages() -> Router<AppState> {
    Router::new()
        .route("/auth/sign-up", get(auth::sign_up_page))
        .route("/auth/sign-in", get(auth::sign_in_page))
        .route("/auth/sign-out", post(auth::sign_out))
        .route("/admin/login", get(admin::auth::login_page))
}

/// Create the credential-checking actions, rate limited per client IP.
pub fn auth_actions() -> Router<AppState> {
    Router::new()
        .route("/auth/sign-up", post(auth::sign_up))
        .route("/auth/sign-in", post(auth::sign_in))
        .route("/admin/login", post(admin::auth::login))
        .layer(auth_rate_limiter())
}

/// Create the profile routes router.
pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(profile::index))
        .route("/testimonials", post(profile::create_testimonial))
        .route("/testimonials/{id}", post(profile::update_testimonial))
        .route("/testimonials/{id}/edit", get(profile::edit_testimonial))
        .route("/testimonials/{id}/toggle", post(profile::toggle_testimonial))
        .route("/testimonials/{id}/delete", post(profile::delete_testimonial))
}

/// Create the consultation intake routes, rate limited per client IP.
pub fn contact_routes() -> Router<AppState> {
    Router::new()
        .route("/contact", post(contact::submit_form))
        .route("/api/consultation", post(contact::submit_json))
        .layer(contact_rate_limiter())
}

/// Create all routes for the site and back-office.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/services/{id}", get(services::show))
        .route("/blog/{id}", get(blog::show))
        .route("/blog/{id}/like", post(blog::like))
        .merge(contact_routes())
        .merge(auth_pages())
        .merge(auth_actions())
        .nest("/profile", profile_routes())
        .nest("/admin", admin::routes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_query_encodes_message() {
        assert_eq!(
            with_query("/admin/services", "notice", "Service created"),
            "/admin/services?notice=Service%20created"
        );
    }

    #[test]
    fn test_with_query_keeps_fragment() {
        assert_eq!(
            with_query("/#contact", "error", "Please fill in all required fields"),
            "/?error=Please%20fill%20in%20all%20required%20fields#contact"
        );
    }

    #[test]
    fn test_is_checked() {
        assert!(is_checked(Some("on")));
        assert!(is_checked(Some("true")));
        assert!(!is_checked(Some("off")));
        assert!(!is_checked(Some("")));
        assert!(!is_checked(None));
    }
}
