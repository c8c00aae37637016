//! HTTP middleware stack for the site and back-office.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Session layer (tower-sessions with `PostgreSQL` store)
//! 5. Security headers (CSP, frame denial, etc.)
//! 6. Rate limiting (governor, on sign-in and contact routes only)

pub mod auth;
pub mod rate_limit;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use auth::{
    AdminContext, CurrentViewer, PendingCredentialUpdate, RequireAdmin,
    RequireSuperAdmin, RequireUser, clear_current_user, set_current_user,
};
pub use rate_limit::{auth_rate_limiter, contact_rate_limiter};
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
