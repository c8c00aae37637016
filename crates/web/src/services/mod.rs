//! Business services layered over the repositories.

pub mod auth;
pub mod consultation;
pub mod email;

pub use auth::{AuthError, AuthService};
pub use consultation::{ConsultationRequest, ConsultationService};
pub use email::EmailService;
