//! Domain models for the site and back-office.

pub mod admin_profile;
pub mod content;
pub mod message;
pub mod session;
pub mod user;

pub use admin_profile::AdminProfile;
pub use content::{BlogPost, ProgramImage, Service, Testimonial, UserTestimonial};
pub use message::UserMessage;
pub use session::CurrentUser;
pub use user::User;
