//! Core types for EduReach.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod icon;
pub mod id;
pub mod rating;
pub mod status;

pub use email::{Email, EmailError};
pub use icon::ServiceIcon;
pub use id::*;
pub use rating::{Rating, RatingError};
pub use status::*;
