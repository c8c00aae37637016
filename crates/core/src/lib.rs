//! EduReach Core - Shared domain types.
//!
//! This crate provides the types used across the EduReach components:
//! - `web` - Public marketing site and `/admin` back-office
//! - `cli` - Command-line tools for migrations, admin bootstrap, and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure rules - no I/O, no database
//! access, no HTTP clients. Access decisions (who may see the back-office,
//! who may manage admin accounts) live here so they can be tested without
//! a server.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, emails, ratings, service icons, and statuses
//! - [`access`] - Viewer classification and admin gate decisions
//! - [`credentials`] - Credential-update validation rules

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod access;
pub mod credentials;
pub mod types;

pub use access::*;
pub use credentials::{
    CredentialError, CredentialUpdate, MIN_PASSWORD_LENGTH, check_password_length,
};
pub use types::*;
