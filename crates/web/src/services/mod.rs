//! Business logic services for the catalog.
//!
//! # Services
//!
//! - `auth` - Registration and password login
//!
//! Product creation has no logic beyond validation, so product handlers
//! talk to [`crate::db::ProductRepository`] directly.

pub mod auth;
