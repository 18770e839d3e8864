//! Core types for the catalog.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod product_name;
pub mod username;

pub use id::*;
pub use price::{Price, PriceError};
pub use product_name::{ProductName, ProductNameError};
pub use username::{Username, UsernameError};
