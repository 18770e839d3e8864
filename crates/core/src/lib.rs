//! Catalog Core - Shared domain types.
//!
//! This crate provides the validated types used by the catalog web application:
//! - [`Username`] - account names, validated before they reach the database
//! - [`ProductName`] - display names for catalog entries
//! - [`Price`] - non-negative decimal prices with at most two fractional digits
//! - [`UserId`] / [`ProductId`] - type-safe row identifiers
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP. Parsing happens here so that storage never sees malformed input.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
