//! Catalog web application library.
//!
//! The binary in `main.rs` is a thin wrapper around [`routes::app`], which
//! lets the integration tests drive the same router in-process.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
