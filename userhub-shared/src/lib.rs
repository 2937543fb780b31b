//! # Userhub Shared Library
//!
//! Data access for the Userhub API: connection pooling, schema migrations,
//! table models and pagination.
//!
//! ## Module Organization
//!
//! - `db`: connection pool and migrations
//! - `models`: users, locations and ads
//! - `pagination`: page-number resolution for list endpoints

pub mod db;
pub mod models;
pub mod pagination;

/// Current version of the Userhub shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
