//! # Itembook Shared Library
//!
//! This crate contains the persistence layer, data-access operations and
//! credential handling used by the Itembook API server.
//!
//! ## Module Organization
//!
//! - `db`: Connection pool and schema migrations
//! - `models`: Database models (`User`, `Item`) and their queries
//! - `auth`: Password hashing, signed tokens and identity resolution

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the Itembook shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
