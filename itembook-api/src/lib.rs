//! # Itembook API Server Library
//!
//! This library provides the HTTP surface of Itembook: registration, login,
//! and per-user item creation and listing behind bearer tokens.
//!
//! ## Modules
//!
//! - `app`: Application state, router builder and bearer authentication layer
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `routes`: API route handlers
//! - `session`: Request-scoped database session extractor

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
pub mod session;
