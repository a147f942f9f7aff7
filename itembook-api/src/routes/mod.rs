/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Login and registration
/// - `users`: The authenticated caller's own record
/// - `items`: Item creation and listing for the authenticated caller

pub mod auth;
pub mod health;
pub mod items;
pub mod users;
