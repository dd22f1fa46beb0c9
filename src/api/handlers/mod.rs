//! API request handlers.
//!
//! This module contains all HTTP request handlers organized by resource.

/// Registration and login handlers.
pub mod auth;
/// Category handlers.
pub mod categories;
/// Authenticated landing handler.
pub mod index;
/// Order handlers.
pub mod orders;
/// User CRUD handlers.
pub mod users;
