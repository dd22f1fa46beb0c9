//! HTTP API Handlers and Routes
//!
//! This module provides the REST API layer, built on the Axum web framework.
//!
//! # Module Structure
//!
//! - [`api::handlers`](crate::api::handlers) - Request handlers for each endpoint
//! - [`api::routes`](crate::api::routes) - Route definitions and router configuration
//! - [`api::docs`](crate::api::docs) - OpenAPI document
//! - [`api::extract`](crate::api::extract) - JSON body extractor
//!
//! # API Endpoints
//!
//! ## Users (`/users`)
//! - `POST /users/register` - Register new user
//! - `POST /users/login` - Login and receive a token
//! - `GET /users` - List users (admin)
//! - `GET /users/{id}` - Get own user
//! - `PUT /users/{id}` - Update own name/email
//! - `DELETE /users/{id}` - Delete own user, or any user as admin
//!
//! ## Orders (`/orders`)
//! - `POST /orders` - Place an order
//! - `GET /orders` - List own orders, or all as admin
//! - `GET /orders/{id}` - Get an order (owner or admin)
//! - `PUT /orders/{id}/status` - Change status (admin)
//! - `DELETE /orders/{id}` - Delete an order (owner or admin)
//!
//! ## Categories (`/categories`)
//! - `GET /categories` - List categories
//! - `GET /categories/{id}` - Get a category
//! - `POST /categories` - Create (admin)
//! - `DELETE /categories/{id}` - Delete (admin)
//!
//! # Authentication
//!
//! Protected endpoints require a valid token in the `Authorization` header:
//! ```text
//! Authorization: Bearer <token>
//! ```
//!
//! # OpenAPI Documentation
//!
//! The document is served at `/api-docs/openapi.json`. When the `swagger-ui`
//! feature is enabled, interactive documentation is available at `/api-docs/`.

/// OpenAPI document.
pub mod docs;
/// Body extractor with the API error shape.
pub mod extract;
/// Request and response handlers for all API endpoints.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;
