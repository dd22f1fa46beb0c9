//! Authentication and Authorization
//!
//! This module holds everything that decides who a request is and what it
//! may do.
//!
//! # Module Structure
//!
//! - [`auth::password`](crate::auth::password) - bcrypt credential hashing
//! - [`auth::jwt`](crate::auth::jwt) - token issuance and verification
//! - [`auth::middleware`](crate::auth::middleware) - identity extraction and the role gate
//! - [`auth::policy`](crate::auth::policy) - per-resource ownership checks
//!
//! # Request Flow
//!
//! ```text
//! Unauthenticated --(valid bearer token)--> Authenticated{identity}
//!                 --(role / ownership)----> Authorized | Rejected
//! ```
//!
//! Every authentication failure is answered with `401 {"message":
//! "Authentication failed"}` and every authorization failure with `401
//! {"message": "Forbidden"}`; the precise cause only reaches the logs.
//!
//! # Usage
//!
//! ```ignore
//! use ecomm::auth::middleware::{auth_middleware, require_admin};
//!
//! let admin_routes = Router::new()
//!     .route("/users", get(list_users))
//!     .route_layer(middleware::from_fn(require_admin))
//!     .route_layer(middleware::from_fn_with_state(tokens, auth_middleware));
//! ```
//!
//! # Configuration
//!
//! Configure via `ecomm.toml`:
//! ```toml
//! [auth]
//! jwt_secret_env = "JWT_SECRET"  # env var holding the signing secret
//! token_ttl_secs = 3600          # token validity
//! hash_cost = 10                 # bcrypt work factor
//! ```

/// Token generation and validation.
pub mod jwt;
/// Authentication middleware, role gate and identity extractor.
pub mod middleware;
/// Password hashing and verification.
pub mod password;
/// Ownership policy for self-or-admin routes.
pub mod policy;
