//! # ecomm - E-commerce REST backend
//!
//! User registration, token authentication and role/ownership gated CRUD
//! over users, orders and categories, served with axum.
//!
//! ## Overview
//!
//! The crate can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `ecomm-server` binary
//! 2. **As a library** - Build the router with [`api::routes::create_app`]
//!    around your own [`AppState`]
//!
//! ### Basic Example
//!
//! ```rust,ignore
//! use ecomm::{AppState, EcommConfig};
//!
//! let config = EcommConfig::load_or_default("ecomm.toml")?;
//! let secret = config.jwt_secret()?;
//! let state = AppState::build(config, &secret).await?;
//! let app = ecomm::api::routes::create_app(state);
//! ```
//!
//! ## Modules
//!
//! - [`api`] - REST API handlers and routes
//! - [`auth`] - password hashing, tokens, middleware and ownership policy
//! - [`db`] - document and catalog stores (libsql)
//! - [`types`] - Common types and error handling
//! - [`utils`] - TOML configuration
//!
//! ## Access Control
//!
//! Every protected route runs the authentication middleware first. Admin
//! routes add the role gate on top; routes acting on a single user or order
//! check ownership inline in the handler.

#![warn(rustdoc::missing_crate_level_docs)]

/// HTTP API handlers and routes.
pub mod api;
/// Authentication and authorization.
pub mod auth;
/// Document and catalog stores.
pub mod db;
/// Core types (records, requests, responses, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;

// Re-export commonly used types
pub use auth::jwt::TokenService;
pub use auth::password::CredentialHasher;
pub use types::{AppError, Result};
pub use utils::toml_config::EcommConfig;

use crate::db::{
    CatalogStore, CategoryStore, DatabaseProvider, DocumentStore, OrderStore, UserStore,
};
use std::sync::Arc;
use tracing::info;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Loaded infrastructure configuration
    pub config: Arc<EcommConfig>,
    /// User records (document store)
    pub users: Arc<dyn UserStore>,
    /// Orders (document store)
    pub orders: Arc<dyn OrderStore>,
    /// Categories (catalog store)
    pub categories: Arc<dyn CategoryStore>,
    /// Token issuance and verification
    pub tokens: Arc<TokenService>,
    /// Password hashing
    pub hasher: CredentialHasher,
}

impl AppState {
    /// Opens both stores and builds the auth services from `config`.
    ///
    /// Fails before anything is served if the secret, hash cost or token
    /// ttl are unusable.
    pub async fn build(config: EcommConfig, jwt_secret: &str) -> Result<Self> {
        let tokens = TokenService::new(jwt_secret, config.auth.token_ttl_secs)?;
        let hasher = CredentialHasher::new(config.auth.hash_cost)?;

        let documents = Arc::new(
            DocumentStore::new(
                DatabaseProvider::from_url(&config.database.documents)
                    .connect()
                    .await?,
            )
            .await?,
        );
        let catalog = CatalogStore::new(
            DatabaseProvider::from_url(&config.database.catalog)
                .connect()
                .await?,
        )
        .await?;

        info!(
            documents = %config.database.documents,
            catalog = %config.database.catalog,
            "stores ready"
        );

        Ok(Self {
            config: Arc::new(config),
            users: documents.clone(),
            orders: documents,
            categories: Arc::new(catalog),
            tokens: Arc::new(tokens),
            hasher,
        })
    }
}
