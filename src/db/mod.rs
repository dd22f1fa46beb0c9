//! Persistence collaborators.
//!
//! This module provides the stores the API layer reads and writes through:
//! - **Document store**: users and orders
//! - **Catalog store**: product categories, kept in a separate database
//!
//! Both are backed by libsql, either in memory or in a local SQLite file.

#![allow(missing_docs)]

pub mod catalog;
pub mod documents;
pub mod traits;
pub mod turso;

// Re-exports
pub use catalog::CatalogStore;
pub use documents::DocumentStore;
pub use traits::{CategoryStore, DatabaseProvider, OrderStore, UserStore};
pub use turso::TursoClient;
