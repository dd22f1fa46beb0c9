//! Store abstraction traits
//!
//! The HTTP layer only talks to these traits. Users and orders live in the
//! document store; categories live in the separate catalog store.
//!
//! # Example
//!
//! ```rust,ignore
//! use ecomm::db::{DatabaseProvider, DocumentStore};
//!
//! // Use in-memory database (default for development/testing)
//! let client = DatabaseProvider::Memory.connect().await?;
//! let documents = DocumentStore::new(client).await?;
//!
//! // Use file-based SQLite
//! let client = DatabaseProvider::from_url("./data/documents.db").connect().await?;
//! ```

use super::turso::TursoClient;
use crate::types::{Category, Order, OrderStatus, Result, User};
use async_trait::async_trait;

/// Database provider configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DatabaseProvider {
    /// In-memory SQLite database (ephemeral, lost on restart)
    #[default]
    Memory,
    /// File-based SQLite database
    SQLite {
        /// Path to the SQLite database file
        path: String,
    },
}

impl DatabaseProvider {
    /// Interprets a configured location: `":memory:"` or empty selects the
    /// in-memory backend, anything else is a file path.
    pub fn from_url(url: &str) -> Self {
        match url.trim() {
            "" | ":memory:" => DatabaseProvider::Memory,
            path => DatabaseProvider::SQLite {
                path: path.to_string(),
            },
        }
    }

    /// Open a client for this provider
    pub async fn connect(&self) -> Result<TursoClient> {
        match self {
            DatabaseProvider::Memory => TursoClient::new_memory().await,
            DatabaseProvider::SQLite { path } => TursoClient::new_local(path).await,
        }
    }
}

/// User record lookup and persistence.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persist a new user. Fails with `InvalidInput("User already exists")`
    /// if the email is already taken, including when a concurrent insert wins.
    async fn create_user(&self, user: &User) -> Result<()>;

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn get_user_by_id(&self, id: &str) -> Result<Option<User>>;

    async fn list_users(&self) -> Result<Vec<User>>;

    /// Update name and/or email. Returns the updated record, or `None` if
    /// no user has this id. Fails with `InvalidInput` if the new email
    /// belongs to another user.
    async fn update_user(
        &self,
        id: &str,
        name: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<User>>;

    /// Returns whether a user was deleted.
    async fn delete_user(&self, id: &str) -> Result<bool>;
}

/// Order persistence.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn create_order(&self, order: &Order) -> Result<()>;

    async fn get_order(&self, id: &str) -> Result<Option<Order>>;

    async fn list_orders(&self) -> Result<Vec<Order>>;

    async fn list_orders_for_user(&self, user_id: &str) -> Result<Vec<Order>>;

    async fn update_order_status(&self, id: &str, status: OrderStatus) -> Result<Option<Order>>;

    async fn delete_order(&self, id: &str) -> Result<bool>;
}

/// Category persistence (relational catalog).
#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn create_category(&self, name: &str, description: &str) -> Result<Category>;

    async fn get_category(&self, id: i64) -> Result<Option<Category>>;

    async fn list_categories(&self) -> Result<Vec<Category>>;

    async fn delete_category(&self, id: i64) -> Result<bool>;
}
