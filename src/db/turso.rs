use crate::types::{AppError, Result};
use libsql::{Builder, Connection, Database};
use std::path::Path;
use tracing::info;

/// Thin handle over a libsql database and the single connection every
/// store operation goes through.
///
/// In-memory databases are private to the connection that opened them, so
/// one connection is kept for the lifetime of the client.
pub struct TursoClient {
    _db: Database,
    conn: Connection,
}

impl TursoClient {
    /// Opens an ephemeral in-memory database.
    pub async fn new_memory() -> Result<Self> {
        Self::open(":memory:").await
    }

    /// Opens (creating if needed) a file-backed database.
    pub async fn new_local(path: &str) -> Result<Self> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    AppError::Database(format!(
                        "Failed to create database directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }
        Self::open(path).await
    }

    async fn open(path: &str) -> Result<Self> {
        let db = Builder::new_local(path)
            .build()
            .await
            .map_err(|e| AppError::Database(format!("Failed to open {}: {}", path, e)))?;
        let conn = db
            .connect()
            .map_err(|e| AppError::Database(format!("Failed to get connection: {}", e)))?;

        info!(path, "database opened");

        Ok(Self { _db: db, conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Runs each statement in order, stopping at the first failure.
    pub async fn execute_batch(&self, statements: &[&str]) -> Result<()> {
        for statement in statements {
            self.conn
                .execute(statement, ())
                .await
                .map_err(|e| AppError::Database(format!("Failed to initialize schema: {}", e)))?;
        }
        Ok(())
    }
}

/// Maps a libsql error into [`AppError::Database`] with a short context.
pub(crate) fn db_err(context: &'static str) -> impl Fn(libsql::Error) -> AppError {
    move |e| AppError::Database(format!("{}: {}", context, e))
}
