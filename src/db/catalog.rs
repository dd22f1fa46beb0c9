//! Relational catalog store for product categories.

use super::traits::CategoryStore;
use super::turso::{db_err, TursoClient};
use crate::types::{AppError, Category, Result};
use async_trait::async_trait;
use chrono::Utc;
use libsql::{params, Row};

pub struct CatalogStore {
    client: TursoClient,
}

impl CatalogStore {
    pub async fn new(client: TursoClient) -> Result<Self> {
        client
            .execute_batch(&["CREATE TABLE IF NOT EXISTS categories (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                description TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            )"])
            .await?;

        Ok(Self { client })
    }
}

fn category_from_row(row: &Row) -> Result<Category> {
    let read = db_err("Failed to decode category");
    Ok(Category {
        id: row.get(0).map_err(&read)?,
        name: row.get(1).map_err(&read)?,
        description: row.get(2).map_err(&read)?,
        created_at: row.get(3).map_err(&read)?,
        updated_at: row.get(4).map_err(&read)?,
    })
}

#[async_trait]
impl CategoryStore for CatalogStore {
    async fn create_category(&self, name: &str, description: &str) -> Result<Category> {
        let now = Utc::now().timestamp();

        // RETURNING keeps the id tied to this insert on the shared connection.
        let mut rows = self
            .client
            .connection()
            .query(
                "INSERT INTO categories (name, description, created_at, updated_at)
                 VALUES (?, ?, ?, ?)
                 RETURNING id, name, description, created_at, updated_at",
                params![name, description, now, now],
            )
            .await
            .map_err(db_err("Failed to create category"))?;

        match rows.next().await.map_err(db_err("Failed to read category"))? {
            Some(row) => category_from_row(&row),
            None => Err(AppError::Database(
                "Category insert returned no row".to_string(),
            )),
        }
    }

    async fn get_category(&self, id: i64) -> Result<Option<Category>> {
        let mut rows = self
            .client
            .connection()
            .query(
                "SELECT id, name, description, created_at, updated_at
                 FROM categories WHERE id = ?",
                [id],
            )
            .await
            .map_err(db_err("Failed to query category"))?;

        match rows.next().await.map_err(db_err("Failed to read category"))? {
            Some(row) => Ok(Some(category_from_row(&row)?)),
            None => Ok(None),
        }
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        let mut rows = self
            .client
            .connection()
            .query(
                "SELECT id, name, description, created_at, updated_at
                 FROM categories ORDER BY id",
                (),
            )
            .await
            .map_err(db_err("Failed to query categories"))?;

        let mut categories = Vec::new();
        while let Some(row) = rows.next().await.map_err(db_err("Failed to read category"))? {
            categories.push(category_from_row(&row)?);
        }
        Ok(categories)
    }

    async fn delete_category(&self, id: i64) -> Result<bool> {
        let affected = self
            .client
            .connection()
            .execute("DELETE FROM categories WHERE id = ?", [id])
            .await
            .map_err(db_err("Failed to delete category"))?;

        Ok(affected > 0)
    }
}
