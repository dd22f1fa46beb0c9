//! Document store for users and orders.
//!
//! Order lines are kept as a JSON document in a single column, the way the
//! records are shaped on the wire.

use super::traits::{OrderStore, UserStore};
use super::turso::{db_err, TursoClient};
use crate::types::{AppError, Order, OrderLine, OrderStatus, Result, Role, User};
use async_trait::async_trait;
use chrono::Utc;
use libsql::{params, Row};

const USER_COLUMNS: &str =
    "id, name, email, password_hash, role, is_active, is_verified, created_at, updated_at";
const ORDER_COLUMNS: &str = "id, user_id, products, status, created_at, updated_at";

pub struct DocumentStore {
    client: TursoClient,
}

impl DocumentStore {
    /// Wraps a client and makes sure the users and orders tables exist.
    pub async fn new(client: TursoClient) -> Result<Self> {
        client
            .execute_batch(&[
                "CREATE TABLE IF NOT EXISTS users (
                    id TEXT PRIMARY KEY,
                    name TEXT NOT NULL,
                    email TEXT UNIQUE NOT NULL,
                    password_hash TEXT NOT NULL,
                    role TEXT NOT NULL DEFAULT 'customer',
                    is_active INTEGER NOT NULL DEFAULT 1,
                    is_verified INTEGER NOT NULL DEFAULT 0,
                    created_at INTEGER NOT NULL,
                    updated_at INTEGER NOT NULL
                )",
                "CREATE TABLE IF NOT EXISTS orders (
                    id TEXT PRIMARY KEY,
                    user_id TEXT NOT NULL,
                    products TEXT NOT NULL,
                    status TEXT NOT NULL DEFAULT 'pending',
                    created_at INTEGER NOT NULL,
                    updated_at INTEGER NOT NULL,
                    FOREIGN KEY (user_id) REFERENCES users(id)
                )",
                "CREATE INDEX IF NOT EXISTS idx_orders_user_id ON orders(user_id)",
            ])
            .await?;

        Ok(Self { client })
    }

    async fn query_users(&self, sql: &str, args: Vec<libsql::Value>) -> Result<Vec<User>> {
        let mut rows = self
            .client
            .connection()
            .query(sql, args)
            .await
            .map_err(db_err("Failed to query users"))?;

        let mut users = Vec::new();
        while let Some(row) = rows.next().await.map_err(db_err("Failed to read user"))? {
            users.push(user_from_row(&row)?);
        }
        Ok(users)
    }

    async fn query_orders(&self, sql: &str, args: Vec<libsql::Value>) -> Result<Vec<Order>> {
        let mut rows = self
            .client
            .connection()
            .query(sql, args)
            .await
            .map_err(db_err("Failed to query orders"))?;

        let mut orders = Vec::new();
        while let Some(row) = rows.next().await.map_err(db_err("Failed to read order"))? {
            orders.push(order_from_row(&row)?);
        }
        Ok(orders)
    }
}

fn user_from_row(row: &Row) -> Result<User> {
    let read = db_err("Failed to decode user");
    let role: String = row.get(4).map_err(&read)?;

    Ok(User {
        id: row.get(0).map_err(&read)?,
        name: row.get(1).map_err(&read)?,
        email: row.get(2).map_err(&read)?,
        password_hash: row.get(3).map_err(&read)?,
        role: Role::parse(&role)
            .ok_or_else(|| AppError::Database(format!("Unknown role '{}'", role)))?,
        is_active: row.get::<i64>(5).map_err(&read)? != 0,
        is_verified: row.get::<i64>(6).map_err(&read)? != 0,
        created_at: row.get(7).map_err(&read)?,
        updated_at: row.get(8).map_err(&read)?,
    })
}

fn order_from_row(row: &Row) -> Result<Order> {
    let read = db_err("Failed to decode order");
    let products: String = row.get(2).map_err(&read)?;
    let status: String = row.get(3).map_err(&read)?;

    Ok(Order {
        id: row.get(0).map_err(&read)?,
        user: row.get(1).map_err(&read)?,
        products: serde_json::from_str::<Vec<OrderLine>>(&products)
            .map_err(|e| AppError::Database(format!("Corrupt order products: {}", e)))?,
        status: OrderStatus::parse(&status)
            .ok_or_else(|| AppError::Database(format!("Unknown order status '{}'", status)))?,
        created_at: row.get(4).map_err(&read)?,
        updated_at: row.get(5).map_err(&read)?,
    })
}

#[async_trait]
impl UserStore for DocumentStore {
    async fn create_user(&self, user: &User) -> Result<()> {
        // The UNIQUE email constraint arbitrates concurrent registrations.
        let inserted = self
            .client
            .connection()
            .execute(
                "INSERT INTO users (id, name, email, password_hash, role, is_active, is_verified, created_at, updated_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                 ON CONFLICT(email) DO NOTHING",
                params![
                    user.id.as_str(),
                    user.name.as_str(),
                    user.email.as_str(),
                    user.password_hash.as_str(),
                    user.role.as_str(),
                    user.is_active as i64,
                    user.is_verified as i64,
                    user.created_at,
                    user.updated_at
                ],
            )
            .await
            .map_err(db_err("Failed to create user"))?;

        if inserted == 0 {
            return Err(AppError::InvalidInput("User already exists".to_string()));
        }

        Ok(())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE email = ?", USER_COLUMNS);
        Ok(self
            .query_users(&sql, vec![email.into()])
            .await?
            .into_iter()
            .next())
    }

    async fn get_user_by_id(&self, id: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS);
        Ok(self.query_users(&sql, vec![id.into()]).await?.into_iter().next())
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let sql = format!("SELECT {} FROM users ORDER BY created_at, id", USER_COLUMNS);
        self.query_users(&sql, Vec::new()).await
    }

    async fn update_user(
        &self,
        id: &str,
        name: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<User>> {
        let Some(mut user) = self.get_user_by_id(id).await? else {
            return Ok(None);
        };

        if let Some(name) = name {
            user.name = name.to_string();
        }
        if let Some(email) = email {
            user.email = email.to_string();
        }
        user.updated_at = Utc::now().timestamp();

        let updated = self
            .client
            .connection()
            .execute(
                "UPDATE users SET name = ?, email = ?, updated_at = ?
                 WHERE id = ?
                   AND NOT EXISTS (SELECT 1 FROM users WHERE email = ? AND id <> ?)",
                params![
                    user.name.as_str(),
                    user.email.as_str(),
                    user.updated_at,
                    id,
                    user.email.as_str(),
                    id
                ],
            )
            .await
            .map_err(db_err("Failed to update user"))?;

        if updated == 0 {
            // Either the row vanished or another user holds the email.
            return match self.get_user_by_id(id).await? {
                Some(_) => Err(AppError::InvalidInput("Email already in use".to_string())),
                None => Ok(None),
            };
        }

        Ok(Some(user))
    }

    async fn delete_user(&self, id: &str) -> Result<bool> {
        let affected = self
            .client
            .connection()
            .execute("DELETE FROM users WHERE id = ?", [id])
            .await
            .map_err(db_err("Failed to delete user"))?;

        Ok(affected > 0)
    }
}

#[async_trait]
impl OrderStore for DocumentStore {
    async fn create_order(&self, order: &Order) -> Result<()> {
        let products = serde_json::to_string(&order.products)
            .map_err(|e| AppError::Internal(format!("Failed to encode order: {}", e)))?;

        self.client
            .connection()
            .execute(
                "INSERT INTO orders (id, user_id, products, status, created_at, updated_at)
                 VALUES (?, ?, ?, ?, ?, ?)",
                params![
                    order.id.as_str(),
                    order.user.as_str(),
                    products,
                    order.status.as_str(),
                    order.created_at,
                    order.updated_at
                ],
            )
            .await
            .map_err(db_err("Failed to create order"))?;

        Ok(())
    }

    async fn get_order(&self, id: &str) -> Result<Option<Order>> {
        let sql = format!("SELECT {} FROM orders WHERE id = ?", ORDER_COLUMNS);
        Ok(self.query_orders(&sql, vec![id.into()]).await?.into_iter().next())
    }

    async fn list_orders(&self) -> Result<Vec<Order>> {
        let sql = format!("SELECT {} FROM orders ORDER BY created_at, id", ORDER_COLUMNS);
        self.query_orders(&sql, Vec::new()).await
    }

    async fn list_orders_for_user(&self, user_id: &str) -> Result<Vec<Order>> {
        let sql = format!(
            "SELECT {} FROM orders WHERE user_id = ? ORDER BY created_at, id",
            ORDER_COLUMNS
        );
        self.query_orders(&sql, vec![user_id.into()]).await
    }

    async fn update_order_status(&self, id: &str, status: OrderStatus) -> Result<Option<Order>> {
        let now = Utc::now().timestamp();
        let affected = self
            .client
            .connection()
            .execute(
                "UPDATE orders SET status = ?, updated_at = ? WHERE id = ?",
                params![status.as_str(), now, id],
            )
            .await
            .map_err(db_err("Failed to update order"))?;

        if affected == 0 {
            return Ok(None);
        }
        self.get_order(id).await
    }

    async fn delete_order(&self, id: &str) -> Result<bool> {
        let affected = self
            .client
            .connection()
            .execute("DELETE FROM orders WHERE id = ?", [id])
            .await
            .map_err(db_err("Failed to delete order"))?;

        Ok(affected > 0)
    }
}
