//! User repository
//!
//! Database operations for users.
//!
//! This module provides:
//! - `UserRepository` trait defining the interface for user data access
//! - `SqlxUserRepository` implementing the trait for SQLite and MySQL

use crate::config::DatabaseDriver;
use crate::db::DynDatabasePool;
use crate::models::User;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{MySqlPool, Row, SqlitePool};
use std::sync::Arc;

/// User repository trait
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user
    async fn create(&self, user: &User) -> Result<User>;

    /// Get user by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<User>>;

    /// Get user by username (email)
    async fn get_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Update a user's display name
    async fn update_display_name(&self, id: i64, display_name: Option<&str>) -> Result<()>;
}

/// SQLx-based user repository implementation
///
/// Supports both SQLite and MySQL databases.
pub struct SqlxUserRepository {
    pool: DynDatabasePool,
}

impl SqlxUserRepository {
    /// Create a new SQLx user repository
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn UserRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    async fn create(&self, user: &User) -> Result<User> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                create_user_sqlite(self.pool.as_sqlite().unwrap(), user).await
            }
            DatabaseDriver::Mysql => create_user_mysql(self.pool.as_mysql().unwrap(), user).await,
        }
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                get_user_by_id_sqlite(self.pool.as_sqlite().unwrap(), id).await
            }
            DatabaseDriver::Mysql => get_user_by_id_mysql(self.pool.as_mysql().unwrap(), id).await,
        }
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                get_user_by_username_sqlite(self.pool.as_sqlite().unwrap(), username).await
            }
            DatabaseDriver::Mysql => {
                get_user_by_username_mysql(self.pool.as_mysql().unwrap(), username).await
            }
        }
    }

    async fn update_display_name(&self, id: i64, display_name: Option<&str>) -> Result<()> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                update_display_name_sqlite(self.pool.as_sqlite().unwrap(), id, display_name).await
            }
            DatabaseDriver::Mysql => {
                update_display_name_mysql(self.pool.as_mysql().unwrap(), id, display_name).await
            }
        }
    }
}

// ============================================================================
// SQLite implementations
// ============================================================================

async fn create_user_sqlite(pool: &SqlitePool, user: &User) -> Result<User> {
    let now = Utc::now();

    let result = sqlx::query(
        r#"
        INSERT INTO users (username, password_hash, display_name, created_at)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&user.username)
    .bind(&user.password_hash)
    .bind(&user.display_name)
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to create user")?;

    let id = result.last_insert_rowid();

    Ok(User {
        id,
        username: user.username.clone(),
        password_hash: user.password_hash.clone(),
        display_name: user.display_name.clone(),
        created_at: now,
    })
}

async fn get_user_by_id_sqlite(pool: &SqlitePool, id: i64) -> Result<Option<User>> {
    let row = sqlx::query(
        r#"
        SELECT id, username, password_hash, display_name, created_at
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .context("Failed to get user by ID")?;

    Ok(row.map(|row| row_to_user_sqlite(&row)))
}

async fn get_user_by_username_sqlite(pool: &SqlitePool, username: &str) -> Result<Option<User>> {
    let row = sqlx::query(
        r#"
        SELECT id, username, password_hash, display_name, created_at
        FROM users
        WHERE username = ?
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await
    .context("Failed to get user by username")?;

    Ok(row.map(|row| row_to_user_sqlite(&row)))
}

async fn update_display_name_sqlite(
    pool: &SqlitePool,
    id: i64,
    display_name: Option<&str>,
) -> Result<()> {
    sqlx::query("UPDATE users SET display_name = ? WHERE id = ?")
        .bind(display_name)
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to update display name")?;

    Ok(())
}

fn row_to_user_sqlite(row: &sqlx::sqlite::SqliteRow) -> User {
    User {
        id: row.get("id"),
        username: row.get("username"),
        password_hash: row.get("password_hash"),
        display_name: row.get("display_name"),
        created_at: row.get("created_at"),
    }
}

// ============================================================================
// MySQL implementations
// ============================================================================

async fn create_user_mysql(pool: &MySqlPool, user: &User) -> Result<User> {
    let now = Utc::now();

    let result = sqlx::query(
        r#"
        INSERT INTO users (username, password_hash, display_name, created_at)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&user.username)
    .bind(&user.password_hash)
    .bind(&user.display_name)
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to create user")?;

    let id = result.last_insert_id() as i64;

    Ok(User {
        id,
        username: user.username.clone(),
        password_hash: user.password_hash.clone(),
        display_name: user.display_name.clone(),
        created_at: now,
    })
}

async fn get_user_by_id_mysql(pool: &MySqlPool, id: i64) -> Result<Option<User>> {
    let row = sqlx::query(
        r#"
        SELECT id, username, password_hash, display_name, created_at
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .context("Failed to get user by ID")?;

    Ok(row.map(|row| row_to_user_mysql(&row)))
}

async fn get_user_by_username_mysql(pool: &MySqlPool, username: &str) -> Result<Option<User>> {
    let row = sqlx::query(
        r#"
        SELECT id, username, password_hash, display_name, created_at
        FROM users
        WHERE username = ?
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await
    .context("Failed to get user by username")?;

    Ok(row.map(|row| row_to_user_mysql(&row)))
}

async fn update_display_name_mysql(
    pool: &MySqlPool,
    id: i64,
    display_name: Option<&str>,
) -> Result<()> {
    sqlx::query("UPDATE users SET display_name = ? WHERE id = ?")
        .bind(display_name)
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to update display name")?;

    Ok(())
}

fn row_to_user_mysql(row: &sqlx::mysql::MySqlRow) -> User {
    User {
        id: row.get("id"),
        username: row.get("username"),
        password_hash: row.get("password_hash"),
        display_name: row.get("display_name"),
        created_at: row.get("created_at"),
    }
}
