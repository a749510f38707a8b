//! Thought repository
//!
//! Database operations for thought records.
//!
//! This module provides:
//! - `ThoughtRepository` trait defining the interface for thought data access
//! - `SqlxThoughtRepository` implementing the trait for SQLite and MySQL
//!
//! Thoughts are append-only. The only mutation is the bulk delete of a
//! user's entire journal.

use crate::config::DatabaseDriver;
use crate::db::DynDatabasePool;
use crate::models::{DateRange, Thought};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{MySqlPool, Row, SqlitePool};
use std::sync::Arc;

/// Thought repository trait
#[async_trait]
pub trait ThoughtRepository: Send + Sync {
    /// Create a new thought
    async fn create(&self, thought: &Thought) -> Result<Thought>;

    /// List a user's thoughts within an optional date range, newest first
    async fn list_by_user(&self, user_id: i64, range: DateRange) -> Result<Vec<Thought>>;

    /// Delete all thoughts for a user, returning the number deleted
    async fn delete_all_by_user(&self, user_id: i64) -> Result<i64>;
}

/// SQLx-based thought repository implementation
///
/// Supports both SQLite and MySQL databases.
pub struct SqlxThoughtRepository {
    pool: DynDatabasePool,
}

impl SqlxThoughtRepository {
    /// Create a new SQLx thought repository
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn ThoughtRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl ThoughtRepository for SqlxThoughtRepository {
    async fn create(&self, thought: &Thought) -> Result<Thought> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                create_thought_sqlite(self.pool.as_sqlite().unwrap(), thought).await
            }
            DatabaseDriver::Mysql => {
                create_thought_mysql(self.pool.as_mysql().unwrap(), thought).await
            }
        }
    }

    async fn list_by_user(&self, user_id: i64, range: DateRange) -> Result<Vec<Thought>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                list_thoughts_sqlite(self.pool.as_sqlite().unwrap(), user_id, range).await
            }
            DatabaseDriver::Mysql => {
                list_thoughts_mysql(self.pool.as_mysql().unwrap(), user_id, range).await
            }
        }
    }

    async fn delete_all_by_user(&self, user_id: i64) -> Result<i64> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                delete_all_thoughts_sqlite(self.pool.as_sqlite().unwrap(), user_id).await
            }
            DatabaseDriver::Mysql => {
                delete_all_thoughts_mysql(self.pool.as_mysql().unwrap(), user_id).await
            }
        }
    }
}

// The range bounds are optional, so the listing query is assembled from a
// fixed prefix plus the applicable WHERE clauses. Only `?` placeholders are
// appended, never user input.
fn list_query(range: &DateRange) -> String {
    let mut sql = String::from(
        "SELECT id, user_id, content, intensity, cognitive_distortion, trigger_text, created_at \
         FROM thoughts WHERE user_id = ?",
    );
    if range.from.is_some() {
        sql.push_str(" AND created_at >= ?");
    }
    if range.to.is_some() {
        sql.push_str(" AND created_at <= ?");
    }
    sql.push_str(" ORDER BY created_at DESC, id DESC");
    sql
}

// ============================================================================
// SQLite implementations
// ============================================================================

async fn create_thought_sqlite(pool: &SqlitePool, thought: &Thought) -> Result<Thought> {
    let now = Utc::now();

    let result = sqlx::query(
        r#"
        INSERT INTO thoughts (user_id, content, intensity, cognitive_distortion, trigger_text, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(thought.user_id)
    .bind(&thought.content)
    .bind(thought.intensity)
    .bind(&thought.cognitive_distortion)
    .bind(&thought.trigger)
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to create thought")?;

    let id = result.last_insert_rowid();

    Ok(Thought {
        id,
        user_id: thought.user_id,
        content: thought.content.clone(),
        intensity: thought.intensity,
        cognitive_distortion: thought.cognitive_distortion.clone(),
        trigger: thought.trigger.clone(),
        created_at: now,
    })
}

async fn list_thoughts_sqlite(
    pool: &SqlitePool,
    user_id: i64,
    range: DateRange,
) -> Result<Vec<Thought>> {
    let sql = list_query(&range);
    let mut query = sqlx::query(&sql).bind(user_id);
    if let Some(from) = range.from {
        query = query.bind(from);
    }
    if let Some(to) = range.to {
        query = query.bind(to);
    }

    let rows = query
        .fetch_all(pool)
        .await
        .context("Failed to list thoughts")?;

    Ok(rows.iter().map(row_to_thought_sqlite).collect())
}

async fn delete_all_thoughts_sqlite(pool: &SqlitePool, user_id: i64) -> Result<i64> {
    let result = sqlx::query("DELETE FROM thoughts WHERE user_id = ?")
        .bind(user_id)
        .execute(pool)
        .await
        .context("Failed to delete thoughts")?;

    Ok(result.rows_affected() as i64)
}

fn row_to_thought_sqlite(row: &sqlx::sqlite::SqliteRow) -> Thought {
    Thought {
        id: row.get("id"),
        user_id: row.get("user_id"),
        content: row.get("content"),
        intensity: row.get("intensity"),
        cognitive_distortion: row.get("cognitive_distortion"),
        trigger: row.get("trigger_text"),
        created_at: row.get("created_at"),
    }
}

// ============================================================================
// MySQL implementations
// ============================================================================

async fn create_thought_mysql(pool: &MySqlPool, thought: &Thought) -> Result<Thought> {
    let now = Utc::now();

    let result = sqlx::query(
        r#"
        INSERT INTO thoughts (user_id, content, intensity, cognitive_distortion, trigger_text, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(thought.user_id)
    .bind(&thought.content)
    .bind(thought.intensity)
    .bind(&thought.cognitive_distortion)
    .bind(&thought.trigger)
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to create thought")?;

    let id = result.last_insert_id() as i64;

    Ok(Thought {
        id,
        user_id: thought.user_id,
        content: thought.content.clone(),
        intensity: thought.intensity,
        cognitive_distortion: thought.cognitive_distortion.clone(),
        trigger: thought.trigger.clone(),
        created_at: now,
    })
}

async fn list_thoughts_mysql(
    pool: &MySqlPool,
    user_id: i64,
    range: DateRange,
) -> Result<Vec<Thought>> {
    let sql = list_query(&range);
    let mut query = sqlx::query(&sql).bind(user_id);
    if let Some(from) = range.from {
        query = query.bind(from);
    }
    if let Some(to) = range.to {
        query = query.bind(to);
    }

    let rows = query
        .fetch_all(pool)
        .await
        .context("Failed to list thoughts")?;

    Ok(rows.iter().map(row_to_thought_mysql).collect())
}

async fn delete_all_thoughts_mysql(pool: &MySqlPool, user_id: i64) -> Result<i64> {
    let result = sqlx::query("DELETE FROM thoughts WHERE user_id = ?")
        .bind(user_id)
        .execute(pool)
        .await
        .context("Failed to delete thoughts")?;

    Ok(result.rows_affected() as i64)
}

fn row_to_thought_mysql(row: &sqlx::mysql::MySqlRow) -> Thought {
    Thought {
        id: row.get("id"),
        user_id: row.get("user_id"),
        content: row.get("content"),
        intensity: row.get("intensity"),
        cognitive_distortion: row.get("cognitive_distortion"),
        trigger: row.get("trigger_text"),
        created_at: row.get("created_at"),
    }
}
