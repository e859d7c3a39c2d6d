//! SQLite task store.
//!
//! Relational backend built on an `sqlx` connection pool.
//!
//! # Table Schema
//!
//! ```sql
//! CREATE TABLE IF NOT EXISTS todo (
//!     id INTEGER PRIMARY KEY AUTOINCREMENT,
//!     title TEXT NOT NULL,
//!     is_completed BOOLEAN NOT NULL DEFAULT 0
//! );
//! ```
//!
//! Every write runs in its own transaction and is committed before the call
//! returns. Concurrent writers to the same row are serialized by SQLite
//! (last write wins).

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::domain::{NewTask, Task, TaskId, TaskTitle};
use crate::infrastructure::{StoreError, TaskStore};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS todo (\
     id INTEGER PRIMARY KEY AUTOINCREMENT, \
     title TEXT NOT NULL, \
     is_completed BOOLEAN NOT NULL DEFAULT 0\
     )";

type TaskRow = (i64, String, bool);

fn row_to_task((id, title, is_completed): TaskRow) -> Result<Task, StoreError> {
    let title = TaskTitle::new(title)
        .map_err(|error| StoreError::InvalidRow(format!("todo {id}: {error}")))?;
    Ok(Task::new(TaskId::new(id), title, is_completed))
}

fn rows_to_tasks(rows: Vec<TaskRow>) -> Result<Vec<Task>, StoreError> {
    rows.into_iter().map(row_to_task).collect()
}

fn is_memory_url(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

// =============================================================================
// SQLite Task Store
// =============================================================================

/// `SQLite` implementation of `TaskStore`.
///
/// # Example
///
/// ```ignore
/// let store = SqliteTaskStore::connect("sqlite://todo.db", 5).await?;
/// store.initialize().await?;
/// let task = store.create(NewTask::new(TaskTitle::new("Write docs")?)).await?;
/// ```
#[derive(Debug, Clone)]
pub struct SqliteTaskStore {
    pool: SqlitePool,
}

impl SqliteTaskStore {
    /// Wraps an existing pool.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens a pool for `database_url`, creating the database file if needed.
    ///
    /// In-memory URLs get exactly one connection that is never recycled;
    /// every extra connection would otherwise see its own empty database.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the URL is invalid or the database
    /// cannot be opened.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let pool_options = if is_memory_url(database_url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections)
        };

        let pool = pool_options.connect_with(options).await?;
        tracing::info!(database_url, "SQLite pool opened");
        Ok(Self::new(pool))
    }

    /// Opens a private in-memory database.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if SQLite cannot be opened.
    pub async fn in_memory() -> Result<Self, StoreError> {
        Self::connect("sqlite::memory:", 1).await
    }
}

#[async_trait]
impl TaskStore for SqliteTaskStore {
    async fn initialize(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        tracing::info!("Schema initialized");
        Ok(())
    }

    async fn create(&self, task: NewTask) -> Result<Task, StoreError> {
        let mut transaction = self.pool.begin().await?;

        let result = sqlx::query("INSERT INTO todo (title, is_completed) VALUES (?, ?)")
            .bind(task.title.as_str())
            .bind(false)
            .execute(&mut *transaction)
            .await?;

        transaction.commit().await?;

        Ok(task.into_task(TaskId::new(result.last_insert_rowid())))
    }

    async fn get_by_id(&self, id: TaskId) -> Result<Option<Task>, StoreError> {
        let row: Option<TaskRow> =
            sqlx::query_as("SELECT id, title, is_completed FROM todo WHERE id = ?")
                .bind(id.value())
                .fetch_optional(&self.pool)
                .await?;

        row.map(row_to_task).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Task>, StoreError> {
        let rows: Vec<TaskRow> =
            sqlx::query_as("SELECT id, title, is_completed FROM todo ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        rows_to_tasks(rows)
    }

    async fn list_by_completion(&self, is_completed: bool) -> Result<Vec<Task>, StoreError> {
        let rows: Vec<TaskRow> = sqlx::query_as(
            "SELECT id, title, is_completed FROM todo WHERE is_completed = ? ORDER BY id",
        )
        .bind(is_completed)
        .fetch_all(&self.pool)
        .await?;

        rows_to_tasks(rows)
    }

    async fn update_title(&self, id: TaskId, title: &TaskTitle) -> Result<bool, StoreError> {
        let mut transaction = self.pool.begin().await?;

        let result = sqlx::query("UPDATE todo SET title = ? WHERE id = ?")
            .bind(title.as_str())
            .bind(id.value())
            .execute(&mut *transaction)
            .await?;

        transaction.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    async fn update_completion(&self, id: TaskId, is_completed: bool) -> Result<bool, StoreError> {
        let mut transaction = self.pool.begin().await?;

        let result = sqlx::query("UPDATE todo SET is_completed = ? WHERE id = ?")
            .bind(is_completed)
            .bind(id.value())
            .execute(&mut *transaction)
            .await?;

        transaction.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    async fn update_all_completion(&self, is_completed: bool) -> Result<u64, StoreError> {
        let mut transaction = self.pool.begin().await?;

        let result = sqlx::query("UPDATE todo SET is_completed = ?")
            .bind(is_completed)
            .execute(&mut *transaction)
            .await?;

        transaction.commit().await?;
        Ok(result.rows_affected())
    }

    async fn delete_by_id(&self, id: TaskId) -> Result<bool, StoreError> {
        let mut transaction = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM todo WHERE id = ?")
            .bind(id.value())
            .execute(&mut *transaction)
            .await?;

        transaction.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_where_completed(&self) -> Result<u64, StoreError> {
        let mut transaction = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM todo WHERE is_completed = ?")
            .bind(true)
            .execute(&mut *transaction)
            .await?;

        transaction.commit().await?;
        Ok(result.rows_affected())
    }

    async fn count(&self, is_completed: Option<bool>) -> Result<u64, StoreError> {
        let (count,): (i64,) = match is_completed {
            None => {
                sqlx::query_as("SELECT COUNT(id) FROM todo")
                    .fetch_one(&self.pool)
                    .await?
            }
            Some(flag) => {
                sqlx::query_as("SELECT COUNT(id) FROM todo WHERE is_completed = ?")
                    .bind(flag)
                    .fetch_one(&self.pool)
                    .await?
            }
        };

        Ok(count.unsigned_abs())
    }
}
