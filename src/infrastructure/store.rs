//! Task store contract.
//!
//! Every backend implements [`TaskStore`]. Each write is atomic and durable
//! when the returned future resolves, and every read reflects the latest
//! committed state: implementations keep no read cache.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{NewTask, Task, TaskId, TaskTitle};

// =============================================================================
// Store Error
// =============================================================================

/// Errors that can occur during store operations.
///
/// A missing task id is not an error: reads return `None` and writes report
/// that no row was affected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The underlying database rejected the operation or is unreachable.
    #[error("Database error: {0}")]
    Database(String),

    /// A stored row could not be turned back into a `Task`.
    #[error("Invalid row: {0}")]
    InvalidRow(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> Self {
        Self::Database(error.to_string())
    }
}

// =============================================================================
// Task Store
// =============================================================================

/// CRUD and aggregate-count operations over task records.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Prepares the backing storage (schema creation). Idempotent.
    async fn initialize(&self) -> Result<(), StoreError>;

    /// Persists a new task and returns it with its assigned id.
    async fn create(&self, task: NewTask) -> Result<Task, StoreError>;

    /// Returns `Ok(None)` when no task has the given id.
    async fn get_by_id(&self, id: TaskId) -> Result<Option<Task>, StoreError>;

    /// All tasks in ascending id order.
    async fn list_all(&self) -> Result<Vec<Task>, StoreError>;

    /// Tasks whose completion flag equals `is_completed`, in ascending id order.
    async fn list_by_completion(&self, is_completed: bool) -> Result<Vec<Task>, StoreError>;

    /// Returns whether a task was updated.
    async fn update_title(&self, id: TaskId, title: &TaskTitle) -> Result<bool, StoreError>;

    /// Returns whether a task was updated.
    async fn update_completion(&self, id: TaskId, is_completed: bool) -> Result<bool, StoreError>;

    /// Sets the completion flag of every task; returns the number of rows touched.
    async fn update_all_completion(&self, is_completed: bool) -> Result<u64, StoreError>;

    /// Returns whether a task was removed.
    async fn delete_by_id(&self, id: TaskId) -> Result<bool, StoreError>;

    /// Removes every completed task; returns the number removed.
    async fn delete_where_completed(&self) -> Result<u64, StoreError>;

    /// Counts all tasks (`None`) or those with the given completion flag.
    async fn count(&self, is_completed: Option<bool>) -> Result<u64, StoreError>;
}
