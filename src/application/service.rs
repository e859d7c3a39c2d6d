//! Task service.
//!
//! Thin pass-through over a [`TaskStore`] with named, filter-aware reads.
//! Each method issues exactly one store call; failures propagate unchanged
//! and are never retried.

use std::sync::Arc;

use crate::domain::{Filter, NewTask, Task, TaskId, TaskTitle};
use crate::infrastructure::{StoreError, TaskStore};

/// Read and write operations used by the HTTP handlers.
#[derive(Clone)]
pub struct TaskService {
    store: Arc<dyn TaskStore>,
}

impl TaskService {
    #[must_use]
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// # Errors
    ///
    /// Propagates `StoreError` from the store.
    pub async fn get_all(&self) -> Result<Vec<Task>, StoreError> {
        self.store.list_all().await
    }

    /// Tasks that are not completed.
    ///
    /// # Errors
    ///
    /// Propagates `StoreError` from the store.
    pub async fn get_active(&self) -> Result<Vec<Task>, StoreError> {
        self.store.list_by_completion(false).await
    }

    /// Tasks that are completed.
    ///
    /// # Errors
    ///
    /// Propagates `StoreError` from the store.
    pub async fn get_completed(&self) -> Result<Vec<Task>, StoreError> {
        self.store.list_by_completion(true).await
    }

    /// Dispatches to the read method matching `filter`.
    ///
    /// # Errors
    ///
    /// Propagates `StoreError` from the store.
    pub async fn get_filtered(&self, filter: Filter) -> Result<Vec<Task>, StoreError> {
        match filter {
            Filter::All => self.get_all().await,
            Filter::Active => self.get_active().await,
            Filter::Completed => self.get_completed().await,
        }
    }

    /// # Errors
    ///
    /// Propagates `StoreError` from the store.
    pub async fn get_one(&self, id: TaskId) -> Result<Option<Task>, StoreError> {
        self.store.get_by_id(id).await
    }

    /// Total (`None`), active (`Some(false)`) or completed (`Some(true)`) count.
    ///
    /// # Errors
    ///
    /// Propagates `StoreError` from the store.
    pub async fn count(&self, is_completed: Option<bool>) -> Result<u64, StoreError> {
        self.store.count(is_completed).await
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// # Errors
    ///
    /// Propagates `StoreError` from the store.
    pub async fn save(&self, title: TaskTitle) -> Result<Task, StoreError> {
        let task = self.store.create(NewTask::new(title)).await?;
        tracing::debug!(task_id = %task.id, "Task created");
        Ok(task)
    }

    /// Renames a task. Unknown ids are ignored.
    ///
    /// # Errors
    ///
    /// Propagates `StoreError` from the store.
    pub async fn edit(&self, id: TaskId, title: &TaskTitle) -> Result<(), StoreError> {
        let updated = self.store.update_title(id, title).await?;
        tracing::debug!(task_id = %id, updated, "Task title edited");
        Ok(())
    }

    /// Sets one task's completion flag. Unknown ids are ignored.
    ///
    /// # Errors
    ///
    /// Propagates `StoreError` from the store.
    pub async fn complete(&self, id: TaskId, completed: bool) -> Result<(), StoreError> {
        let updated = self.store.update_completion(id, completed).await?;
        tracing::debug!(task_id = %id, completed, updated, "Task completion changed");
        Ok(())
    }

    /// # Errors
    ///
    /// Propagates `StoreError` from the store.
    pub async fn complete_all(&self, completed: bool) -> Result<(), StoreError> {
        let affected = self.store.update_all_completion(completed).await?;
        tracing::debug!(completed, affected, "All tasks completion changed");
        Ok(())
    }

    /// Deletes a task. Deleting an unknown id is a no-op.
    ///
    /// # Errors
    ///
    /// Propagates `StoreError` from the store.
    pub async fn delete(&self, id: TaskId) -> Result<(), StoreError> {
        let deleted = self.store.delete_by_id(id).await?;
        tracing::debug!(task_id = %id, deleted, "Task deleted");
        Ok(())
    }

    /// # Errors
    ///
    /// Propagates `StoreError` from the store.
    pub async fn delete_completed(&self) -> Result<(), StoreError> {
        let affected = self.store.delete_where_completed().await?;
        tracing::debug!(affected, "Completed tasks deleted");
        Ok(())
    }
}

impl std::fmt::Debug for TaskService {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("TaskService")
            .field("store", &"<dyn TaskStore>")
            .finish()
    }
}
