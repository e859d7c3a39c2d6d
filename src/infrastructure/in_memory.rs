//! In-memory task store.
//!
//! Implements the same contract as the SQLite store without any external
//! resource. Suitable for development and tests.
//!
//! # Features
//!
//! - Thread-safe with `Arc<RwLock<...>>`
//! - Ids start at 1 and are never reused, like `AUTOINCREMENT`
//! - Iteration in ascending id order

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{NewTask, Task, TaskId, TaskTitle};
use crate::infrastructure::{StoreError, TaskStore};

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<TaskId, Task>,
    last_id: i64,
}

/// In-memory implementation of `TaskStore`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    table: Arc<RwLock<Table>>,
}

impl InMemoryTaskStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn initialize(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn create(&self, task: NewTask) -> Result<Task, StoreError> {
        let mut table = self.table.write().await;
        table.last_id += 1;
        let task = task.into_task(TaskId::new(table.last_id));
        table.rows.insert(task.id, task.clone());
        Ok(task)
    }

    async fn get_by_id(&self, id: TaskId) -> Result<Option<Task>, StoreError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Task>, StoreError> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn list_by_completion(&self, is_completed: bool) -> Result<Vec<Task>, StoreError> {
        Ok(self
            .table
            .read()
            .await
            .rows
            .values()
            .filter(|task| task.is_completed == is_completed)
            .cloned()
            .collect())
    }

    async fn update_title(&self, id: TaskId, title: &TaskTitle) -> Result<bool, StoreError> {
        let mut table = self.table.write().await;
        Ok(table
            .rows
            .get_mut(&id)
            .map(|task| task.title = title.clone())
            .is_some())
    }

    async fn update_completion(&self, id: TaskId, is_completed: bool) -> Result<bool, StoreError> {
        let mut table = self.table.write().await;
        Ok(table
            .rows
            .get_mut(&id)
            .map(|task| task.is_completed = is_completed)
            .is_some())
    }

    async fn update_all_completion(&self, is_completed: bool) -> Result<u64, StoreError> {
        let mut table = self.table.write().await;
        for task in table.rows.values_mut() {
            task.is_completed = is_completed;
        }
        Ok(table.rows.len() as u64)
    }

    async fn delete_by_id(&self, id: TaskId) -> Result<bool, StoreError> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }

    async fn delete_where_completed(&self) -> Result<u64, StoreError> {
        let mut table = self.table.write().await;
        let before = table.rows.len();
        table.rows.retain(|_, task| !task.is_completed);
        Ok((before - table.rows.len()) as u64)
    }

    async fn count(&self, is_completed: Option<bool>) -> Result<u64, StoreError> {
        let table = self.table.read().await;
        let count = match is_completed {
            None => table.rows.len(),
            Some(flag) => table
                .rows
                .values()
                .filter(|task| task.is_completed == flag)
                .count(),
        };
        Ok(count as u64)
    }
}
