//! Task domain model.
//!
//! A `Task` is a single to-do item. Its identifier is assigned by the store
//! on creation and never changes afterwards; title and completion flag are
//! mutated independently.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Value Objects
// =============================================================================

/// Store-assigned identifier of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(i64);

impl TaskId {
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl From<i64> for TaskId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Errors raised while constructing domain values from untrusted input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskValidationError {
    /// The title is empty or contains only whitespace.
    #[error("title must not be empty")]
    EmptyTitle,
}

/// Non-empty task title.
///
/// Surrounding whitespace is trimmed; a title that is empty after trimming
/// is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Validates and wraps a title.
    ///
    /// # Errors
    ///
    /// Returns `TaskValidationError::EmptyTitle` if nothing but whitespace remains.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskValidationError> {
        let value = value.into();
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }

        if trimmed.len() == value.len() {
            Ok(Self(value))
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TaskTitle {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(&self.0)
    }
}

// =============================================================================
// Task
// =============================================================================

/// A persisted to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub id: TaskId,
    pub title: TaskTitle,
    pub is_completed: bool,
}

impl Task {
    #[must_use]
    pub const fn new(id: TaskId, title: TaskTitle, is_completed: bool) -> Self {
        Self {
            id,
            title,
            is_completed,
        }
    }
}

/// A task that has not been stored yet and therefore has no id.
///
/// New tasks always start out active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: TaskTitle,
}

impl NewTask {
    #[must_use]
    pub const fn new(title: TaskTitle) -> Self {
        Self { title }
    }

    /// Attaches the id handed out by the store.
    #[must_use]
    pub fn into_task(self, id: TaskId) -> Task {
        Task::new(id, self.title, false)
    }
}

// =============================================================================
// Tests
// =============================================================================
