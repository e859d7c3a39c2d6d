//! Index view composition.
//!
//! Builds the context the index template renders: the three counts, the
//! task list selected by the filter, and the filter literal itself.

use serde::Serialize;

use crate::application::TaskService;
use crate::domain::{Filter, Task};
use crate::infrastructure::StoreError;

/// Template context for the index page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexView {
    pub total_count: u64,
    pub active_count: u64,
    pub completed_count: u64,
    pub todos: Vec<Task>,
    /// Always one of `all`, `active`, `completed` once serialized.
    pub filter: Filter,
}

/// Reads the filtered list and the counts for `filter`.
///
/// # Errors
///
/// Propagates the first `StoreError` encountered.
pub async fn compose_index_view(
    service: &TaskService,
    filter: Filter,
) -> Result<IndexView, StoreError> {
    let todos = service.get_filtered(filter).await?;
    let total_count = service.count(None).await?;
    let active_count = service.count(Some(false)).await?;
    let completed_count = service.count(Some(true)).await?;

    Ok(IndexView {
        total_count,
        active_count,
        completed_count,
        todos,
        filter,
    })
}
