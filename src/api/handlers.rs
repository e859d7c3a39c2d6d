//! HTTP handlers.
//!
//! - `GET /` - render the task list for the current filter
//! - `POST /todo` - create a task
//! - `POST /todo/{id}/edit` - rename a task
//! - `POST /todo/{id}/complete` - set a task's completion flag
//! - `POST /todo/{id}/delete` - delete a task
//! - `POST /todo/complete_all` - set every task's completion flag
//! - `POST /todo/delete_completed` - delete completed tasks
//! - `GET /health` - health check
//!
//! Every mutating handler answers `303 See Other` to `/`. The redirect is
//! always bare; `TodoFilterLayer` adds the filter on the way out.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, Redirect};
use serde::Serialize;

use crate::api::dto::{CompleteForm, TodoForm};
use crate::api::error::ApiError;
use crate::api::extract::FormOrJson;
use crate::api::middleware::CurrentFilter;
use crate::api::state::AppState;
use crate::api::templates::INDEX_TEMPLATE;
use crate::application::compose_index_view;
use crate::domain::{TaskId, TaskTitle};

const INDEX_PATH: &str = "/";

fn back_to_index() -> Redirect {
    Redirect::to(INDEX_PATH)
}

/// GET / - Render the task list.
///
/// # Errors
///
/// Returns `500 Internal Server Error` if the store or the template fails.
pub async fn index(
    State(state): State<AppState>,
    CurrentFilter(filter): CurrentFilter,
) -> Result<Html<String>, ApiError> {
    let view = compose_index_view(&state.service, filter).await?;
    let html = state.templates.render(INDEX_TEMPLATE, &view)?;
    Ok(Html(html))
}

/// POST /todo - Create a task.
///
/// # Errors
///
/// - `400 Bad Request` if the body has no `title` or the title is blank
/// - `500 Internal Server Error` if the store fails
pub async fn new_todo(
    State(state): State<AppState>,
    FormOrJson(form): FormOrJson<TodoForm>,
) -> Result<Redirect, ApiError> {
    let title = TaskTitle::new(form.title)?;
    state.service.save(title).await?;
    Ok(back_to_index())
}

/// POST /todo/{id}/edit - Rename a task.
///
/// # Errors
///
/// - `400 Bad Request` if the body has no `title` or the title is blank
/// - `500 Internal Server Error` if the store fails
pub async fn edit_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    FormOrJson(form): FormOrJson<TodoForm>,
) -> Result<Redirect, ApiError> {
    let title = TaskTitle::new(form.title)?;
    state.service.edit(TaskId::new(id), &title).await?;
    Ok(back_to_index())
}

/// POST /todo/{id}/complete - Set a task's completion flag.
///
/// # Errors
///
/// - `400 Bad Request` if `completed` is not a boolean
/// - `500 Internal Server Error` if the store fails
pub async fn complete_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    FormOrJson(form): FormOrJson<CompleteForm>,
) -> Result<Redirect, ApiError> {
    state.service.complete(TaskId::new(id), form.completed).await?;
    Ok(back_to_index())
}

/// POST /todo/{id}/delete - Delete a task.
///
/// # Errors
///
/// Returns `500 Internal Server Error` if the store fails.
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect, ApiError> {
    state.service.delete(TaskId::new(id)).await?;
    Ok(back_to_index())
}

/// POST /todo/complete_all - Set every task's completion flag.
///
/// # Errors
///
/// - `400 Bad Request` if `completed` is not a boolean
/// - `500 Internal Server Error` if the store fails
pub async fn complete_all(
    State(state): State<AppState>,
    FormOrJson(form): FormOrJson<CompleteForm>,
) -> Result<Redirect, ApiError> {
    state.service.complete_all(form.completed).await?;
    Ok(back_to_index())
}

/// POST /todo/delete_completed - Delete every completed task.
///
/// # Errors
///
/// Returns `500 Internal Server Error` if the store fails.
pub async fn delete_completed(
    State(state): State<AppState>,
) -> Result<Redirect, ApiError> {
    state.service.delete_completed().await?;
    Ok(back_to_index())
}

// =============================================================================
// Health
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status (`healthy` or `unhealthy`).
    pub status: String,
    pub version: String,
}

/// GET /health - Health check endpoint.
///
/// Reports `unhealthy` with `503` when the store cannot answer a count.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (status, label) = match state.service.count(None).await {
        Ok(_) => (StatusCode::OK, "healthy"),
        Err(error) => {
            tracing::warn!(error = %error, "Health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
        }
    };
    let response = HealthResponse {
        status: label.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };
    (status, Json(response))
}
