//! Route configuration.
//!
//! # Routes
//!
//! | Method | Path | Handler | Description |
//! |--------|------|---------|-------------|
//! | GET | / | `index` | Task list for the current filter |
//! | POST | /todo | `new_todo` | Create a task |
//! | POST | /todo/{id}/edit | `edit_todo` | Rename a task |
//! | POST | /todo/{id}/complete | `complete_todo` | Set completion |
//! | POST | /todo/{id}/delete | `delete_todo` | Delete a task |
//! | POST | /todo/complete_all | `complete_all` | Set completion on every task |
//! | POST | /todo/delete_completed | `delete_completed` | Delete completed tasks |
//! | GET | /favicon.ico | `ServeFile` | Static icon |
//! | GET | /health | `health_check` | Health check |

use std::path::Path;

use axum::Router;
use axum::routing::{get, post};
use tower_http::services::ServeFile;
use tower_http::trace::TraceLayer;

use crate::api::handlers::{
    complete_all, complete_todo, delete_completed, delete_todo, edit_todo, health_check, index,
    new_todo,
};
use crate::api::middleware::TodoFilterLayer;
use crate::api::state::AppState;

/// Creates the router with every route, the filter layer and request tracing.
///
/// `static_dir` must contain `favicon.ico`; a missing file yields `404`.
pub fn create_router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/", get(index))
        // Task routes
        .route("/todo", post(new_todo))
        .route("/todo/{id}/edit", post(edit_todo))
        .route("/todo/{id}/complete", post(complete_todo))
        .route("/todo/{id}/delete", post(delete_todo))
        .route("/todo/complete_all", post(complete_all))
        .route("/todo/delete_completed", post(delete_completed))
        // Static and health
        .route_service("/favicon.ico", ServeFile::new(static_dir.join("favicon.ico")))
        .route("/health", get(health_check))
        .layer(TodoFilterLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
