//! Shared handler state.

use std::sync::Arc;

use crate::api::templates::Templates;
use crate::application::TaskService;

/// State handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub service: TaskService,
    pub templates: Arc<Templates>,
}

impl AppState {
    #[must_use]
    pub fn new(service: TaskService, templates: Templates) -> Self {
        Self {
            service,
            templates: Arc::new(templates),
        }
    }
}
