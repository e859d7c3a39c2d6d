//! Application layer.
//!
//! - [`service`]: named read/write operations over the task store
//! - [`view`]: index page context composition

pub mod service;
pub mod view;

pub use service::TaskService;
pub use view::{IndexView, compose_index_view};
