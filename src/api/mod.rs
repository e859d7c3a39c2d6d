//! HTTP layer.
//!
//! - [`routes`]: router assembly
//! - [`handlers`]: request handlers
//! - [`middleware`]: filter propagation across redirects
//! - [`extract`]: form-or-JSON body extraction
//! - [`dto`]: request bodies
//! - [`templates`]: compiled HTML templates
//! - [`error`]: error responses

pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod templates;

pub use error::{ApiError, ErrorCode, FieldError};
pub use routes::create_router;
pub use state::AppState;
pub use templates::{TemplateError, Templates};
