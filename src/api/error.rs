//! API error handling.
//!
//! Client mistakes (unreadable bodies, blank titles) map to `400`; store and
//! template failures map to a generic `500` and are logged, never echoed.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::api::templates::TemplateError;
use crate::domain::TaskValidationError;
use crate::infrastructure::StoreError;

const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Machine-readable error kind, serialized as `INVALID_BODY` and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidBody,
    ValidationError,
    InternalError,
}

impl ErrorCode {
    #[must_use]
    pub const fn status(self) -> StatusCode {
        match self {
            Self::InvalidBody | Self::ValidationError => StatusCode::BAD_REQUEST,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// One rejected request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// JSON error body returned by every failing handler.
///
/// The HTTP status follows from [`ErrorCode::status`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<FieldError>,
}

impl ApiError {
    /// Body that could not be read or decoded into the expected shape.
    #[must_use]
    pub fn invalid_body(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::InvalidBody,
            message: message.into(),
            details: Vec::new(),
        }
    }

    fn internal() -> Self {
        Self {
            code: ErrorCode::InternalError,
            message: INTERNAL_MESSAGE.to_string(),
            details: Vec::new(),
        }
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.code.status()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(error: StoreError) -> Self {
        tracing::error!(error = %error, "Store operation failed");
        Self::internal()
    }
}

impl From<TemplateError> for ApiError {
    fn from(error: TemplateError) -> Self {
        tracing::error!(error = %error, "Template rendering failed");
        Self::internal()
    }
}

impl From<TaskValidationError> for ApiError {
    fn from(error: TaskValidationError) -> Self {
        Self {
            code: ErrorCode::ValidationError,
            message: "Validation failed".to_string(),
            details: vec![FieldError {
                field: "title",
                message: error.to_string(),
            }],
        }
    }
}
