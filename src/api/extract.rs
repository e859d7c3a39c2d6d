//! Request body extraction.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;

use crate::api::error::ApiError;

/// Body decoded from JSON when the request says so, from an URL-encoded form
/// otherwise.
///
/// Browsers post forms, scripts may post JSON; both hit the same handler.
/// An empty body decodes as an empty form.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormOrJson<T>(pub T);

impl<T, State> FromRequest<State> for FormOrJson<T>
where
    T: DeserializeOwned,
    State: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(request: Request, state: &State) -> Result<Self, Self::Rejection> {
        let is_json = request
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.trim_start().starts_with("application/json"));

        let bytes = Bytes::from_request(request, state)
            .await
            .map_err(|rejection| ApiError::invalid_body(rejection.body_text()))?;

        let decoded = if is_json {
            serde_json::from_slice(&bytes).map_err(|error| error.to_string())
        } else {
            serde_urlencoded::from_bytes(&bytes).map_err(|error| error.to_string())
        };

        decoded
            .map(Self)
            .map_err(ApiError::invalid_body)
    }
}
