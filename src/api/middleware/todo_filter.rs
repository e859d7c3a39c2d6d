//! Filter propagation across POST/redirect/GET.
//!
//! Mutating endpoints are reached through form posts without a query string
//! and answer with `303 See Other` to `/`. To land the browser back on the
//! view it came from, the filter is resolved before the handler runs and
//! re-embedded into the redirect `Location` afterwards.
//!
//! Resolution order:
//!
//! 1. a non-empty `filter` parameter on the request's own query string
//! 2. the index path `/` without one means `all`
//! 3. the `filter` parameter on the `Referer` URL, else `all`
//!
//! The referer fallback trusts whatever page the browser reports; a missing
//! or unparsable referer silently resolves to `all`.

use std::convert::Infallible;
use std::task::{Context, Poll};

use axum::extract::FromRequestParts;
use axum::http::header::{LOCATION, REFERER};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue, Request, Response, StatusCode, Uri};
use futures::future::BoxFuture;
use tower::{Layer, Service};
use url::{Position, Url, form_urlencoded};

use crate::domain::{FILTER_PARAM, Filter};

const INDEX_PATH: &str = "/";
const REFERENCE_BASE: &str = "http://localhost/";

// =============================================================================
// Resolution
// =============================================================================

/// Resolves the filter for a request.
///
/// `query` is the raw query string without the leading `?`.
#[must_use]
pub fn resolve_filter(query: Option<&str>, path: &str, referer: Option<&str>) -> Filter {
    if let Some(value) = query.and_then(filter_param) {
        return Filter::from_param(&value);
    }
    if path == INDEX_PATH {
        return Filter::All;
    }
    referer
        .and_then(referer_filter)
        .map_or(Filter::All, |value| Filter::from_param(&value))
}

fn resolve_from_request(uri: &Uri, headers: &HeaderMap) -> Filter {
    let referer = headers
        .get(REFERER)
        .and_then(|value| value.to_str().ok());
    resolve_filter(uri.query(), uri.path(), referer)
}

/// First non-empty `filter` value in a query string.
fn filter_param(query: &str) -> Option<String> {
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, value)| key == FILTER_PARAM && !value.is_empty())
        .map(|(_, value)| value.into_owned())
}

/// Resolves absolute and relative references against a fixed origin.
fn join_reference(reference: &str) -> Option<Url> {
    Url::parse(REFERENCE_BASE).ok()?.join(reference).ok()
}

fn referer_filter(referer: &str) -> Option<String> {
    join_reference(referer)?.query().and_then(filter_param)
}

// =============================================================================
// Location Patching
// =============================================================================

/// Re-embeds `filter` into a redirect target.
///
/// `All` leaves the target untouched. Otherwise every existing `filter`
/// pair is dropped and exactly one `filter=<value>` is appended; the path,
/// the other pairs and any fragment are kept. Relative targets stay
/// relative. A target that cannot be parsed is returned as is.
#[must_use]
pub fn patch_location(location: &str, filter: Filter) -> String {
    if filter.is_all() {
        return location.to_string();
    }
    let Some(mut url) = join_reference(location) else {
        return location.to_string();
    };

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != FILTER_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair(FILTER_PARAM, filter.as_str());

    if Url::parse(location).is_ok() {
        url.into()
    } else {
        url[Position::BeforePath..].to_string()
    }
}

fn patch_response<ResponseBody>(response: &mut Response<ResponseBody>, filter: Filter) {
    if response.status() != StatusCode::SEE_OTHER || filter.is_all() {
        return;
    }

    let Some(location) = response
        .headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
    else {
        return;
    };

    let patched = patch_location(location, filter);
    match HeaderValue::from_str(&patched) {
        Ok(value) => {
            tracing::debug!(from = %location, to = %patched, "Redirect location patched");
            response.headers_mut().insert(LOCATION, value);
        }
        Err(error) => {
            tracing::warn!(location = %patched, error = %error, "Patched location is not a valid header");
        }
    }
}

// =============================================================================
// CurrentFilter Extractor
// =============================================================================

/// Filter resolved for the current request.
///
/// Set by [`TodoFilterLayer`]; recomputed from the request when the layer is
/// not installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CurrentFilter(pub Filter);

impl<State> FromRequestParts<State> for CurrentFilter
where
    State: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &State,
    ) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<Self>()
            .copied()
            .unwrap_or_else(|| Self(resolve_from_request(&parts.uri, &parts.headers))))
    }
}

// =============================================================================
// TodoFilterLayer
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct TodoFilterLayer;

impl TodoFilterLayer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl<Service> Layer<Service> for TodoFilterLayer {
    type Service = TodoFilterService<Service>;

    fn layer(&self, inner: Service) -> Self::Service {
        TodoFilterService { inner }
    }
}

// =============================================================================
// TodoFilterService
// =============================================================================

#[derive(Debug, Clone)]
pub struct TodoFilterService<Service> {
    inner: Service,
}

impl<InnerService, RequestBody, ResponseBody> Service<Request<RequestBody>>
    for TodoFilterService<InnerService>
where
    InnerService:
        Service<Request<RequestBody>, Response = Response<ResponseBody>> + Clone + Send + 'static,
    InnerService::Future: Send,
    RequestBody: Send + 'static,
    ResponseBody: Send + 'static,
{
    type Response = Response<ResponseBody>;
    type Error = InnerService::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, context: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(context)
    }

    fn call(&mut self, mut request: Request<RequestBody>) -> Self::Future {
        let filter = resolve_from_request(request.uri(), request.headers());
        tracing::debug!(filter = %filter, path = %request.uri().path(), "Filter resolved");
        request.extensions_mut().insert(CurrentFilter(filter));

        let mut inner = self.inner.clone();

        Box::pin(async move {
            let mut response = inner.call(request).await?;
            patch_response(&mut response, filter);
            Ok(response)
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
