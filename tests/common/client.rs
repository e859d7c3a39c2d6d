//! In-process HTTP client over the application router.

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, LOCATION, REFERER};
use axum::http::{HeaderMap, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use todo_web::api::{AppState, Templates, create_router};
use todo_web::application::TaskService;
use todo_web::domain::{Task, TaskTitle};
use todo_web::infrastructure::{InMemoryTaskStore, SqliteTaskStore, TaskStore};

pub const BASE_URL: &str = "http://localhost:8000";

#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
    }

    /// Value of the `data-filter` attribute on the rendered page.
    pub fn rendered_filter(&self) -> Option<&str> {
        let start = self.body.find(r#"data-filter=""#)? + r#"data-filter=""#.len();
        let end = self.body[start..].find('"')? + start;
        Some(&self.body[start..end])
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("response body should be JSON")
    }
}

#[derive(Clone)]
pub struct TodoClient {
    router: Router,
    service: TaskService,
}

impl TodoClient {
    pub fn with_store(store: Arc<dyn TaskStore>) -> Self {
        let service = TaskService::new(store);
        let templates = Templates::new().expect("templates should compile");
        let state = AppState::new(service.clone(), templates);
        let router = create_router(state, &static_dir());
        Self { router, service }
    }

    pub async fn in_memory() -> Self {
        let store = InMemoryTaskStore::new();
        store.initialize().await.expect("in-memory store should initialize");
        Self::with_store(Arc::new(store))
    }

    pub async fn sqlite() -> Self {
        let store = SqliteTaskStore::in_memory()
            .await
            .expect("in-memory SQLite should open");
        store.initialize().await.expect("schema should be created");
        Self::with_store(Arc::new(store))
    }

    pub fn service(&self) -> &TaskService {
        &self.service
    }

    pub async fn seed(&self, title: &str, is_completed: bool) -> Task {
        let task = self
            .service
            .save(TaskTitle::new(title).expect("seed title should be valid"))
            .await
            .expect("seed should be stored");
        if is_completed {
            self.service
                .complete(task.id, true)
                .await
                .expect("seed should be completed");
        }
        task
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .expect("request should build");
        self.send(request).await
    }

    /// Posts an URL-encoded form as a browser would from `referer`.
    pub async fn post_form(&self, uri: &str, body: &str, referer: Option<&str>) -> TestResponse {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(referer) = referer {
            builder = builder.header(REFERER, referer);
        }
        let request = builder
            .body(Body::from(body.to_string()))
            .expect("request should build");
        self.send(request).await
    }

    pub async fn post_json(&self, uri: &str, body: &serde_json::Value) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request should build");
        self.send(request).await
    }

    /// Follows a `303` the way a browser does: `GET` the `Location`.
    pub async fn follow(&self, response: &TestResponse) -> TestResponse {
        assert_eq!(response.status, StatusCode::SEE_OTHER, "expected a 303 redirect");
        let location = response.location().expect("redirect should carry Location");
        self.get(location).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body should be readable")
            .to_bytes();
        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

fn static_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("resources/static")
}
