//! Integration tests for the task endpoints.

use axum::http::StatusCode;
use rstest::rstest;
use serde_json::json;

use crate::common::*;

async fn client_for(backend: &str) -> TodoClient {
    match backend {
        "sqlite" => TodoClient::sqlite().await,
        _ => TodoClient::in_memory().await,
    }
}

// =============================================================================
// Create / Edit
// =============================================================================

#[rstest]
#[case("in_memory")]
#[case("sqlite")]
#[tokio::test]
async fn create_from_form_appears_on_index(#[case] backend: &str) {
    let client = client_for(backend).await;

    let response = client.post_form("/todo", "title=buy+milk", None).await;
    assert_redirect_to(&response, "/");

    let page = client.follow(&response).await;
    assert!(page.body.contains("buy milk"));
    assert!(page.body.contains(r#"data-active-count="1""#));
}

#[rstest]
#[tokio::test]
async fn create_from_json() {
    let client = TodoClient::in_memory().await;

    let response = client.post_json("/todo", &json!({"title": "from script"})).await;

    assert_redirect_to(&response, "/");
    let tasks = client.service().get_all().await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title.as_str(), "from script");
    assert!(!tasks[0].is_completed);
}

#[rstest]
#[case("", "INVALID_BODY")]
#[case("name=x", "INVALID_BODY")]
#[case("title=", "VALIDATION_ERROR")]
#[case("title=%20%20", "VALIDATION_ERROR")]
#[tokio::test]
async fn invalid_create_has_no_side_effect(#[case] body: &str, #[case] code: &str) {
    let client = TodoClient::in_memory().await;

    let response = client.post_form("/todo", body, None).await;

    assert_error_code(&response, StatusCode::BAD_REQUEST, code);
    assert_eq!(client.service().count(None).await.unwrap(), 0);
}

#[rstest]
#[tokio::test]
async fn wrong_json_type_is_rejected() {
    let client = TodoClient::in_memory().await;

    let response = client.post_json("/todo", &json!({"title": 42})).await;

    assert_error_code(&response, StatusCode::BAD_REQUEST, "INVALID_BODY");
}

#[rstest]
#[case("in_memory")]
#[case("sqlite")]
#[tokio::test]
async fn edit_renames_and_keeps_completion(#[case] backend: &str) {
    let client = client_for(backend).await;
    let task = client.seed("old", true).await;

    let response = client
        .post_form(&format!("/todo/{}/edit", task.id), "title=new", None)
        .await;

    assert_redirect_to(&response, "/");
    let stored = client.service().get_one(task.id).await.unwrap().unwrap();
    assert_eq!(stored.title.as_str(), "new");
    assert!(stored.is_completed);
}

#[rstest]
#[tokio::test]
async fn edit_missing_id_is_a_no_op() {
    let client = TodoClient::in_memory().await;
    client.seed("kept", false).await;

    let response = client.post_form("/todo/999/edit", "title=ghost", None).await;

    assert_redirect_to(&response, "/");
    let tasks = client.service().get_all().await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title.as_str(), "kept");
}

#[rstest]
#[tokio::test]
async fn non_numeric_id_is_rejected() {
    let client = TodoClient::in_memory().await;

    let response = client.post_form("/todo/abc/delete", "", None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Completion
// =============================================================================

#[rstest]
#[case("completed=true", true)]
#[case("completed=on", true)]
#[case("completed=false", false)]
#[case("", false)]
#[tokio::test]
async fn complete_sets_flag(#[case] body: &str, #[case] expected: bool) {
    let client = TodoClient::in_memory().await;
    let task = client.seed("toggle", !expected).await;

    let response = client
        .post_form(&format!("/todo/{}/complete", task.id), body, None)
        .await;

    assert_redirect_to(&response, "/");
    let stored = client.service().get_one(task.id).await.unwrap().unwrap();
    assert_eq!(stored.is_completed, expected);
}

#[rstest]
#[tokio::test]
async fn complete_rejects_unknown_value() {
    let client = TodoClient::in_memory().await;
    let task = client.seed("toggle", false).await;

    let response = client
        .post_form(&format!("/todo/{}/complete", task.id), "completed=maybe", None)
        .await;

    assert_error_code(&response, StatusCode::BAD_REQUEST, "INVALID_BODY");
    let stored = client.service().get_one(task.id).await.unwrap().unwrap();
    assert!(!stored.is_completed);
}

#[rstest]
#[case("in_memory")]
#[case("sqlite")]
#[tokio::test]
async fn complete_all_marks_every_task(#[case] backend: &str) {
    let client = client_for(backend).await;
    client.seed("a", false).await;
    client.seed("b", true).await;
    client.seed("c", false).await;

    let response = client
        .post_form("/todo/complete_all", "completed=true", None)
        .await;

    assert_redirect_to(&response, "/");
    let service = client.service();
    assert_eq!(
        service.count(Some(true)).await.unwrap(),
        service.count(None).await.unwrap()
    );
    assert!(service.get_all().await.unwrap().iter().all(|task| task.is_completed));
}

#[rstest]
#[tokio::test]
async fn complete_all_false_reopens_every_task() {
    let client = TodoClient::in_memory().await;
    client.seed("a", true).await;
    client.seed("b", true).await;

    client
        .post_json("/todo/complete_all", &json!({"completed": false}))
        .await;

    assert_eq!(client.service().count(Some(false)).await.unwrap(), 2);
}

// =============================================================================
// Delete
// =============================================================================

#[rstest]
#[case("in_memory")]
#[case("sqlite")]
#[tokio::test]
async fn delete_twice_is_idempotent(#[case] backend: &str) {
    let client = client_for(backend).await;
    let task = client.seed("gone", false).await;
    client.seed("stays", false).await;
    let path = format!("/todo/{}/delete", task.id);

    let first = client.post_form(&path, "", None).await;
    assert_redirect_to(&first, "/");
    let after_first = client.service().get_all().await.unwrap();

    let second = client.post_form(&path, "", None).await;
    assert_redirect_to(&second, "/");
    let after_second = client.service().get_all().await.unwrap();

    assert_eq!(after_first, after_second);
    assert_eq!(after_second.len(), 1);
    assert_eq!(after_second[0].title.as_str(), "stays");
}

#[rstest]
#[case("in_memory")]
#[case("sqlite")]
#[tokio::test]
async fn delete_completed_leaves_only_active(#[case] backend: &str) {
    let client = client_for(backend).await;
    client.seed("a", true).await;
    client.seed("b", false).await;
    client.seed("c", true).await;

    let response = client.post_form("/todo/delete_completed", "", None).await;

    assert_redirect_to(&response, "/");
    let service = client.service();
    assert_eq!(service.count(Some(true)).await.unwrap(), 0);
    let remaining = service.get_all().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert!(remaining.iter().all(|task| !task.is_completed));
}

// =============================================================================
// Routing
// =============================================================================

#[rstest]
#[tokio::test]
async fn get_on_mutating_route_is_not_allowed() {
    let client = TodoClient::in_memory().await;

    let response = client.get("/todo/delete_completed").await;

    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
}

#[rstest]
#[tokio::test]
async fn favicon_is_served() {
    let client = TodoClient::in_memory().await;

    let response = client.get("/favicon.ico").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(!response.body.is_empty());
}
