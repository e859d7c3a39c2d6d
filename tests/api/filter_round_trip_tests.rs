//! Filter propagation across GET -> POST -> 303 -> GET.

use axum::http::StatusCode;
use rstest::rstest;
use todo_web::domain::Filter;

use crate::common::*;

/// Mutating requests a page can issue, as `(path, form body)`.
fn mutations(id: i64) -> Vec<(String, String)> {
    vec![
        ("/todo".to_string(), "title=another".to_string()),
        (format!("/todo/{id}/edit"), "title=renamed".to_string()),
        (format!("/todo/{id}/complete"), "completed=true".to_string()),
        ("/todo/complete_all".to_string(), "completed=false".to_string()),
        ("/todo/delete_completed".to_string(), String::new()),
        (format!("/todo/{id}/delete"), String::new()),
    ]
}

#[rstest]
#[case(Filter::All)]
#[case(Filter::Active)]
#[case(Filter::Completed)]
#[tokio::test]
async fn every_mutation_returns_to_the_same_filter(#[case] filter: Filter) {
    let client = TodoClient::in_memory().await;
    let task = client.seed("first", false).await;
    client.seed("second", true).await;

    let page = client.get(&expected_location(filter)).await;
    assert_eq!(page.status, StatusCode::OK);
    assert_eq!(page.rendered_filter(), Some(filter.as_str()));

    for (path, body) in mutations(task.id.value()) {
        let response = client
            .post_form(&path, &body, Some(&page_url(filter)))
            .await;
        assert_redirect_to(&response, &expected_location(filter));

        let next = client.follow(&response).await;
        assert_eq!(next.status, StatusCode::OK);
        assert_eq!(next.rendered_filter(), Some(filter.as_str()), "after POST {path}");
    }
}

#[rstest]
#[case(Filter::Active)]
#[case(Filter::Completed)]
#[tokio::test]
async fn filter_survives_repeated_round_trips(#[case] filter: Filter) {
    let client = TodoClient::sqlite().await;
    let mut url = page_url(filter);

    for index in 0..5 {
        let response = client
            .post_form("/todo", &format!("title=task+{index}"), Some(&url))
            .await;
        assert_redirect_to(&response, &expected_location(filter));

        let next = client.follow(&response).await;
        assert_eq!(next.rendered_filter(), Some(filter.as_str()));
        url = format!("{BASE_URL}{}", response.location().unwrap());
    }

    assert_eq!(client.service().count(None).await.unwrap(), 5);
}

#[rstest]
#[tokio::test]
async fn index_without_query_is_all() {
    let client = TodoClient::in_memory().await;

    let page = client.get("/").await;

    assert_eq!(page.status, StatusCode::OK);
    assert_eq!(page.rendered_filter(), Some("all"));
}

#[rstest]
#[case("/?filter=bogus")]
#[case("/?filter=")]
#[case("/?filter=ACTIVE")]
#[case("/?filter=all")]
#[tokio::test]
async fn unrecognized_filter_renders_all(#[case] uri: &str) {
    let client = TodoClient::in_memory().await;

    let page = client.get(uri).await;

    assert_eq!(page.rendered_filter(), Some("all"));
}

#[rstest]
#[case(None)]
#[case(Some("http://localhost:8000/"))]
#[case(Some("http://localhost:8000/?filter=all"))]
#[case(Some("::not a url::"))]
#[tokio::test]
async fn post_without_usable_referer_redirects_bare(#[case] referer: Option<&str>) {
    let client = TodoClient::in_memory().await;

    let response = client.post_form("/todo", "title=x", referer).await;

    assert_redirect_to(&response, "/");
}

#[rstest]
#[tokio::test]
async fn explicit_query_on_post_overrides_referer() {
    let client = TodoClient::in_memory().await;

    let response = client
        .post_form(
            "/todo?filter=completed",
            "title=x",
            Some(&page_url(Filter::Active)),
        )
        .await;

    assert_redirect_to(&response, "/?filter=completed");
}

#[rstest]
#[tokio::test]
async fn filtered_page_lists_only_matching_tasks() {
    let client = TodoClient::in_memory().await;
    client.seed("open task", false).await;
    client.seed("done task", true).await;

    let active = client.get("/?filter=active").await;
    let completed = client.get("/?filter=completed").await;

    assert!(active.body.contains("open task"));
    assert!(!active.body.contains("done task"));
    assert!(completed.body.contains("done task"));
    assert!(!completed.body.contains("open task"));
    for page in [&active, &completed] {
        assert!(page.body.contains(r#"data-total-count="2""#));
        assert!(page.body.contains(r#"data-active-count="1""#));
        assert!(page.body.contains(r#"data-completed-count="1""#));
    }
}

#[rstest]
#[tokio::test]
async fn failed_post_is_not_redirected() {
    let client = TodoClient::in_memory().await;

    let response = client
        .post_form("/todo", "title=+++", Some(&page_url(Filter::Active)))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.location().is_none());
}
