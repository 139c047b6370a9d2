mod common;

use axum_test::TestServer;
use linkcut::routes::app_router;
use linkcut::utils::code_generator::is_valid_code;
use serde_json::{Value, json};

fn server() -> (TestServer, std::sync::Arc<common::MemoryLinkRepository>) {
    let (state, repository) = common::create_test_state();
    (TestServer::new(app_router(state)).unwrap(), repository)
}

#[tokio::test]
async fn test_create_link_returns_created_record() {
    let (server, _repo) = server();

    let response = server
        .post("/api/links")
        .json(&json!({ "url": "https://example.com/some/long/path" }))
        .await;

    assert_eq!(response.status_code(), 201);

    let body: Value = response.json();
    assert!(is_valid_code(body["code"].as_str().unwrap()));
    assert_eq!(body["url"], "https://example.com/some/long/path");
    assert_eq!(body["clicks"], 0);
    assert!(body["last_clicked_at"].is_null());
    assert!(body["created_at"].is_string());
}

#[tokio::test]
async fn test_create_link_with_custom_code() {
    let (server, _repo) = server();

    let response = server
        .post("/api/links")
        .json(&json!({ "url": "https://example.com", "code": "abc123" }))
        .await;

    assert_eq!(response.status_code(), 201);

    let body: Value = response.json();
    assert_eq!(body["code"], "abc123");
}

#[tokio::test]
async fn test_create_link_duplicate_custom_code_conflicts() {
    let (server, _repo) = server();

    let first = server
        .post("/api/links")
        .json(&json!({ "url": "https://example.com", "code": "abc123" }))
        .await;
    assert_eq!(first.status_code(), 201);

    let second = server
        .post("/api/links")
        .json(&json!({ "url": "https://other.example.com", "code": "abc123" }))
        .await;

    assert_eq!(second.status_code(), 409);

    let body: Value = second.json();
    assert!(body["error"].as_str().unwrap().contains("already exists"));
}

#[tokio::test]
async fn test_create_link_invalid_url_persists_nothing() {
    let (server, repo) = server();

    let response = server
        .post("/api/links")
        .json(&json!({ "url": "not-a-url" }))
        .await;

    assert_eq!(response.status_code(), 400);
    assert!(repo.stored("not-a-url").is_none());

    let list = server.get("/api/links").await;
    let body: Value = list.json();
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_create_link_missing_url() {
    let (server, _repo) = server();

    let response = server.post("/api/links").json(&json!({})).await;

    assert_eq!(response.status_code(), 400);

    let body: Value = response.json();
    assert_eq!(body["error"], "URL is required");
}

#[tokio::test]
async fn test_create_link_non_string_url() {
    let (server, _repo) = server();

    let response = server
        .post("/api/links")
        .json(&json!({ "url": 42 }))
        .await;

    assert_eq!(response.status_code(), 400);

    let body: Value = response.json();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_create_link_rejects_bad_custom_code() {
    let (server, _repo) = server();

    for bad_code in ["abc", "toolongcode123", "abc-12", "abc 12"] {
        let response = server
            .post("/api/links")
            .json(&json!({ "url": "https://example.com", "code": bad_code }))
            .await;

        assert_eq!(
            response.status_code(),
            400,
            "code {bad_code:?} should be rejected"
        );
    }
}

#[tokio::test]
async fn test_create_link_rejects_non_http_scheme() {
    let (server, _repo) = server();

    let response = server
        .post("/api/links")
        .json(&json!({ "url": "javascript:alert(1)" }))
        .await;

    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_get_link() {
    let (server, repo) = server();
    common::seed_link(&repo, "abc123", "https://example.com").await;

    let response = server.get("/api/links/abc123").await;

    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["code"], "abc123");
    assert_eq!(body["url"], "https://example.com");
}

#[tokio::test]
async fn test_get_link_not_found() {
    let (server, _repo) = server();

    let response = server.get("/api/links/nosuch1").await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_delete_link_then_get_returns_not_found() {
    let (server, repo) = server();
    common::seed_link(&repo, "abc123", "https://example.com").await;

    let response = server.delete("/api/links/abc123").await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["success"], true);

    let after = server.get("/api/links/abc123").await;
    after.assert_status_not_found();
}

#[tokio::test]
async fn test_delete_link_not_found() {
    let (server, _repo) = server();

    let response = server.delete("/api/links/nosuch1").await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_list_links_newest_first() {
    let (server, repo) = server();
    common::seed_link(&repo, "first1", "https://example.com/1").await;
    common::seed_link(&repo, "second2", "https://example.com/2").await;
    common::seed_link(&repo, "third33", "https://example.com/3").await;

    let response = server.get("/api/links").await;

    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    let codes: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["code"].as_str().unwrap())
        .collect();

    assert_eq!(codes, vec!["third33", "second2", "first1"]);
}
