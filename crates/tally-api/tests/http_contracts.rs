//! Wire-contract tests for the entry API
//!
//! Each test drives the full router against a store rooted in a temp
//! directory and asserts the status codes and JSON bodies of the public
//! contract.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use std::sync::Arc;
use tally_api::{create_router, AppState};
use tally_config::Config;
use tally_core::JsonFileStore;
use tower::ServiceExt;

fn entries_file(dir: &tempfile::TempDir) -> std::path::PathBuf {
    dir.path().join("data").join("entries.json")
}

fn test_app(dir: &tempfile::TempDir) -> Router {
    let state = AppState {
        store: Arc::new(JsonFileStore::new(entries_file(dir))),
        config: Config::default(),
    };
    create_router(state)
}

async fn read_body(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    read_body(response).await
}

async fn post_json(app: Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    read_body(response).await
}

async fn delete_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    read_body(response).await
}

#[tokio::test]
async fn test_list_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let (status, body) = get_json(app, "/api/entries").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["entries"].as_array().unwrap().len(), 0);
    assert_eq!(body["total"].as_f64(), Some(0.0));
}

#[tokio::test]
async fn test_create_from_raw_value_with_label() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let (status, body) = post_json(
        app.clone(),
        "/api/entries",
        r#"{"rawValue": "10,00 €", "label": "coffee"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["entry"]["amount"].as_f64(), Some(10.0));
    assert_eq!(body["entry"]["rawValue"], "10,00 €");
    assert_eq!(body["entry"]["label"], "coffee");
    assert!(!body["entry"]["id"].as_str().unwrap().is_empty());
    assert!(body["entry"]["createdAt"].as_i64().unwrap() > 0);
    assert_eq!(body["total"].as_f64(), Some(10.0));

    let (status, body) = get_json(app, "/api/entries").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["entries"].as_array().unwrap().len(), 1);
    assert_eq!(body["total"].as_f64(), Some(10.0));
}

#[tokio::test]
async fn test_create_accumulates_and_delete_subtracts() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let (_, first) = post_json(app.clone(), "/api/entries", r#"{"amount": 5}"#).await;
    let first_id = first["entry"]["id"].as_str().unwrap().to_string();

    let (_, second) = post_json(app.clone(), "/api/entries", r#"{"amount": 7}"#).await;
    assert_eq!(second["total"].as_f64(), Some(12.0));

    let (status, body) = get_json(app.clone(), "/api/entries").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"].as_f64(), Some(12.0));

    let (status, body) = delete_json(app.clone(), &format!("/api/entries/{}", first_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"].as_f64(), Some(7.0));

    let (_, body) = get_json(app, "/api/entries").await;
    assert_eq!(body["entries"].as_array().unwrap().len(), 1);
    assert_eq!(body["total"].as_f64(), Some(7.0));
}

#[tokio::test]
async fn test_create_prepends_newest_first() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    post_json(app.clone(), "/api/entries", r#"{"amount": 1, "label": "older"}"#).await;
    post_json(app.clone(), "/api/entries", r#"{"amount": 2, "label": "newer"}"#).await;

    let (_, body) = get_json(app, "/api/entries").await;
    let entries = body["entries"].as_array().unwrap();
    assert_eq!(entries[0]["label"], "newer");
    assert_eq!(entries[1]["label"], "older");
}

#[tokio::test]
async fn test_create_accepts_text_amount_field() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let (status, body) = post_json(app, "/api/entries", r#"{"amount": "12,50"}"#).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["entry"]["amount"].as_f64(), Some(12.5));
    assert_eq!(body["entry"]["rawValue"], "12,50");
    assert_eq!(body["entry"]["label"], "");
}

#[tokio::test]
async fn test_create_keeps_client_supplied_id() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let (_, body) = post_json(
        app.clone(),
        "/api/entries",
        r#"{"amount": 3, "id": "given-id"}"#,
    )
    .await;
    assert_eq!(body["entry"]["id"], "given-id");

    let (status, _) = delete_json(app, "/api/entries/given-id").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_create_rejects_unparseable_amount() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let (status, body) = post_json(app.clone(), "/api/entries", r#"{"rawValue": "abc"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid amount value.");

    // Nothing was written.
    let (_, body) = get_json(app, "/api/entries").await;
    assert_eq!(body["entries"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_create_rejects_empty_body() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let (status, body) = post_json(app, "/api/entries", "{}").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid amount value.");
}

#[tokio::test]
async fn test_delete_unknown_id_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    post_json(app.clone(), "/api/entries", r#"{"amount": 4}"#).await;

    let (status, body) = delete_json(app.clone(), "/api/entries/no-such-id").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Entry not found.");

    // The collection is untouched.
    let (_, body) = get_json(app, "/api/entries").await;
    assert_eq!(body["entries"].as_array().unwrap().len(), 1);
    assert_eq!(body["total"].as_f64(), Some(4.0));
}

#[tokio::test]
async fn test_reset_clears_everything() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    post_json(app.clone(), "/api/entries", r#"{"amount": 5}"#).await;
    post_json(app.clone(), "/api/entries", r#"{"amount": 7}"#).await;

    let (status, body) = post_json(app.clone(), "/api/entries/reset", "{}").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "All entries cleared.");

    let (_, body) = get_json(app, "/api/entries").await;
    assert_eq!(body["entries"].as_array().unwrap().len(), 0);
    assert_eq!(body["total"].as_f64(), Some(0.0));
}

#[tokio::test]
async fn test_reset_path_wins_over_delete_by_id() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    post_json(
        app.clone(),
        "/api/entries",
        r#"{"amount": 1, "id": "reset"}"#,
    )
    .await;

    // The static reset route matches first and registers no DELETE
    // handler, so the :id route never sees this request.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/entries/reset")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    let (_, body) = get_json(app, "/api/entries").await;
    assert_eq!(body["entries"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_corrupt_entry_file_lists_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    std::fs::create_dir_all(entries_file(&dir).parent().unwrap()).unwrap();
    std::fs::write(entries_file(&dir), "{{{ definitely not json").unwrap();

    let (status, body) = get_json(app, "/api/entries").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["entries"].as_array().unwrap().len(), 0);
    assert_eq!(body["total"].as_f64(), Some(0.0));
}

#[tokio::test]
async fn test_storage_failure_reports_500_with_operation_message() {
    let dir = tempfile::tempdir().unwrap();
    // A directory where the entry file should be makes every read and
    // write of the store fail.
    std::fs::create_dir_all(entries_file(&dir)).unwrap();
    let app = test_app(&dir);

    let (status, body) = get_json(app.clone(), "/api/entries").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to read entries.");

    let (status, body) = post_json(app.clone(), "/api/entries", r#"{"amount": 5}"#).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to save entry.");

    let (status, body) = delete_json(app.clone(), "/api/entries/any-id").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to remove entry.");

    let (status, body) = post_json(app, "/api/entries/reset", "{}").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to clear entries.");
}

#[tokio::test]
async fn test_health_endpoint() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"OK");
}

#[tokio::test]
async fn test_root_serves_static_frontend() {
    let dir = tempfile::tempdir().unwrap();
    let static_dir = dir.path().join("public");
    std::fs::create_dir_all(&static_dir).unwrap();
    std::fs::write(static_dir.join("index.html"), "<h1>tally</h1>").unwrap();

    let mut config = Config::default();
    config.server.static_dir = static_dir;
    let state = AppState {
        store: Arc::new(JsonFileStore::new(entries_file(&dir))),
        config,
    };
    let app = create_router(state);

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(String::from_utf8_lossy(&bytes).contains("tally"));
}
