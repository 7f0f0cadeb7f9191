//! End-to-end tests for the HTTP routes, driven through the router without a
//! socket.

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use serde_json::{Value, json};
use std::sync::Arc;
use task_store::api::{AppState, build_router};
use task_store::db::Database;
use task_store::service::TaskService;
use tower::ServiceExt;

fn app() -> Router {
    let db = Database::open_in_memory().expect("Failed to create in-memory database");
    build_router(AppState::new(TaskService::new(Arc::new(db))))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let resp = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), 1_000_000)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

fn json_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).expect("response body is not JSON")
}

async fn create(app: &Router, body: Value) -> Value {
    let (status, bytes) = send(app, Method::POST, "/api/tasks", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    json_body(&bytes)
}

#[tokio::test]
async fn list_is_empty_initially() {
    let app = app();
    let (status, bytes) = send(&app, Method::GET, "/api/tasks", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&bytes), json!([]));
}

#[tokio::test]
async fn create_assigns_id_and_defaults() {
    let app = app();
    let task = create(&app, json!({"title": "Buy milk"})).await;

    assert!(task["id"].as_i64().unwrap() > 0);
    assert_eq!(task["title"], "Buy milk");
    assert_eq!(task["description"], Value::Null);
    assert_eq!(task["completed"], false);
    assert!(task["createdAt"].is_string());
}

#[tokio::test]
async fn create_ignores_client_id_and_created_at() {
    let app = app();
    let task = create(
        &app,
        json!({"id": 999, "title": "Buy milk", "createdAt": "2000-01-01T00:00:00"}),
    )
    .await;

    assert_ne!(task["id"], 999);
    assert_ne!(task["createdAt"], "2000-01-01T00:00:00");
}

#[tokio::test]
async fn created_ids_are_unique() {
    let app = app();
    let a = create(&app, json!({"title": "a"})).await;
    let b = create(&app, json!({"title": "b"})).await;
    assert_ne!(a["id"], b["id"]);
}

#[tokio::test]
async fn create_without_title_is_rejected() {
    let app = app();
    let (status, _) = send(&app, Method::POST, "/api/tasks", Some(json!({"completed": true}))).await;
    assert!(status.is_client_error());

    let (_, bytes) = send(&app, Method::GET, "/api/tasks", None).await;
    assert_eq!(json_body(&bytes), json!([]));
}

#[tokio::test]
async fn get_after_create_returns_same_task() {
    let app = app();
    let created = create(
        &app,
        json!({"title": "Buy milk", "description": "2 litres", "completed": true}),
    )
    .await;

    let uri = format!("/api/tasks/{}", created["id"]);
    let (status, bytes) = send(&app, Method::GET, &uri, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&bytes), created);
}

#[tokio::test]
async fn get_missing_is_404_with_empty_body() {
    let app = app();
    let (status, bytes) = send(&app, Method::GET, "/api/tasks/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn put_overwrites_fields_and_keeps_identity() {
    let app = app();
    let created = create(&app, json!({"title": "Buy milk", "description": "2 litres"})).await;
    let uri = format!("/api/tasks/{}", created["id"]);

    let (status, bytes) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({"id": 12345, "title": "Buy milk", "completed": true, "createdAt": "2000-01-01T00:00:00"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let updated = json_body(&bytes);

    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["createdAt"], created["createdAt"]);
    assert_eq!(updated["completed"], true);
    assert_eq!(updated["description"], Value::Null);

    let (_, bytes) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(json_body(&bytes), updated);
}

#[tokio::test]
async fn put_missing_is_404_and_creates_nothing() {
    let app = app();
    let (status, bytes) = send(&app, Method::PUT, "/api/tasks/7", Some(json!({"title": "ghost"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(bytes.is_empty());

    let (_, bytes) = send(&app, Method::GET, "/api/tasks", None).await;
    assert_eq!(json_body(&bytes), json!([]));
}

#[tokio::test]
async fn delete_removes_task() {
    let app = app();
    let created = create(&app, json!({"title": "Buy milk"})).await;
    let uri = format!("/api/tasks/{}", created["id"]);

    let (status, bytes) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(bytes.is_empty());

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_missing_is_404_without_side_effects() {
    let app = app();
    let kept = create(&app, json!({"title": "keep"})).await;

    let (status, bytes) = send(&app, Method::DELETE, "/api/tasks/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(bytes.is_empty());

    let (_, bytes) = send(&app, Method::GET, "/api/tasks", None).await;
    assert_eq!(json_body(&bytes), json!([kept]));
}

#[tokio::test]
async fn list_is_empty_after_deleting_everything() {
    let app = app();
    let mut ids = Vec::new();
    for title in ["a", "b", "c"] {
        ids.push(create(&app, json!({"title": title})).await["id"].clone());
    }

    for id in ids {
        let (status, _) = send(&app, Method::DELETE, &format!("/api/tasks/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    let (_, bytes) = send(&app, Method::GET, "/api/tasks", None).await;
    assert_eq!(json_body(&bytes), json!([]));
}

#[tokio::test]
async fn buy_milk_scenario() {
    let app = app();

    let created = create(&app, json!({"title": "Buy milk"})).await;
    let uri = format!("/api/tasks/{}", created["id"]);

    let (status, bytes) = send(&app, Method::PUT, &uri, Some(json!({"title": "Buy milk", "completed": true}))).await;
    assert_eq!(status, StatusCode::OK);
    let updated = json_body(&bytes);
    assert_eq!(updated["completed"], true);
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["createdAt"], created["createdAt"]);

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_numeric_id_is_rejected() {
    let app = app();
    let (status, _) = send(&app, Method::GET, "/api/tasks/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_endpoint_reports_version() {
    let app = app();
    let (status, bytes) = send(&app, Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    let body = json_body(&bytes);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn index_serves_ui() {
    let app = app();
    let (status, bytes) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(bytes).unwrap();
    assert!(html.contains("/app.js"));

    let (status, bytes) = send(&app, Method::GET, "/app.js", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(bytes).unwrap().contains("/api/tasks"));
}
