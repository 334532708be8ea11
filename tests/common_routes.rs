mod common;

use axum::http::{Method, StatusCode};
use common::{send, send_raw, FailingStore};
use posts_api::{build_app, AppState, MemoryPostStore};
use serde_json::json;

#[tokio::test]
async fn health_and_version_respond() {
    let app = build_app(AppState::new(MemoryPostStore::new()), "/api/v1", 1024);
    let res = send(&app, Method::GET, "/health", None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json(), json!({"status": "ok"}));

    let res = send(&app, Method::GET, "/version", None).await;
    assert_eq!(res.json()["name"], "posts-api");
}

#[tokio::test]
async fn ready_reflects_store_ping() {
    let app = build_app(AppState::new(MemoryPostStore::new()), "/api/v1", 1024);
    let res = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()["store"], "ok");

    let app = build_app(AppState::new(FailingStore), "/api/v1", 1024);
    let res = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(res.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(res.json(), json!({"status": "degraded", "store": "unavailable"}));
}

#[tokio::test]
async fn post_routes_are_mounted_under_prefix() {
    let app = build_app(AppState::new(MemoryPostStore::new()), "/api/v1", 1024);
    assert_eq!(send(&app, Method::GET, "/api/v1/posts", None).await.status, StatusCode::OK);
    assert_eq!(send(&app, Method::GET, "/posts", None).await.status, StatusCode::NOT_FOUND);

    let root = build_app(AppState::new(MemoryPostStore::new()), "/", 1024);
    assert_eq!(send(&root, Method::GET, "/posts", None).await.status, StatusCode::OK);

    let relative = build_app(AppState::new(MemoryPostStore::new()), "api/v2/", 1024);
    assert_eq!(send(&relative, Method::GET, "/api/v2/posts", None).await.status, StatusCode::OK);
}

#[tokio::test]
async fn oversized_bodies_are_refused() {
    let app = build_app(AppState::new(MemoryPostStore::new()), "/api/v1", 64);
    let body = json!({"title": "T", "body": "x".repeat(500), "tags": []});
    let res = send(&app, Method::POST, "/api/v1/posts", Some(body)).await;
    assert_eq!(res.status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn oversized_bodies_without_content_length_are_refused() {
    let app = build_app(AppState::new(MemoryPostStore::new()), "/api/v1", 64);
    let payload = json!({"title": "T", "body": "x".repeat(500), "tags": []}).to_string();
    let res = send_raw(&app, Method::POST, "/api/v1/posts", Some("application/json"), payload).await;
    assert_eq!(res.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(res.json()["error"]["code"], "payload_too_large");
}

#[tokio::test]
async fn bodies_without_json_content_type_are_unsupported() {
    let app = build_app(AppState::new(MemoryPostStore::new()), "/api/v1", 1024);
    let payload = json!({"title": "T", "body": "B", "tags": []}).to_string();
    let res = send_raw(&app, Method::POST, "/api/v1/posts", None, payload).await;
    assert_eq!(res.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(res.json()["error"]["code"], "unsupported_media_type");
}
