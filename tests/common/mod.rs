#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use posts_api::{AppState, MemoryPostStore, NewPost, Post, PostPatch, PostStore, StoreError};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub bytes: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.bytes).expect("response body is JSON")
    }

    pub fn last_page(&self) -> u64 {
        self.headers
            .get("Last-Page")
            .expect("Last-Page header")
            .to_str()
            .unwrap()
            .parse()
            .unwrap()
    }
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(v) => {
            let payload = v.to_string();
            builder
                .header("content-type", "application/json")
                .header("content-length", payload.len())
                .body(Body::from(payload))
                .unwrap()
        }
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes().to_vec();
    TestResponse { status, headers, bytes }
}

/// Sends `payload` as-is: no `Content-Length`, and a `Content-Type` only when given.
pub async fn send_raw(app: &Router, method: Method, uri: &str, content_type: Option<&str>, payload: String) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(ct) = content_type {
        builder = builder.header("content-type", ct);
    }
    let response = app.clone().oneshot(builder.body(Body::from(payload)).unwrap()).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes().to_vec();
    TestResponse { status, headers, bytes }
}

/// Router over a fresh memory store; the store handle is returned for direct inspection.
pub fn memory_app() -> (Router, Arc<MemoryPostStore>) {
    let store = Arc::new(MemoryPostStore::new());
    let state = AppState { store: store.clone() };
    (posts_api::post_routes(state), store)
}

/// Store whose every call fails.
pub struct FailingStore;

fn down() -> StoreError {
    StoreError::Unavailable("connection refused".into())
}

#[async_trait]
impl PostStore for FailingStore {
    async fn create(&self, _post: NewPost) -> Result<Post, StoreError> {
        Err(down())
    }
    async fn find_page(&self, _skip: u64, _limit: u64) -> Result<Vec<Post>, StoreError> {
        Err(down())
    }
    async fn count(&self) -> Result<u64, StoreError> {
        Err(down())
    }
    async fn find_by_id(&self, _id: Uuid) -> Result<Option<Post>, StoreError> {
        Err(down())
    }
    async fn find_by_id_and_delete(&self, _id: Uuid) -> Result<Option<Post>, StoreError> {
        Err(down())
    }
    async fn find_by_id_and_update(&self, _id: Uuid, _patch: PostPatch) -> Result<Option<Post>, StoreError> {
        Err(down())
    }
    async fn ping(&self) -> Result<(), StoreError> {
        Err(down())
    }
}
