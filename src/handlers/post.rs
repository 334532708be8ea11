//! Post handlers: create, list, read, update, remove.
//!
//! Id-addressed handlers take [`PostId`], so a malformed id is rejected before the store is touched.

use crate::error::AppError;
use crate::extractors::PostId;
use crate::model::{NewPost, PostPatch};
use crate::response::{post_ok, post_page};
use crate::service::{PostService, RequestValidator, CREATE_POST_RULES, UPDATE_POST_RULES};
use crate::state::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
}

pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(query) = query.map_err(|_| AppError::InvalidPage)?;
    let page = PostService::list(state.store.as_ref(), query.page.unwrap_or(1)).await?;
    Ok(post_page(page.posts, page.last_page))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = payload?;
    let post: NewPost = RequestValidator::parse(body, CREATE_POST_RULES)?;
    let created = PostService::create(state.store.as_ref(), post).await?;
    Ok(post_ok(created))
}

pub async fn read(
    State(state): State<AppState>,
    PostId(id): PostId,
) -> Result<impl IntoResponse, AppError> {
    let post = PostService::read(state.store.as_ref(), id).await?;
    Ok(post_ok(post))
}

pub async fn update(
    State(state): State<AppState>,
    PostId(id): PostId,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = payload?;
    let patch: PostPatch = RequestValidator::parse(body, UPDATE_POST_RULES)?;
    let post = PostService::update(state.store.as_ref(), id, patch).await?;
    Ok(post_ok(post))
}

pub async fn remove(
    State(state): State<AppState>,
    PostId(id): PostId,
) -> Result<StatusCode, AppError> {
    PostService::remove(state.store.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
