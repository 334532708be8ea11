//! Response assembly helpers.

use crate::model::Post;
use axum::{
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

pub const LAST_PAGE_HEADER: HeaderName = HeaderName::from_static("last-page");

pub fn post_ok(post: Post) -> (StatusCode, Json<Post>) {
    (StatusCode::OK, Json(post))
}

/// List body plus the `Last-Page` header.
pub fn post_page(posts: Vec<Post>, last_page: u64) -> Response {
    (
        StatusCode::OK,
        [(LAST_PAGE_HEADER, HeaderValue::from(last_page))],
        Json(posts),
    )
        .into_response()
}
