//! Id-format guard: rejects a malformed `:id` path segment before the handler body runs.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use uuid::Uuid;

/// Extractor for a post id taken from the route's single path parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PostId(pub Uuid);

impl PostId {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        Uuid::parse_str(raw.trim())
            .map(PostId)
            .map_err(|_| AppError::BadIdentifier)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for PostId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::BadIdentifier)?;
        let id = PostId::parse(&raw);
        if id.is_err() {
            tracing::debug!(id = %raw, "rejected malformed post id");
        }
        id
    }
}
