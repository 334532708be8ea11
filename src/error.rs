//! Typed errors and HTTP mapping.

use crate::service::FieldError;
use crate::store::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldError>),
    #[error("bad request: {0}")]
    BadRequest(String),
    /// Body extraction failed; keeps the extractor's status (413, 415, 400).
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
    #[error("page must be an integer >= 1")]
    InvalidPage,
    #[error("invalid post id")]
    BadIdentifier,
    #[error("post not found")]
    NotFound,
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_)
            | AppError::BadRequest(_)
            | AppError::InvalidPage
            | AppError::BadIdentifier => StatusCode::BAD_REQUEST,
            AppError::Rejected { status, .. } => *status,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, details) = match &self {
            // Empty-body responses.
            AppError::InvalidPage | AppError::BadIdentifier | AppError::NotFound => {
                return status.into_response();
            }
            AppError::Validation(errors) => ("validation_error", serde_json::to_value(errors).ok()),
            AppError::BadRequest(_) => ("bad_request", None),
            AppError::Rejected { status, .. } => (rejection_code(*status), None),
            AppError::Store(e) => {
                tracing::error!(error = %e, "store operation failed");
                ("store_error", None)
            }
        };
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
                details,
            },
        };
        (status, Json(body)).into_response()
    }
}

fn rejection_code(status: StatusCode) -> &'static str {
    match status {
        StatusCode::PAYLOAD_TOO_LARGE => "payload_too_large",
        StatusCode::UNSUPPORTED_MEDIA_TYPE => "unsupported_media_type",
        _ => "bad_request",
    }
}

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        AppError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}
