//! Transport error envelope.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chorebook_core::{ServiceError, ServiceErrorKind};
use log::error;
use serde_json::json;

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Error returned by every handler; renders as `{"error": message}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal(op: &str, details: impl std::fmt::Display) -> Self {
        error!("event=http_request module=http status=error op={op} error={details}");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
    }

    pub(crate) fn from_service(op: &str, err: ServiceError) -> Self {
        match err.kind() {
            ServiceErrorKind::Validation => Self::new(StatusCode::BAD_REQUEST, err.to_string()),
            ServiceErrorKind::NotFound => Self::new(StatusCode::NOT_FOUND, err.to_string()),
            ServiceErrorKind::Unauthorized => Self::new(StatusCode::UNAUTHORIZED, err.to_string()),
            ServiceErrorKind::Internal => Self::internal(op, err),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, value.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(value: PathRejection) -> Self {
        Self::new(value.status(), value.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
