//! Route handlers grouped by resource.

pub(crate) mod auth;
pub(crate) mod children;
pub(crate) mod chores;
pub(crate) mod history;

use crate::error::ApiError;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::Path;
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub(crate) struct Success {
    success: bool,
}

pub(crate) fn success() -> Json<Success> {
    Json(Success { success: true })
}

/// Unwraps a JSON body, turning extractor rejections into `{"error": ...}`.
pub(crate) fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload.map(|Json(value)| value).map_err(ApiError::from)
}

/// Unwraps a numeric path id; a non-numeric segment becomes a 400 envelope.
pub(crate) fn path_id<T>(path: Result<Path<T>, PathRejection>) -> Result<T, ApiError> {
    path.map(|Path(id)| id).map_err(ApiError::from)
}
