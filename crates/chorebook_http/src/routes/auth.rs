//! Parent PIN endpoints.

use crate::error::ApiError;
use crate::routes::{body, success, Success};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chorebook_core::{PinService, SqliteSettingsRepository};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub(crate) struct VerifyPinBody {
    #[serde(default)]
    pin: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SetPinBody {
    #[serde(default)]
    pin: String,
    current_pin: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct PinExists {
    exists: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct PinValid {
    valid: bool,
}

pub(crate) async fn pin_exists(State(state): State<AppState>) -> Result<Json<PinExists>, ApiError> {
    let exists = state
        .run("pin_exists", |conn, _| {
            PinService::new(SqliteSettingsRepository::new(conn)).pin_exists()
        })
        .await?;
    Ok(Json(PinExists { exists }))
}

/// `200 {"valid": true}` on match, `401 {"valid": false}` otherwise.
pub(crate) async fn verify_pin(
    State(state): State<AppState>,
    payload: Result<Json<VerifyPinBody>, JsonRejection>,
) -> Result<(StatusCode, Json<PinValid>), ApiError> {
    let request = body(payload)?;
    let valid = state
        .run("pin_verify", move |conn, _| {
            PinService::new(SqliteSettingsRepository::new(conn)).verify_pin(&request.pin)
        })
        .await?;
    let status = if valid {
        StatusCode::OK
    } else {
        StatusCode::UNAUTHORIZED
    };
    Ok((status, Json(PinValid { valid })))
}

pub(crate) async fn set_pin(
    State(state): State<AppState>,
    payload: Result<Json<SetPinBody>, JsonRejection>,
) -> Result<Json<Success>, ApiError> {
    let request = body(payload)?;
    state
        .run("pin_set", move |conn, _| {
            PinService::new(SqliteSettingsRepository::new(conn))
                .set_pin(&request.pin, request.current_pin.as_deref())
        })
        .await?;
    Ok(success())
}
