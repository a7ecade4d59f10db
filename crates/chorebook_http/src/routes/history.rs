//! Completion history endpoints.

use crate::error::ApiError;
use crate::routes::path_id;
use crate::state::AppState;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use chorebook_core::{
    ChildHistoryDay, ChildId, HistoryDay, HistoryService, SqliteHistoryRepository,
};
use serde::{Deserialize, Serialize};

/// Raw query parameters; unparsable numbers fall back to defaults.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct HistoryParams {
    days: Option<String>,
    child_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct HistoryEnvelope<T> {
    history: Vec<T>,
}

fn parse_number(value: Option<&str>) -> Option<i64> {
    value.and_then(|raw| raw.trim().parse().ok())
}

pub(crate) async fn household(
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<HistoryEnvelope<HistoryDay>>, ApiError> {
    let days = parse_number(params.days.as_deref());
    let child_id = parse_number(params.child_id.as_deref()).filter(|id| *id != 0);
    let history = state
        .run("history_household", move |conn, clock| {
            HistoryService::new(SqliteHistoryRepository::new(conn), clock)
                .household_history(days, child_id)
        })
        .await?;
    Ok(Json(HistoryEnvelope { history }))
}

pub(crate) async fn child(
    State(state): State<AppState>,
    child_id: Result<Path<ChildId>, PathRejection>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<HistoryEnvelope<ChildHistoryDay>>, ApiError> {
    let child_id = path_id(child_id)?;
    let days = parse_number(params.days.as_deref());
    let history = state
        .run("history_child", move |conn, clock| {
            HistoryService::new(SqliteHistoryRepository::new(conn), clock)
                .child_history(child_id, days)
        })
        .await?;
    Ok(Json(HistoryEnvelope { history }))
}
