//! Chore endpoints: due-state listing, lifecycle and completion.

use crate::error::ApiError;
use crate::routes::{body, path_id, success, Success};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chorebook_core::model::timestamp::format_timestamp;
use chorebook_core::{
    ChildId, Chore, ChoreDueState, ChoreId, ChorePatch, ChoreService, SqliteChoreRepository,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub(crate) struct CreateChoreBody {
    #[serde(default)]
    title: String,
    frequency: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CompleteResponse {
    success: bool,
    completed_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    already_completed: Option<bool>,
}

pub(crate) async fn list_for_child(
    State(state): State<AppState>,
    child_id: Result<Path<ChildId>, PathRejection>,
) -> Result<Json<Vec<ChoreDueState>>, ApiError> {
    let child_id = path_id(child_id)?;
    let states = state
        .run("chore_due_state", move |conn, clock| {
            ChoreService::new(SqliteChoreRepository::new(conn), clock).due_state(child_id)
        })
        .await?;
    Ok(Json(states))
}

pub(crate) async fn create(
    State(state): State<AppState>,
    child_id: Result<Path<ChildId>, PathRejection>,
    payload: Result<Json<CreateChoreBody>, JsonRejection>,
) -> Result<(StatusCode, Json<Chore>), ApiError> {
    let child_id = path_id(child_id)?;
    let request = body(payload)?;
    let chore = state
        .run("chore_create", move |conn, clock| {
            let frequency = request.frequency.as_deref().unwrap_or("daily");
            ChoreService::new(SqliteChoreRepository::new(conn), clock).create_chore(
                child_id,
                &request.title,
                frequency,
            )
        })
        .await?;
    Ok((StatusCode::CREATED, Json(chore)))
}

pub(crate) async fn update(
    State(state): State<AppState>,
    chore_id: Result<Path<ChoreId>, PathRejection>,
    payload: Result<Json<ChorePatch>, JsonRejection>,
) -> Result<Json<Chore>, ApiError> {
    let chore_id = path_id(chore_id)?;
    let patch = body(payload)?;
    let chore = state
        .run("chore_update", move |conn, clock| {
            ChoreService::new(SqliteChoreRepository::new(conn), clock).update_chore(chore_id, &patch)
        })
        .await?;
    Ok(Json(chore))
}

pub(crate) async fn delete(
    State(state): State<AppState>,
    chore_id: Result<Path<ChoreId>, PathRejection>,
) -> Result<Json<Success>, ApiError> {
    let chore_id = path_id(chore_id)?;
    state
        .run("chore_delete", move |conn, clock| {
            ChoreService::new(SqliteChoreRepository::new(conn), clock).delete_chore(chore_id)
        })
        .await?;
    Ok(success())
}

pub(crate) async fn complete(
    State(state): State<AppState>,
    chore_id: Result<Path<ChoreId>, PathRejection>,
) -> Result<Json<CompleteResponse>, ApiError> {
    let chore_id = path_id(chore_id)?;
    let outcome = state
        .run("chore_complete", move |conn, clock| {
            ChoreService::new(SqliteChoreRepository::new(conn), clock).mark_complete(chore_id)
        })
        .await?;
    Ok(Json(CompleteResponse {
        success: true,
        completed_at: format_timestamp(&outcome.completion.completed_at),
        already_completed: outcome.already_completed.then_some(true),
    }))
}

pub(crate) async fn uncomplete(
    State(state): State<AppState>,
    chore_id: Result<Path<ChoreId>, PathRejection>,
) -> Result<Json<Success>, ApiError> {
    let chore_id = path_id(chore_id)?;
    state
        .run("chore_uncomplete", move |conn, clock| {
            ChoreService::new(SqliteChoreRepository::new(conn), clock).mark_incomplete(chore_id)
        })
        .await?;
    Ok(success())
}
