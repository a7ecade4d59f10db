//! Child endpoints.

use crate::error::ApiError;
use crate::routes::{body, path_id, success, Success};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chorebook_core::{Child, ChildId, ChildPatch, ChildService, SqliteChildRepository};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct CreateChildBody {
    #[serde(default)]
    name: String,
}

pub(crate) async fn list(State(state): State<AppState>) -> Result<Json<Vec<Child>>, ApiError> {
    let children = state
        .run("child_list", |conn, clock| {
            ChildService::new(SqliteChildRepository::new(conn), clock).list_children()
        })
        .await?;
    Ok(Json(children))
}

pub(crate) async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateChildBody>, JsonRejection>,
) -> Result<(StatusCode, Json<Child>), ApiError> {
    let request = body(payload)?;
    let child = state
        .run("child_create", move |conn, clock| {
            ChildService::new(SqliteChildRepository::new(conn), clock).create_child(&request.name)
        })
        .await?;
    Ok((StatusCode::CREATED, Json(child)))
}

pub(crate) async fn get(
    State(state): State<AppState>,
    child_id: Result<Path<ChildId>, PathRejection>,
) -> Result<Json<Child>, ApiError> {
    let child_id = path_id(child_id)?;
    let child = state
        .run("child_get", move |conn, clock| {
            ChildService::new(SqliteChildRepository::new(conn), clock).get_child(child_id)
        })
        .await?;
    Ok(Json(child))
}

pub(crate) async fn update(
    State(state): State<AppState>,
    child_id: Result<Path<ChildId>, PathRejection>,
    payload: Result<Json<ChildPatch>, JsonRejection>,
) -> Result<Json<Child>, ApiError> {
    let child_id = path_id(child_id)?;
    let patch = body(payload)?;
    let child = state
        .run("child_update", move |conn, clock| {
            ChildService::new(SqliteChildRepository::new(conn), clock).update_child(child_id, &patch)
        })
        .await?;
    Ok(Json(child))
}

pub(crate) async fn delete(
    State(state): State<AppState>,
    child_id: Result<Path<ChildId>, PathRejection>,
) -> Result<Json<Success>, ApiError> {
    let child_id = path_id(child_id)?;
    state
        .run("child_delete", move |conn, clock| {
            ChildService::new(SqliteChildRepository::new(conn), clock).delete_child(child_id)
        })
        .await?;
    Ok(success())
}
