//! List CRUD handlers.
//!
//! Reads go straight to the store. Mutations go through the coordinator so a
//! deleted list also loses its cached item collection.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use simpletodo_core::storage::{Page, RepositoryError};
use simpletodo_core::todo::{CreateUpdateTodoList, TodoList};

use crate::{handlers::AppError, state::AppState};

/// Fetches a list or fails with `NotFound`.
pub(crate) async fn require_list(state: &AppState, id: Uuid) -> Result<TodoList, AppError> {
    state
        .store
        .get_list(id)
        .await?
        .ok_or_else(|| RepositoryError::list_not_found(id).into())
}

/// List lists (GET /lists?skip&batchSize).
pub async fn list_lists(
    State(state): State<AppState>,
    Query(page): Query<Page>,
) -> Result<Json<Vec<TodoList>>, AppError> {
    let lists = state.store.get_lists(page).await?;
    Ok(Json(lists))
}

/// Create a new list (POST /lists).
pub async fn create_list(
    State(state): State<AppState>,
    Json(payload): Json<CreateUpdateTodoList>,
) -> Result<impl IntoResponse, AppError> {
    let list = payload.into_list();

    state.coordinator.create_list(&list).await?;

    let location = format!("/lists/{}", list.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(list),
    ))
}

/// Get a single list (GET /lists/{list_id}).
pub async fn get_list(
    State(state): State<AppState>,
    Path(list_id): Path<Uuid>,
) -> Result<Json<TodoList>, AppError> {
    require_list(&state, list_id).await.map(Json)
}

/// Update a list (PUT /lists/{list_id}).
pub async fn update_list(
    State(state): State<AppState>,
    Path(list_id): Path<Uuid>,
    Json(payload): Json<CreateUpdateTodoList>,
) -> Result<Json<TodoList>, AppError> {
    let mut list = require_list(&state, list_id).await?;
    payload.apply_to(&mut list, Utc::now());

    state.coordinator.update_list(&list).await?;

    Ok(Json(list))
}

/// Delete a list and its items (DELETE /lists/{list_id}).
pub async fn delete_list(
    State(state): State<AppState>,
    Path(list_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    require_list(&state, list_id).await?;

    state.coordinator.delete_list(list_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
