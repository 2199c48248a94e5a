//! Item handlers.
//!
//! The full item listing is served through the cache-aside coordinator and
//! every returned item carries `fromCache`. Single-item reads and the
//! by-state listing read the store directly.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use simpletodo_core::storage::{ItemQuery, Page, RepositoryError};
use simpletodo_core::todo::{CreateUpdateTodoItem, ItemState, ItemView, TodoItem};

use super::lists::require_list;
use crate::{handlers::AppError, state::AppState};

async fn require_item(state: &AppState, list_id: Uuid, item_id: Uuid) -> Result<TodoItem, AppError> {
    state
        .store
        .get_item(list_id, item_id)
        .await?
        .ok_or_else(|| RepositoryError::item_not_found(item_id).into())
}

/// List a list's items (GET /lists/{list_id}/items?skip&batchSize).
///
/// A cached collection is served as-is, without checking the list. On a miss
/// the list must exist before the collection is read and cached. Paging is
/// applied to the response only; the cache always holds the full collection.
pub async fn list_items(
    State(state): State<AppState>,
    Path(list_id): Path<Uuid>,
    Query(page): Query<Page>,
) -> Result<Json<Vec<ItemView>>, AppError> {
    let collection = state
        .coordinator
        .get_item_collection(list_id, || async {
            require_list(&state, list_id).await.map(drop)
        })
        .await?;
    let from_cache = collection.from_cache();

    tracing::debug!(%list_id, count = collection.items.len(), from_cache, "Listing items");

    Ok(Json(ItemView::decorate(
        page.apply(collection.items),
        from_cache,
    )))
}

/// Create an item (POST /lists/{list_id}/items).
pub async fn create_item(
    State(state): State<AppState>,
    Path(list_id): Path<Uuid>,
    Json(payload): Json<CreateUpdateTodoItem>,
) -> Result<impl IntoResponse, AppError> {
    require_list(&state, list_id).await?;

    let item = payload.into_item(list_id);
    state.coordinator.create_item(&item).await?;

    let location = format!("/lists/{list_id}/items/{}", item.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(item),
    ))
}

/// Get a single item (GET /lists/{list_id}/items/{item_id}).
pub async fn get_item(
    State(state): State<AppState>,
    Path((list_id, item_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<TodoItem>, AppError> {
    require_item(&state, list_id, item_id).await.map(Json)
}

/// Update an item (PUT /lists/{list_id}/items/{item_id}).
///
/// Every mutable field is overwritten by the payload.
pub async fn update_item(
    State(state): State<AppState>,
    Path((list_id, item_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<CreateUpdateTodoItem>,
) -> Result<Json<TodoItem>, AppError> {
    let mut item = require_item(&state, list_id, item_id).await?;
    payload.apply_to(&mut item, Utc::now());

    state.coordinator.update_item(&item).await?;

    Ok(Json(item))
}

/// Delete an item (DELETE /lists/{list_id}/items/{item_id}).
pub async fn delete_item(
    State(state): State<AppState>,
    Path((list_id, item_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    require_item(&state, list_id, item_id).await?;

    state.coordinator.delete_item(list_id, item_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// List items in a given state (GET /lists/{list_id}/state/{state}?skip&batchSize).
///
/// The state segment is matched case-insensitively. Always read from the store.
pub async fn list_items_by_state(
    State(state): State<AppState>,
    Path((list_id, item_state)): Path<(Uuid, String)>,
    Query(page): Query<Page>,
) -> Result<Json<Vec<TodoItem>>, AppError> {
    let item_state = item_state
        .parse::<ItemState>()
        .map_err(|e| RepositoryError::InvalidData(e.to_string()))?;

    require_list(&state, list_id).await?;

    let items = state
        .store
        .get_items(list_id, ItemQuery::by_state(item_state).with_page(page))
        .await?;

    Ok(Json(items))
}
