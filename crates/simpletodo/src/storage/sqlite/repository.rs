//! SQLite repository implementation.
//!
//! Implements the repository traits from `simpletodo_core::storage` using SQLite.

use std::time::Duration;

use async_trait::async_trait;
use tokio_rusqlite::Connection;
use uuid::Uuid;

use simpletodo_core::storage::{
    ItemQuery, ItemRepository, ListRepository, Page, RepositoryError, Result,
};
use simpletodo_core::todo::{TodoItem, TodoList};

use super::conversions::{
    format_datetime, format_optional_datetime, page_bounds, row_to_item, row_to_list,
};
use super::error::map_tokio_rusqlite_error;
use super::schema;

/// How long a statement waits on a locked database before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// Turns "zero rows affected" into `QueryReturnedNoRows` so it maps to `NotFound`.
fn require_row(rows: usize) -> std::result::Result<(), tokio_rusqlite::Error> {
    if rows == 0 {
        Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
    } else {
        Ok(())
    }
}

/// SQLite-based repository implementation.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Opens (or creates) a file-based database and applies the schema.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;
        tracing::info!(path, "Opened SQLite database");

        Ok(Self { conn })
    }

    /// Creates a repository over an in-memory database.
    ///
    /// Data is lost when the connection is dropped.
    #[cfg_attr(not(test), allow(dead_code))]
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.busy_timeout(BUSY_TIMEOUT).map_err(wrap_err)?;
            conn.execute_batch(schema::CONNECTION_PRAGMAS)
                .map_err(wrap_err)?;
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

// ============================================================================
// ListRepository implementation
// ============================================================================

#[async_trait]
impl ListRepository for SqliteRepository {
    async fn get_lists(&self, page: Page) -> Result<Vec<TodoList>> {
        let (limit, offset) = page_bounds(&page);

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_LISTS_PAGE).map_err(wrap_err)?;
                let rows = stmt
                    .query_map(rusqlite::params![limit, offset], row_to_list)
                    .map_err(wrap_err)?;

                let mut lists = Vec::new();
                for row_result in rows {
                    lists.push(row_result.map_err(wrap_err)?);
                }
                Ok(lists)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "TodoList", ""))
    }

    async fn get_list(&self, id: Uuid) -> Result<Option<TodoList>> {
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_LIST_BY_ID).map_err(wrap_err)?;
                match stmt.query_row([&id_str], row_to_list) {
                    Ok(list) => Ok(Some(list)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "TodoList", id.to_string()))
    }

    async fn create_list(&self, list: &TodoList) -> Result<()> {
        let id = list.id.to_string();
        let name = list.name.clone();
        let description = list.description.clone();
        let created_date = format_datetime(&list.created_date);
        let updated_date = format_optional_datetime(&list.updated_date);

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_LIST,
                    rusqlite::params![id, name, description, created_date, updated_date],
                )
                .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "TodoList", list.id.to_string()))
    }

    async fn update_list(&self, list: &TodoList) -> Result<()> {
        let id = list.id.to_string();
        let name = list.name.clone();
        let description = list.description.clone();
        let updated_date = format_optional_datetime(&list.updated_date);

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(
                        schema::UPDATE_LIST,
                        rusqlite::params![id, name, description, updated_date],
                    )
                    .map_err(wrap_err)?;
                require_row(rows)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "TodoList", list.id.to_string()))
    }

    async fn delete_list(&self, id: Uuid) -> Result<()> {
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::DELETE_LIST, [&id_str])
                    .map_err(wrap_err)?;
                require_row(rows)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "TodoList", id.to_string()))
    }
}

// ============================================================================
// ItemRepository implementation
// ============================================================================

#[async_trait]
impl ItemRepository for SqliteRepository {
    async fn get_item(&self, list_id: Uuid, item_id: Uuid) -> Result<Option<TodoItem>> {
        let list_id_str = list_id.to_string();
        let item_id_str = item_id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_ITEM_BY_ID).map_err(wrap_err)?;
                match stmt.query_row([&list_id_str, &item_id_str], row_to_item) {
                    Ok(item) => Ok(Some(item)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "TodoItem", item_id.to_string()))
    }

    async fn get_items(&self, list_id: Uuid, query: ItemQuery) -> Result<Vec<TodoItem>> {
        let list_id_str = list_id.to_string();
        let state = query.state.map(|s| s.as_str());
        let (limit, offset) = page_bounds(&query.page);

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_ITEMS_BY_LIST)
                    .map_err(wrap_err)?;
                let rows = stmt
                    .query_map(
                        rusqlite::params![list_id_str, state, limit, offset],
                        row_to_item,
                    )
                    .map_err(wrap_err)?;

                let mut items = Vec::new();
                for row_result in rows {
                    items.push(row_result.map_err(wrap_err)?);
                }
                Ok(items)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "TodoItem", ""))
    }

    async fn create_item(&self, item: &TodoItem) -> Result<()> {
        let id = item.id.to_string();
        let list_id = item.list_id.to_string();
        let name = item.name.clone();
        let description = item.description.clone();
        let state = item.state.as_str();
        let due_date = format_optional_datetime(&item.due_date);
        let completed_date = format_optional_datetime(&item.completed_date);
        let created_date = format_datetime(&item.created_date);
        let updated_date = format_optional_datetime(&item.updated_date);

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_ITEM,
                    rusqlite::params![
                        id,
                        list_id,
                        name,
                        description,
                        state,
                        due_date,
                        completed_date,
                        created_date,
                        updated_date
                    ],
                )
                .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "TodoItem", item.id.to_string()))
    }

    async fn update_item(&self, item: &TodoItem) -> Result<()> {
        let id = item.id.to_string();
        let list_id = item.list_id.to_string();
        let name = item.name.clone();
        let description = item.description.clone();
        let state = item.state.as_str();
        let due_date = format_optional_datetime(&item.due_date);
        let completed_date = format_optional_datetime(&item.completed_date);
        let updated_date = format_optional_datetime(&item.updated_date);

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(
                        schema::UPDATE_ITEM,
                        rusqlite::params![
                            list_id,
                            id,
                            name,
                            description,
                            state,
                            due_date,
                            completed_date,
                            updated_date
                        ],
                    )
                    .map_err(wrap_err)?;
                require_row(rows)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "TodoItem", item.id.to_string()))
    }

    async fn delete_item(&self, list_id: Uuid, item_id: Uuid) -> Result<()> {
        let list_id_str = list_id.to_string();
        let item_id_str = item_id.to_string();

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::DELETE_ITEM, [&list_id_str, &item_id_str])
                    .map_err(wrap_err)?;
                require_row(rows)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "TodoItem", item_id.to_string()))
    }
}
