use async_trait::async_trait;
use uuid::Uuid;

use crate::todo::{TodoItem, TodoList};

use super::{ItemQuery, Page, Result};

/// Repository for list operations.
#[async_trait]
pub trait ListRepository: Send + Sync {
    /// Gets a page of lists ordered by creation date.
    async fn get_lists(&self, page: Page) -> Result<Vec<TodoList>>;

    /// Gets a list by its ID.
    async fn get_list(&self, id: Uuid) -> Result<Option<TodoList>>;

    /// Creates a new list.
    async fn create_list(&self, list: &TodoList) -> Result<()>;

    /// Updates an existing list.
    async fn update_list(&self, list: &TodoList) -> Result<()>;

    /// Deletes a list and every item it owns.
    async fn delete_list(&self, id: Uuid) -> Result<()>;
}

/// Repository for item operations, always scoped to the owning list.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Gets an item by its ID within a list.
    async fn get_item(&self, list_id: Uuid, item_id: Uuid) -> Result<Option<TodoItem>>;

    /// Gets the items of a list ordered by creation date, optionally filtered
    /// by state and paged.
    async fn get_items(&self, list_id: Uuid, query: ItemQuery) -> Result<Vec<TodoItem>>;

    /// Creates a new item.
    async fn create_item(&self, item: &TodoItem) -> Result<()>;

    /// Updates an existing item.
    async fn update_item(&self, item: &TodoItem) -> Result<()>;

    /// Deletes an item from a list.
    async fn delete_item(&self, list_id: Uuid, item_id: Uuid) -> Result<()>;
}

/// A store that serves both lists and items.
pub trait TodoRepository: ListRepository + ItemRepository {}

impl<T: ListRepository + ItemRepository> TodoRepository for T {}
