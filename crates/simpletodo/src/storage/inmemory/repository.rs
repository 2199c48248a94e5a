//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use simpletodo_core::storage::{
    ItemQuery, ItemRepository, ListRepository, Page, RepositoryError, Result,
};
use simpletodo_core::todo::{TodoItem, TodoList};

/// In-memory storage backend.
///
/// Data is lost when the last clone of the repository is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    lists: Arc<RwLock<HashMap<Uuid, TodoList>>>,
    items: Arc<RwLock<HashMap<Uuid, TodoItem>>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ListRepository for InMemoryRepository {
    async fn get_lists(&self, page: Page) -> Result<Vec<TodoList>> {
        let lists = self.lists.read().await;
        let mut sorted: Vec<TodoList> = lists.values().cloned().collect();
        sorted.sort_by(|a, b| (a.created_date, a.id).cmp(&(b.created_date, b.id)));
        Ok(page.apply(sorted))
    }

    async fn get_list(&self, id: Uuid) -> Result<Option<TodoList>> {
        let lists = self.lists.read().await;
        Ok(lists.get(&id).cloned())
    }

    async fn create_list(&self, list: &TodoList) -> Result<()> {
        let mut lists = self.lists.write().await;
        if lists.contains_key(&list.id) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "TodoList",
                id: list.id.to_string(),
            });
        }
        lists.insert(list.id, list.clone());
        Ok(())
    }

    async fn update_list(&self, list: &TodoList) -> Result<()> {
        let mut lists = self.lists.write().await;
        match lists.get_mut(&list.id) {
            Some(existing) => {
                *existing = list.clone();
                Ok(())
            }
            None => Err(RepositoryError::list_not_found(list.id)),
        }
    }

    async fn delete_list(&self, id: Uuid) -> Result<()> {
        let mut lists = self.lists.write().await;
        if lists.remove(&id).is_none() {
            return Err(RepositoryError::list_not_found(id));
        }
        // Lock order is lists then items everywhere.
        self.items.write().await.retain(|_, item| item.list_id != id);
        Ok(())
    }
}

#[async_trait]
impl ItemRepository for InMemoryRepository {
    async fn get_item(&self, list_id: Uuid, item_id: Uuid) -> Result<Option<TodoItem>> {
        let items = self.items.read().await;
        Ok(items
            .get(&item_id)
            .filter(|item| item.list_id == list_id)
            .cloned())
    }

    async fn get_items(&self, list_id: Uuid, query: ItemQuery) -> Result<Vec<TodoItem>> {
        let items = self.items.read().await;
        let mut matching: Vec<TodoItem> = items
            .values()
            .filter(|item| item.list_id == list_id && query.matches(item))
            .cloned()
            .collect();
        matching.sort_by(|a, b| (a.created_date, a.id).cmp(&(b.created_date, b.id)));
        Ok(query.page.apply(matching))
    }

    async fn create_item(&self, item: &TodoItem) -> Result<()> {
        let lists = self.lists.read().await;
        if !lists.contains_key(&item.list_id) {
            return Err(RepositoryError::list_not_found(item.list_id));
        }

        let mut items = self.items.write().await;
        if items.contains_key(&item.id) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "TodoItem",
                id: item.id.to_string(),
            });
        }
        items.insert(item.id, item.clone());
        Ok(())
    }

    async fn update_item(&self, item: &TodoItem) -> Result<()> {
        let mut items = self.items.write().await;
        match items.get_mut(&item.id) {
            Some(existing) if existing.list_id == item.list_id => {
                *existing = item.clone();
                Ok(())
            }
            _ => Err(RepositoryError::item_not_found(item.id)),
        }
    }

    async fn delete_item(&self, list_id: Uuid, item_id: Uuid) -> Result<()> {
        let mut items = self.items.write().await;
        match items.get(&item_id) {
            Some(item) if item.list_id == list_id => {
                items.remove(&item_id);
                Ok(())
            }
            _ => Err(RepositoryError::item_not_found(item_id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use simpletodo_core::todo::ItemState;

    async fn repo_with_list() -> (InMemoryRepository, TodoList) {
        let repo = InMemoryRepository::new();
        let list = TodoList::new("Groceries");
        repo.create_list(&list).await.unwrap();
        (repo, list)
    }

    #[tokio::test]
    async fn test_list_create_and_get() {
        let (repo, list) = repo_with_list().await;

        let fetched = repo.get_list(list.id).await.unwrap();
        assert_eq!(fetched, Some(list));
    }

    #[tokio::test]
    async fn test_list_create_duplicate() {
        let (repo, list) = repo_with_list().await;

        let result = repo.create_list(&list).await;
        assert!(matches!(result, Err(RepositoryError::AlreadyExists { .. })));
    }

    #[tokio::test]
    async fn test_list_update_nonexistent() {
        let repo = InMemoryRepository::new();

        let result = repo.update_list(&TodoList::new("Missing")).await;
        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_lists_are_ordered_and_paged() {
        let repo = InMemoryRepository::new();
        let base = Utc.with_ymd_and_hms(2024, 6, 15, 10, 0, 0).unwrap();
        for (offset, name) in [(2, "c"), (0, "a"), (1, "b")] {
            let list = TodoList::new(name).with_created_date(base + Duration::minutes(offset));
            repo.create_list(&list).await.unwrap();
        }

        let all = repo.get_lists(Page::all()).await.unwrap();
        let names: Vec<_> = all.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);

        let page = repo.get_lists(Page::new(1, 1)).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].name, "b");
    }

    #[tokio::test]
    async fn test_delete_list_cascades_items() {
        let (repo, list) = repo_with_list().await;
        let other = TodoList::new("Chores");
        repo.create_list(&other).await.unwrap();
        repo.create_item(&TodoItem::new(list.id, "Milk")).await.unwrap();
        repo.create_item(&TodoItem::new(other.id, "Dishes"))
            .await
            .unwrap();

        repo.delete_list(list.id).await.unwrap();

        assert!(repo.get_list(list.id).await.unwrap().is_none());
        assert!(repo
            .get_items(list.id, ItemQuery::all())
            .await
            .unwrap()
            .is_empty());
        assert_eq!(
            repo.get_items(other.id, ItemQuery::all())
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn test_delete_list_nonexistent() {
        let repo = InMemoryRepository::new();

        let result = repo.delete_list(Uuid::new_v4()).await;
        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_item_create_requires_list() {
        let repo = InMemoryRepository::new();

        let result = repo.create_item(&TodoItem::new(Uuid::new_v4(), "Milk")).await;
        assert!(matches!(
            result,
            Err(RepositoryError::NotFound {
                entity_type: "TodoList",
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_item_get_is_scoped_to_list() {
        let (repo, list) = repo_with_list().await;
        let milk = TodoItem::new(list.id, "Milk");
        repo.create_item(&milk).await.unwrap();

        assert!(repo.get_item(list.id, milk.id).await.unwrap().is_some());
        assert!(repo
            .get_item(Uuid::new_v4(), milk.id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_items_filtered_by_state() {
        let (repo, list) = repo_with_list().await;
        repo.create_item(&TodoItem::new(list.id, "Milk")).await.unwrap();
        repo.create_item(&TodoItem::new(list.id, "Eggs").with_state(ItemState::Completed))
            .await
            .unwrap();

        let completed = repo
            .get_items(list.id, ItemQuery::by_state(ItemState::Completed))
            .await
            .unwrap();

        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].name, "Eggs");
    }

    #[tokio::test]
    async fn test_item_update() {
        let (repo, list) = repo_with_list().await;
        let mut milk = TodoItem::new(list.id, "Milk");
        repo.create_item(&milk).await.unwrap();

        milk.state = ItemState::InProgress;
        repo.update_item(&milk).await.unwrap();

        let fetched = repo.get_item(list.id, milk.id).await.unwrap().unwrap();
        assert_eq!(fetched.state, ItemState::InProgress);
    }

    #[tokio::test]
    async fn test_item_delete_from_wrong_list() {
        let (repo, list) = repo_with_list().await;
        let milk = TodoItem::new(list.id, "Milk");
        repo.create_item(&milk).await.unwrap();

        let result = repo.delete_item(Uuid::new_v4(), milk.id).await;
        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
        assert!(repo.get_item(list.id, milk.id).await.unwrap().is_some());
    }
}
