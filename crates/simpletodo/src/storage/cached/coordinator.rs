//! Cache-aside coordinator over a todo store and a snapshot cache.

use std::future::Future;
use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use simpletodo_core::cache::{
    decode_snapshot, encode_snapshot, list_items_key, Cache, CacheError, Snapshot,
};
use simpletodo_core::storage::{ItemQuery, RepositoryError, TodoRepository};
use simpletodo_core::todo::{TodoItem, TodoList};

/// Errors surfaced by the coordinator. Cache failures are never absorbed.
#[derive(Debug, Error)]
pub enum CoordinatorError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// Result type for coordinator operations.
pub type Result<T> = std::result::Result<T, CoordinatorError>;

/// Which item mutations delete the list's cached collection.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum InvalidationPolicy {
    /// Item create, item delete and list delete invalidate. Item updates
    /// leave the cached collection in place until the next invalidation.
    #[default]
    CreateDelete,
    /// Every item mutation invalidates, updates included.
    AllMutations,
}

impl InvalidationPolicy {
    pub fn invalidates_on_update(self) -> bool {
        matches!(self, InvalidationPolicy::AllMutations)
    }
}

/// Where an item collection was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Cache,
    Store,
}

/// A list's full item collection plus the source that served it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemCollection {
    pub items: Vec<TodoItem>,
    pub source: Source,
}

impl ItemCollection {
    pub fn from_cache(&self) -> bool {
        self.source == Source::Cache
    }
}

/// Mediates item-collection reads and list/item writes.
///
/// Store writes and cache invalidations are two sequential steps. If the
/// invalidation fails the store write stays applied and the error is returned.
///
/// # Type Parameters
///
/// * `R` - The store implementation
/// * `C` - The cache implementation
pub struct CacheAsideCoordinator<R, C>
where
    R: TodoRepository + ?Sized,
    C: Cache + ?Sized,
{
    repository: Arc<R>,
    cache: Arc<C>,
    policy: InvalidationPolicy,
}

impl<R, C> CacheAsideCoordinator<R, C>
where
    R: TodoRepository + ?Sized,
    C: Cache + ?Sized,
{
    pub fn new(repository: Arc<R>, cache: Arc<C>, policy: InvalidationPolicy) -> Self {
        Self {
            repository,
            cache,
            policy,
        }
    }

    /// Returns the list's full item collection, served from the cache when a
    /// readable snapshot exists and from the store otherwise.
    ///
    /// `on_miss` runs before the store read and never on a hit. An error from
    /// it aborts the read and nothing is cached; callers use it to reject an
    /// unknown list. A store read always repopulates the cache with the full
    /// collection.
    pub async fn get_item_collection<E, F, Fut>(
        &self,
        list_id: Uuid,
        on_miss: F,
    ) -> std::result::Result<ItemCollection, E>
    where
        E: From<CoordinatorError>,
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<(), E>>,
    {
        if let Some(items) = self.read_cached(list_id).await? {
            return Ok(ItemCollection {
                items,
                source: Source::Cache,
            });
        }

        on_miss().await?;

        let items = self.populate(list_id).await?;
        Ok(ItemCollection {
            items,
            source: Source::Store,
        })
    }

    /// `None` means a miss: no key, an empty value, or a snapshot written in a
    /// version this build cannot read.
    pub(crate) async fn read_cached(&self, list_id: Uuid) -> Result<Option<Vec<TodoItem>>> {
        let key = list_items_key(list_id);

        if !self.cache.exists(&key).await? {
            tracing::trace!(%list_id, "Cache miss for list items");
            return Ok(None);
        }

        let bytes = match self.cache.get(&key).await? {
            Some(bytes) if !bytes.is_empty() => bytes,
            _ => {
                tracing::trace!(%list_id, "Empty cache value for list items");
                return Ok(None);
            }
        };

        match decode_snapshot(&bytes).map_err(CacheError::from)? {
            Snapshot::Unsupported(version) => {
                tracing::warn!(%list_id, version, "Unsupported snapshot version, refetching");
                Ok(None)
            }
            snapshot => {
                let items = snapshot.into_items().unwrap_or_default();
                tracing::trace!(%list_id, count = items.len(), "Cache hit for list items");
                Ok(Some(items))
            }
        }
    }

    /// Reads every item of the list and overwrites the cached snapshot.
    async fn populate(&self, list_id: Uuid) -> Result<Vec<TodoItem>> {
        let items = self
            .repository
            .get_items(list_id, ItemQuery::all())
            .await?;

        let bytes = encode_snapshot(&items).map_err(CacheError::from)?;
        self.cache.set(&list_items_key(list_id), &bytes).await?;

        tracing::trace!(%list_id, count = items.len(), "Populated list items cache");
        Ok(items)
    }

    /// Deletes the list's cached collection. Missing entries are not an error.
    pub async fn invalidate_collection(&self, list_id: Uuid) -> Result<()> {
        self.cache.delete(&list_items_key(list_id)).await?;
        tracing::debug!(%list_id, "Invalidated list items cache");
        Ok(())
    }

    pub async fn create_list(&self, list: &TodoList) -> Result<()> {
        self.repository.create_list(list).await?;
        tracing::info!(list_id = %list.id, "List created");
        Ok(())
    }

    /// List fields are not part of the cached collection, so nothing is invalidated.
    pub async fn update_list(&self, list: &TodoList) -> Result<()> {
        self.repository.update_list(list).await?;
        tracing::info!(list_id = %list.id, "List updated");
        Ok(())
    }

    pub async fn delete_list(&self, list_id: Uuid) -> Result<()> {
        self.repository.delete_list(list_id).await?;
        self.invalidate_collection(list_id).await?;
        tracing::info!(%list_id, "List deleted");
        Ok(())
    }

    pub async fn create_item(&self, item: &TodoItem) -> Result<()> {
        self.repository.create_item(item).await?;
        self.invalidate_collection(item.list_id).await?;
        tracing::info!(item_id = %item.id, list_id = %item.list_id, "Item created");
        Ok(())
    }

    /// Invalidates only under [`InvalidationPolicy::AllMutations`].
    pub async fn update_item(&self, item: &TodoItem) -> Result<()> {
        self.repository.update_item(item).await?;
        if self.policy.invalidates_on_update() {
            self.invalidate_collection(item.list_id).await?;
        }
        tracing::info!(item_id = %item.id, list_id = %item.list_id, "Item updated");
        Ok(())
    }

    pub async fn delete_item(&self, list_id: Uuid, item_id: Uuid) -> Result<()> {
        self.repository.delete_item(list_id, item_id).await?;
        self.invalidate_collection(list_id).await?;
        tracing::info!(%item_id, %list_id, "Item deleted");
        Ok(())
    }
}
