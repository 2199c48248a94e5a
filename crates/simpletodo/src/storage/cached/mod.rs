//! Cache-aside coordination for list item collections.
//!
//! Every read of a list's full item collection and every mutation that can
//! change it goes through [`CacheAsideCoordinator`]:
//!
//! - **Reads**: check the cache first, on miss fetch from the store and populate the cache
//! - **Writes**: persist to the store, then invalidate the list's cached collection
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! let store = Arc::new(SqliteRepository::new("simpletodo.db").await?);
//! let cache = Arc::new(MemoryCache::new(10_000));
//!
//! let coordinator = CacheAsideCoordinator::new(store, cache, InvalidationPolicy::CreateDelete);
//! let collection = coordinator
//!     .get_item_collection(list_id, || async { Ok::<_, CoordinatorError>(()) })
//!     .await?;
//! ```

mod coordinator;

pub use coordinator::{CacheAsideCoordinator, CoordinatorError, InvalidationPolicy};
