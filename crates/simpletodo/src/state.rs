use std::sync::Arc;

use simpletodo_core::cache::Cache;
use simpletodo_core::storage::TodoRepository;

use crate::config::Config;
use crate::storage::cached::{CacheAsideCoordinator, InvalidationPolicy};

// ============================================================================
// Compile-time feature validation
// ============================================================================

#[cfg(all(feature = "sqlite", feature = "inmemory"))]
compile_error!("Cannot enable both 'sqlite' and 'inmemory' storage features");

#[cfg(not(any(feature = "inmemory", feature = "sqlite")))]
compile_error!("Must enable exactly one storage feature: 'inmemory' or 'sqlite'");

#[cfg(all(feature = "memory", feature = "redis"))]
compile_error!("Cannot enable both 'memory' and 'redis' cache features");

#[cfg(not(any(feature = "memory", feature = "redis")))]
compile_error!("Must enable exactly one cache feature: 'memory' or 'redis'");

/// Coordinator over the type-erased backends chosen at build time.
pub type Coordinator = CacheAsideCoordinator<dyn TodoRepository, dyn Cache>;

/// Application state shared across all handlers.
///
/// Both fields point at the same store: handlers read single lists and items
/// straight from `store`, and route item-collection reads plus every mutation
/// through `coordinator`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TodoRepository>,
    pub coordinator: Arc<Coordinator>,
}

impl AppState {
    /// Wires a store and a cache together behind one coordinator.
    pub fn from_parts(
        store: Arc<dyn TodoRepository>,
        cache: Arc<dyn Cache>,
        policy: InvalidationPolicy,
    ) -> Self {
        tracing::debug!(?policy, "Building application state");
        let coordinator = Arc::new(CacheAsideCoordinator::new(store.clone(), cache, policy));
        Self { store, coordinator }
    }
}

// ============================================================================
// Factory functions for different backend combinations
// ============================================================================

#[cfg(all(feature = "inmemory", feature = "memory"))]
mod inmemory_memory {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::storage::InMemoryRepository;

    impl AppState {
        /// Creates AppState with in-memory storage and in-memory cache.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let store = Arc::new(InMemoryRepository::new());
            let cache = Arc::new(MemoryCache::new(config.cache_max_entries));

            Ok(Self::from_parts(store, cache, config.invalidation_policy()))
        }
    }
}

#[cfg(all(feature = "inmemory", feature = "redis"))]
mod inmemory_redis {
    use super::*;
    use crate::cache::RedisCache;
    use crate::storage::InMemoryRepository;

    impl AppState {
        /// Creates AppState with in-memory storage and Redis cache.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let store = Arc::new(InMemoryRepository::new());
            let cache = Arc::new(RedisCache::new(&config.redis_url()).await?);
            tracing::info!(host = %config.redis_host, port = config.redis_port, "Redis cache configured");

            Ok(Self::from_parts(store, cache, config.invalidation_policy()))
        }
    }
}

#[cfg(all(feature = "sqlite", feature = "memory"))]
mod sqlite_memory {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::storage::SqliteRepository;

    impl AppState {
        /// Creates AppState with SQLite storage and in-memory cache.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let store = Arc::new(SqliteRepository::new(&config.sqlite_path).await?);
            let cache = Arc::new(MemoryCache::new(config.cache_max_entries));

            Ok(Self::from_parts(store, cache, config.invalidation_policy()))
        }
    }
}

#[cfg(all(feature = "sqlite", feature = "redis"))]
mod sqlite_redis {
    use super::*;
    use crate::cache::RedisCache;
    use crate::storage::SqliteRepository;

    impl AppState {
        /// Creates AppState with SQLite storage and Redis cache.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let store = Arc::new(SqliteRepository::new(&config.sqlite_path).await?);
            let cache = Arc::new(RedisCache::new(&config.redis_url()).await?);
            tracing::info!(host = %config.redis_host, port = config.redis_port, "Redis cache configured");

            Ok(Self::from_parts(store, cache, config.invalidation_policy()))
        }
    }
}

// ============================================================================
// Test support
// ============================================================================
