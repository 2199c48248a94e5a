//! Redis cache implementation.
//!
//! Keys are written with plain `SET` (no expiry) and removed with `DEL`.
//! The `ConnectionManager` is created on first use and then shared; it
//! reconnects on its own after a dropped connection. Until the first connect
//! succeeds every call retries it and fails with `ConnectionFailed`.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::AsyncCommands;
use tokio::sync::OnceCell;

use simpletodo_core::cache::{Cache, Result};

use super::error::map_redis_error;

const CONNECTION_TIMEOUT: Duration = Duration::from_secs(2);
const RESPONSE_TIMEOUT: Duration = Duration::from_secs(2);
const CONNECT_RETRIES: usize = 2;
const MAX_RETRY_DELAY_MS: u64 = 500;

fn manager_config() -> ConnectionManagerConfig {
    ConnectionManagerConfig::new()
        .set_connection_timeout(CONNECTION_TIMEOUT)
        .set_response_timeout(RESPONSE_TIMEOUT)
        .set_number_of_retries(CONNECT_RETRIES)
        .set_max_delay(MAX_RETRY_DELAY_MS)
}

/// Redis cache backend using a lazily connected connection manager.
pub struct RedisCache {
    client: redis::Client,
    conn: OnceCell<ConnectionManager>,
}

impl RedisCache {
    /// Creates a Redis cache for `url` and attempts a first connection.
    ///
    /// An unreachable server does not fail construction: it is logged and
    /// the connection is retried by the next cache call.
    ///
    /// # Arguments
    ///
    /// * `url` - Redis connection URL (e.g., "redis://:password@localhost:6379")
    ///
    /// # Errors
    ///
    /// Returns a `CacheError` if the URL is not a valid Redis URL.
    pub async fn new(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).map_err(map_redis_error)?;
        let cache = Self {
            client,
            conn: OnceCell::new(),
        };

        if let Err(err) = cache.connection().await {
            tracing::warn!(error = %err, "Redis unavailable at startup, cache calls will fail until it is reachable");
        }

        Ok(cache)
    }

    async fn connection(&self) -> Result<ConnectionManager> {
        self.conn
            .get_or_try_init(|| async {
                ConnectionManager::new_with_config(self.client.clone(), manager_config())
                    .await
                    .map_err(map_redis_error)
            })
            .await
            .cloned()
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn exists(&self, key: &str) -> Result<bool> {
        let mut conn = self.connection().await?;
        conn.exists(key).await.map_err(map_redis_error)
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.connection().await?;
        conn.get(key).await.map_err(map_redis_error)
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut conn = self.connection().await?;
        conn.set::<_, _, ()>(key, value)
            .await
            .map_err(map_redis_error)
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.connection().await?;
        conn.del::<_, ()>(key).await.map_err(map_redis_error)
    }
}
