use async_trait::async_trait;

use super::Result;

/// Key-value cache holding serialized item-collection snapshots.
///
/// Values never expire on their own. Implementations carry no retry logic:
/// any failure is returned to the caller as-is.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Returns true if a value is stored under `key`.
    async fn exists(&self, key: &str) -> Result<bool>;

    /// Gets a value from the cache by key.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Deletes a value from the cache by key. Deleting a missing key succeeds.
    async fn delete(&self, key: &str) -> Result<()>;
}
