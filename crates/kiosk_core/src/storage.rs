use async_trait::async_trait;

use crate::types::CacheEntry;
use crate::Result;

/// Durable home of the last-fetched article batch. One logical entry per
/// profile; the feed controller never mutates it except through `write`.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Read the cached batch. Missing and unreadable entries both come back
    /// as `None`; a corrupt slot must never surface as an error.
    async fn read(&self) -> Result<Option<CacheEntry>>;

    /// Replace the cached batch wholesale.
    async fn write(&self, entry: &CacheEntry) -> Result<()>;

    /// Drop everything that was stored.
    async fn clear(&self) -> Result<()>;
}
