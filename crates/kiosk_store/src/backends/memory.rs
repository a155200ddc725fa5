use async_trait::async_trait;
use kiosk_core::{CacheEntry, CacheStore, Result};
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-process cache store. The default for tests and for running without a
/// profile directory; contents die with the process.
#[derive(Default, Clone)]
pub struct MemoryCacheStore {
    entry: Arc<RwLock<Option<CacheEntry>>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn read(&self) -> Result<Option<CacheEntry>> {
        Ok(self.entry.read().await.clone())
    }

    async fn write(&self, entry: &CacheEntry) -> Result<()> {
        *self.entry.write().await = Some(entry.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.entry.write().await = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use kiosk_core::Article;

    fn entry() -> CacheEntry {
        CacheEntry {
            articles: vec![Article {
                id: "a1".to_string(),
                title: "Test Article".to_string(),
                excerpt: "A test.".to_string(),
                url: "https://news.example/a1".to_string(),
                image_url: None,
                source_name: "test".to_string(),
                category: "general".to_string(),
                tags: vec![],
                published_at: Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap(),
            }],
            fetched_at: Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap(),
            last_daily_pull_date: Some(Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap().date_naive()),
        }
    }

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemoryCacheStore::new();
        assert!(store.read().await.unwrap().is_none());

        let entry = entry();
        store.write(&entry).await.unwrap();
        assert_eq!(store.read().await.unwrap(), Some(entry));

        store.clear().await.unwrap();
        assert!(store.read().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_write_replaces_wholesale() {
        let store = MemoryCacheStore::new();
        let first = entry();
        store.write(&first).await.unwrap();

        let mut second = entry();
        second.articles.clear();
        second.last_daily_pull_date = None;
        store.write(&second).await.unwrap();

        let read = store.read().await.unwrap().unwrap();
        assert!(read.articles.is_empty());
        assert!(read.last_daily_pull_date.is_none());
    }
}
