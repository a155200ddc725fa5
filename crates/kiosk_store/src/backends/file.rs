use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use kiosk_core::{Article, CacheEntry, CacheStore, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Bumped whenever the persisted layout changes; entries written under a
/// different version are treated as empty instead of mis-parsed.
const SCHEMA_VERSION: u32 = 1;

const SCHEMA_SLOT: &str = "schema_version";
const ARTICLES_SLOT: &str = "articles.json";
const FETCHED_AT_SLOT: &str = "fetched_at";
const LAST_PULL_SLOT: &str = "last_pull_date";

/// Durable cache store: one directory holding the article batch, the fetch
/// timestamp and the last-daily-pull date as separate slots. Anything
/// missing or unparseable reads back as an empty cache, never an error.
pub struct FileCacheStore {
    dir: PathBuf,
}

impl FileCacheStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn slot(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    async fn read_slot(&self, name: &str) -> Option<String> {
        tokio::fs::read_to_string(self.slot(name)).await.ok()
    }

    async fn read_entry(&self) -> Option<CacheEntry> {
        let version = self.read_slot(SCHEMA_SLOT).await?;
        if version.trim().parse::<u32>().ok()? != SCHEMA_VERSION {
            debug!(path = %self.dir.display(), "cache schema version mismatch, treating as empty");
            return None;
        }

        let raw_articles = self.read_slot(ARTICLES_SLOT).await?;
        let articles: Vec<Article> = match serde_json::from_str(&raw_articles) {
            Ok(articles) => articles,
            Err(e) => {
                debug!("unparseable article batch, treating as empty: {}", e);
                return None;
            }
        };

        let raw_fetched = self.read_slot(FETCHED_AT_SLOT).await?;
        let fetched_at = match raw_fetched.trim().parse::<DateTime<Utc>>() {
            Ok(t) => t,
            Err(e) => {
                debug!("unparseable fetch timestamp, treating as empty: {}", e);
                return None;
            }
        };

        // The daily-pull marker is optional; a bad value just means no
        // recorded pull, not a corrupt cache.
        let last_daily_pull_date = self
            .read_slot(LAST_PULL_SLOT)
            .await
            .and_then(|s| s.trim().parse::<NaiveDate>().ok());

        Some(CacheEntry {
            articles,
            fetched_at,
            last_daily_pull_date,
        })
    }

    async fn remove_slot(&self, name: &str) -> Result<()> {
        match tokio::fs::remove_file(self.slot(name)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl CacheStore for FileCacheStore {
    async fn read(&self) -> Result<Option<CacheEntry>> {
        Ok(self.read_entry().await)
    }

    async fn write(&self, entry: &CacheEntry) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(self.slot(ARTICLES_SLOT), serde_json::to_vec(&entry.articles)?).await?;
        tokio::fs::write(self.slot(FETCHED_AT_SLOT), entry.fetched_at.to_rfc3339()).await?;
        match entry.last_daily_pull_date {
            Some(date) => tokio::fs::write(self.slot(LAST_PULL_SLOT), date.to_string()).await?,
            None => self.remove_slot(LAST_PULL_SLOT).await?,
        }
        // Written last so a batch is only readable once it is complete.
        tokio::fs::write(self.slot(SCHEMA_SLOT), SCHEMA_VERSION.to_string()).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        for name in [SCHEMA_SLOT, ARTICLES_SLOT, FETCHED_AT_SLOT, LAST_PULL_SLOT] {
            self.remove_slot(name).await?;
        }
        Ok(())
    }
}
