use chrono::Utc;
use kiosk_core::{Article, ArticleSource, CacheEntry, CacheStore, Result};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::freshness::{classify, FreshnessAction};
use crate::ranking::rank;

/// The feed's lifecycle as an explicit tagged union. Every upstream or
/// storage failure resolves to one of these; none of them is a crash.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase", tag = "phase")]
pub enum FeedState {
    Idle,
    Loading,
    /// Cached batch on screen, possibly with a silent refresh behind it.
    DisplayingCache {
        feed: Vec<Article>,
        refreshing: bool,
    },
    /// Blocked on the explicit "pull today's stories" affordance. A failed
    /// pull lands back here with its error, retryable but never auto-retried.
    AwaitingUserPull {
        last_error: Option<String>,
    },
    Pulling,
    /// Freshly pulled batch. An empty feed here is the explicit "no stories"
    /// render, distinct from a failed pull.
    DisplayingFresh {
        feed: Vec<Article>,
    },
}

/// Orchestrates store, freshness policy, ranking and source. One instance
/// per process, shared behind an `Arc`; the state sits behind an async
/// mutex so the web and CLI layers see a consistent snapshot.
pub struct FeedController {
    store: Arc<dyn CacheStore>,
    source: Arc<dyn ArticleSource>,
    fetch_limit: usize,
    state: Arc<Mutex<FeedState>>,
    refresh_tasks: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl FeedController {
    pub fn new(store: Arc<dyn CacheStore>, source: Arc<dyn ArticleSource>, fetch_limit: usize) -> Self {
        Self {
            store,
            source,
            fetch_limit,
            state: Arc::new(Mutex::new(FeedState::Idle)),
            refresh_tasks: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub async fn snapshot(&self) -> FeedState {
        self.state.lock().await.clone()
    }

    /// Mount-time entry point: classify the cache and either show it
    /// (optionally refreshing behind it) or block on an explicit pull.
    /// Never fails; a broken store just means an empty cache.
    pub async fn load(&self) -> FeedState {
        *self.state.lock().await = FeedState::Loading;

        let entry = match self.store.read().await {
            Ok(entry) => entry,
            Err(e) => {
                warn!("cache read failed, starting empty: {}", e);
                None
            }
        };

        let now = Utc::now();
        let classification = classify(entry.as_ref(), now);
        info!(
            "🗞️ cache classified as {:?}: {}",
            classification.action, classification.reason
        );

        let next = match (classification.action, entry) {
            (FreshnessAction::ServeCacheOnly, Some(entry)) => FeedState::DisplayingCache {
                feed: rank(&entry.articles, now.date_naive()),
                refreshing: false,
            },
            (FreshnessAction::ServeCacheAndRefresh, Some(entry)) => FeedState::DisplayingCache {
                feed: rank(&entry.articles, now.date_naive()),
                refreshing: true,
            },
            // classify never picks a serve action without an entry
            (FreshnessAction::RequireUserPull, _) | (_, None) => {
                FeedState::AwaitingUserPull { last_error: None }
            }
        };

        // Commit the state before the refresh task starts, so the task's
        // flag-clear cannot land first.
        *self.state.lock().await = next.clone();
        if matches!(next, FeedState::DisplayingCache { refreshing: true, .. }) {
            self.spawn_background_refresh().await;
        }
        next
    }

    /// The explicit "pull today's stories" action. On success the store is
    /// overwritten wholesale and the daily-pull marker is stamped; on
    /// failure the prompt returns with the error, ready to retry.
    pub async fn pull(&self) -> FeedState {
        *self.state.lock().await = FeedState::Pulling;
        info!("📰 pulling latest stories from {}", self.source.name());

        let next = match self.source.fetch_latest(self.fetch_limit).await {
            Ok(articles) if articles.is_empty() => {
                info!("source returned no stories");
                FeedState::DisplayingFresh { feed: Vec::new() }
            }
            Ok(articles) => {
                let now = Utc::now();
                let entry = CacheEntry {
                    articles,
                    fetched_at: now,
                    last_daily_pull_date: Some(now.date_naive()),
                };
                if let Err(e) = self.store.write(&entry).await {
                    // Still show the fresh batch; it just won't survive a restart.
                    warn!("pulled batch could not be persisted: {}", e);
                }
                info!("✨ pulled {} stories", entry.articles.len());
                FeedState::DisplayingFresh {
                    feed: rank(&entry.articles, now.date_naive()),
                }
            }
            Err(e) => {
                warn!("pull failed: {}", e);
                FeedState::AwaitingUserPull {
                    last_error: Some(e.to_string()),
                }
            }
        };

        *self.state.lock().await = next.clone();
        next
    }

    /// Drop the cached batch and reset to idle.
    pub async fn clear(&self) -> Result<()> {
        self.store.clear().await?;
        *self.state.lock().await = FeedState::Idle;
        Ok(())
    }

    /// Silent refresh: fetch, replace the store, leave the displayed ranking
    /// alone. The daily-pull marker is carried forward untouched; only an
    /// explicit pull stamps it.
    async fn spawn_background_refresh(&self) {
        let source = self.source.clone();
        let store = self.store.clone();
        let state = self.state.clone();
        let limit = self.fetch_limit;

        let handle = tokio::spawn(async move {
            match source.fetch_latest(limit).await {
                Ok(articles) if articles.is_empty() => {
                    warn!("background refresh returned no articles, keeping cached batch");
                }
                Ok(articles) => {
                    let previous = store.read().await.unwrap_or(None);
                    let entry = CacheEntry {
                        articles,
                        fetched_at: Utc::now(),
                        last_daily_pull_date: previous.and_then(|p| p.last_daily_pull_date),
                    };
                    match store.write(&entry).await {
                        Ok(()) => info!("✨ background refresh stored {} articles", entry.articles.len()),
                        Err(e) => warn!("background refresh could not persist: {}", e),
                    }
                }
                Err(e) => {
                    warn!("background refresh failed, keeping cached batch: {}", e);
                }
            }
            // The on-screen ranking is never reshuffled mid-session; the
            // fresh batch flows in on the next mount.
            if let FeedState::DisplayingCache { refreshing, .. } = &mut *state.lock().await {
                *refreshing = false;
            }
        });

        self.refresh_tasks.lock().await.push(handle);
    }

    /// Wait for any in-flight background refresh to settle. Used by tests
    /// and by the CLI before it exits.
    pub async fn wait_for_refresh(&self) {
        let handles: Vec<_> = self.refresh_tasks.lock().await.drain(..).collect();
        for handle in handles {
            if let Err(e) = handle.await {
                warn!("background refresh task panicked: {}", e);
            }
        }
    }
}
