use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Stable across fetches of the same upstream item; used for
    /// de-duplication and routing.
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub source_name: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub published_at: DateTime<Utc>,
}

impl Article {
    pub fn has_image(&self) -> bool {
        self.image_url.as_deref().is_some_and(|u| !u.is_empty())
    }
}

/// The last-fetched article batch plus its bookkeeping. Replaced wholesale
/// on every successful fetch, never partially patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    pub articles: Vec<Article>,
    pub fetched_at: DateTime<Utc>,
    pub last_daily_pull_date: Option<NaiveDate>,
}

impl CacheEntry {
    pub fn age(&self, now: DateTime<Utc>) -> chrono::Duration {
        now - self.fetched_at
    }
}
