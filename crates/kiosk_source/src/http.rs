use async_trait::async_trait;
use chrono::{DateTime, Utc};
use kiosk_core::{Article, ArticleSource, Error, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

pub const DEFAULT_LIMIT: usize = 30;

#[derive(Debug, Deserialize)]
struct ListResponse {
    success: bool,
    #[serde(default)]
    articles: Vec<WireArticle>,
}

/// The upstream item as it appears on the wire. `publishedAt` arrives as an
/// ISO-8601 string and is re-parsed before anything orders on it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireArticle {
    id: String,
    title: String,
    excerpt: String,
    url: String,
    #[serde(default)]
    image_url: Option<String>,
    source_name: String,
    category: String,
    #[serde(default)]
    tags: Vec<String>,
    published_at: String,
}

impl WireArticle {
    fn into_article(self) -> Result<Article> {
        let published_at = DateTime::parse_from_rfc3339(&self.published_at)
            .map_err(|e| {
                Error::SourceFetch(format!("bad publishedAt {:?}: {}", self.published_at, e))
            })?
            .with_timezone(&Utc);

        Ok(Article {
            id: self.id,
            title: self.title,
            excerpt: self.excerpt,
            url: self.url,
            image_url: self.image_url,
            source_name: self.source_name,
            category: self.category,
            tags: self.tags,
            published_at,
        })
    }
}

/// Client for the upstream article-listing API.
pub struct HttpArticleSource {
    client: Client,
    base_url: Url,
}

impl HttpArticleSource {
    /// `base_url` is the site root; the listing path is joined onto it.
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::SourceFetch(format!("invalid base URL {:?}: {}", base_url, e)))?;
        Ok(Self {
            client: Client::new(),
            base_url,
        })
    }

    fn list_url(&self, limit: usize) -> Result<Url> {
        let mut url = self
            .base_url
            .join("api/articles/list")
            .map_err(|e| Error::SourceFetch(format!("bad listing URL: {}", e)))?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());
        Ok(url)
    }
}

#[async_trait]
impl ArticleSource for HttpArticleSource {
    fn name(&self) -> &str {
        self.base_url.host_str().unwrap_or("upstream")
    }

    async fn fetch_latest(&self, limit: usize) -> Result<Vec<Article>> {
        let url = self.list_url(limit)?;
        debug!(%url, "fetching article list");

        let response = self.client.get(url.clone()).send().await?;
        if !response.status().is_success() {
            return Err(Error::SourceFetch(format!(
                "{} returned {}",
                url,
                response.status()
            )));
        }

        let body: ListResponse = response
            .json()
            .await
            .map_err(|e| Error::SourceFetch(format!("malformed list payload: {}", e)))?;
        if !body.success {
            return Err(Error::SourceFetch(format!("{} reported success=false", url)));
        }

        let mut articles = Vec::with_capacity(body.articles.len());
        for wire in body.articles {
            articles.push(wire.into_article()?);
        }
        debug!(count = articles.len(), "fetched article list");
        Ok(articles)
    }
}
