use async_trait::async_trait;
use kiosk_core::{Article, ArticleSource, Error, Result};

/// Canned article source for tests and offline runs. Serves a fixed batch,
/// or fails every fetch when built with [`StaticArticleSource::failing`].
pub struct StaticArticleSource {
    articles: Vec<Article>,
    fail_with: Option<String>,
}

impl StaticArticleSource {
    pub fn new(articles: Vec<Article>) -> Self {
        Self {
            articles,
            fail_with: None,
        }
    }

    /// A source whose every fetch fails, for exercising error paths.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            articles: Vec::new(),
            fail_with: Some(message.into()),
        }
    }
}

#[async_trait]
impl ArticleSource for StaticArticleSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch_latest(&self, limit: usize) -> Result<Vec<Article>> {
        if let Some(message) = &self.fail_with {
            return Err(Error::SourceFetch(message.clone()));
        }
        Ok(self.articles.iter().take(limit).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn article(id: &str) -> Article {
        Article {
            id: id.to_string(),
            title: format!("Story {}", id),
            excerpt: "A test.".to_string(),
            url: format!("https://news.example/{}", id),
            image_url: None,
            source_name: "static".to_string(),
            category: "general".to_string(),
            tags: vec![],
            published_at: Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_static_source_respects_limit() {
        let source = StaticArticleSource::new(vec![article("a1"), article("a2"), article("a3")]);
        let fetched = source.fetch_latest(2).await.unwrap();
        assert_eq!(fetched.len(), 2);
        assert_eq!(fetched[0].id, "a1");
    }

    #[tokio::test]
    async fn test_failing_source_always_errors() {
        let source = StaticArticleSource::failing("upstream down");
        assert!(matches!(
            source.fetch_latest(10).await,
            Err(Error::SourceFetch(_))
        ));
    }
}
