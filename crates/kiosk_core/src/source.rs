use async_trait::async_trait;

use crate::types::Article;
use crate::Result;

/// Upstream article listing. Treated as opaque, possibly slow, possibly
/// failing; callers decide what a failure degrades to.
#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Name of the upstream, for logs.
    fn name(&self) -> &str;

    /// Fetch the latest articles, newest first.
    async fn fetch_latest(&self, limit: usize) -> Result<Vec<Article>>;
}
