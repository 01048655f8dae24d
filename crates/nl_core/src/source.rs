use async_trait::async_trait;
use crate::types::SearchResults;
use crate::Result;

#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Name of the upstream, used in logs and error messages
    fn name(&self) -> &str;

    /// Search articles matching a topic, returning the upstream payload as-is
    async fn search(&self, topic: &str) -> Result<SearchResults>;
}

#[async_trait]
pub trait ContentExtractor: Send + Sync {
    /// Fetch a page and return its main body text, possibly empty
    async fn extract(&self, url: &str) -> Result<String>;
}
