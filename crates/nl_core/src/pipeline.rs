use std::sync::Arc;

use tracing::{debug, info};
use url::Url;

use crate::bias::{BiasBuckets, BiasTable, SourceBias};
use crate::models::InferenceModel;
use crate::prompts::{summary_prompt, timeline_context, timeline_prompt};
use crate::source::{ArticleSource, ContentExtractor};
use crate::timeline::{parse_timeline, TimelineOutcome};
use crate::types::{Article, SearchResults};
use crate::{Error, Result};

/// Fetch → sort → classify → bucket, plus the two model-backed operations.
///
/// Holds no per-request state; one instance is shared by every request.
pub struct Pipeline {
    source: Arc<dyn ArticleSource>,
    extractor: Arc<dyn ContentExtractor>,
    model: Arc<dyn InferenceModel>,
    bias_table: Arc<BiasTable>,
}

impl Pipeline {
    pub fn new(
        source: Arc<dyn ArticleSource>,
        extractor: Arc<dyn ContentExtractor>,
        model: Arc<dyn InferenceModel>,
        bias_table: Arc<BiasTable>,
    ) -> Self {
        Self {
            source,
            extractor,
            model,
            bias_table,
        }
    }

    pub fn bias_table(&self) -> &BiasTable {
        &self.bias_table
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Search a topic and return the payload with articles oldest-first.
    pub async fn everything(&self, topic: &str) -> Result<SearchResults> {
        let topic = require_param("topic", topic)?;
        let mut results = self.source.search(topic).await?;
        sort_by_published(&mut results.articles);
        debug!(
            "Fetched {} articles for '{}' from {}",
            results.articles.len(),
            topic,
            self.source.name()
        );
        Ok(results)
    }

    pub async fn bias(&self, topic: &str) -> Result<BiasBuckets> {
        let results = self.everything(topic).await?;
        let buckets = bucket_by_bias(&results.articles, &self.bias_table);
        debug!(
            "Bucketed {} of {} articles (left {}, center {}, right {}, unknown {})",
            buckets.total(),
            results.articles.len(),
            buckets.left.len(),
            buckets.center.len(),
            buckets.right.len(),
            buckets.unknown.len()
        );
        Ok(buckets)
    }

    pub async fn timeline(&self, topic: &str) -> Result<TimelineOutcome> {
        let results = self.everything(topic).await?;
        if results.articles.is_empty() {
            info!("No articles for '{}', skipping timeline generation", topic.trim());
            return Ok(TimelineOutcome::empty());
        }

        let context = timeline_context(&results.articles);
        if context.is_empty() {
            info!("No titled and described articles for '{}', skipping timeline generation", topic.trim());
            return Ok(TimelineOutcome::empty());
        }

        let reply = self.model.generate(&timeline_prompt(&context)).await?;
        let outcome = parse_timeline(&reply);
        if let TimelineOutcome::Unparsed { error, .. } = &outcome {
            debug!("Timeline reply from {} was not valid JSON: {}", self.model.name(), error);
        }
        Ok(outcome)
    }

    pub async fn summarize(&self, article_url: &str) -> Result<String> {
        let url = validate_article_url(article_url)?;
        let text = self.extractor.extract(url.as_str()).await?;
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::NoContent(url.to_string()));
        }
        debug!("Extracted {} characters from {}", text.len(), url);
        self.model.generate(&summary_prompt(text)).await
    }

    pub fn source_bias(&self, url: &str) -> Result<SourceBias> {
        let url = require_param("url", url)?;
        Ok(self.bias_table.source_bias(url))
    }
}

/// Stable ascending sort on the raw `publishedAt` string. Missing timestamps
/// compare as "" and so come first.
pub fn sort_by_published(articles: &mut [Article]) {
    articles.sort_by(|a, b| a.published_key().cmp(b.published_key()));
}

/// Route each titled, linked article into the bucket of its source.
pub fn bucket_by_bias(articles: &[Article], table: &BiasTable) -> BiasBuckets {
    let mut buckets = BiasBuckets::default();
    for article in articles {
        let (Some(url), Some(title)) = (article.url(), article.title()) else {
            continue;
        };
        buckets.push(table.classify(url), title.to_string());
    }
    buckets
}

fn require_param<'a>(name: &str, value: &'a str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::InvalidInput(format!(
            "Missing required query parameter `{}`",
            name
        )));
    }
    Ok(value)
}

pub fn validate_article_url(raw: &str) -> Result<Url> {
    let raw = require_param("article_url", raw)?;
    let url = Url::parse(raw).map_err(|e| Error::InvalidUrl(format!("{}: {}", raw, e)))?;
    let is_web = matches!(url.scheme(), "http" | "https") && url.host_str().is_some();
    if !is_web {
        return Err(Error::InvalidUrl(format!("{}: expected an http(s) URL", raw)));
    }
    Ok(url)
}
