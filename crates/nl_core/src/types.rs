use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single article as returned by the news search API.
///
/// Every field is optional: the upstream omits or nulls them freely, and the
/// pipeline has to decide per operation what a missing value means.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub source: Option<Publisher>,
    pub author: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub url_to_image: Option<String>,
    pub published_at: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Publisher {
    pub id: Option<String>,
    pub name: Option<String>,
}

impl Article {
    pub fn title(&self) -> Option<&str> {
        non_empty(&self.title)
    }

    pub fn description(&self) -> Option<&str> {
        non_empty(&self.description)
    }

    pub fn url(&self) -> Option<&str> {
        non_empty(&self.url)
    }

    /// Sort key: the raw timestamp string, or "" when absent.
    pub fn published_key(&self) -> &str {
        self.published_at.as_deref().unwrap_or("")
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// The full search payload. Unrecognised top-level fields are carried through
/// so `/everything` can hand back what the upstream sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_results: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub articles: Vec<Article>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SearchResults {
    pub fn from_articles(articles: Vec<Article>) -> Self {
        Self {
            status: Some("ok".to_string()),
            total_results: Some(articles.len() as u64),
            articles,
            ..Default::default()
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status.as_deref().map_or(true, |s| s == "ok")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_missing_fields() {
        let article: Article = serde_json::from_str(
            r#"{"title": "Headline", "description": null, "url": ""}"#,
        )
        .unwrap();
        assert_eq!(article.title(), Some("Headline"));
        assert_eq!(article.description(), None);
        assert_eq!(article.url(), None);
        assert_eq!(article.published_key(), "");
    }

    #[test]
    fn test_search_results_keep_extra_fields() {
        let raw = r#"{
            "status": "ok",
            "totalResults": 1,
            "articles": [{
                "source": {"id": null, "name": "Reuters"},
                "title": "A",
                "url": "https://reuters.com/a",
                "publishedAt": "2024-01-01T00:00:00Z"
            }],
            "page": 1
        }"#;
        let results: SearchResults = serde_json::from_str(raw).unwrap();
        assert!(results.is_ok());
        assert_eq!(results.total_results, Some(1));
        assert_eq!(results.articles[0].source.as_ref().unwrap().name.as_deref(), Some("Reuters"));
        assert_eq!(results.extra.get("page"), Some(&Value::from(1)));

        let back = serde_json::to_value(&results).unwrap();
        assert_eq!(back["page"], 1);
        assert_eq!(back["articles"][0]["publishedAt"], "2024-01-01T00:00:00Z");
    }

    #[test]
    fn test_error_payload_is_not_ok() {
        let raw = r#"{"status":"error","code":"apiKeyMissing","message":"Your API key is missing."}"#;
        let results: SearchResults = serde_json::from_str(raw).unwrap();
        assert!(!results.is_ok());
        assert_eq!(results.code.as_deref(), Some("apiKeyMissing"));
        assert!(results.articles.is_empty());
    }
}
