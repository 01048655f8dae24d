//! NewsAPI `v2/everything` client.

use async_trait::async_trait;
use reqwest::Client;
use std::fmt;
use tracing::debug;

use nl_core::{ArticleSource, Error, HttpConfig, Result, SearchResults};

pub const NEWSAPI_BASE_URL: &str = "https://newsapi.org/v2";

const SERVICE: &str = "NewsAPI";

pub struct NewsApiSource {
    client: Client,
    api_key: String,
    base_url: String,
}

impl fmt::Debug for NewsApiSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsApiSource")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl NewsApiSource {
    pub fn new(api_key: impl Into<String>, http: &HttpConfig) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(Error::Config("NEWS_API_KEY is required".to_string()));
        }
        Ok(Self {
            client: http.build_client()?,
            api_key,
            base_url: NEWSAPI_BASE_URL.to_string(),
        })
    }

    /// Use a preconfigured client (proxy, TLS or pooling settings).
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/everything", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ArticleSource for NewsApiSource {
    fn name(&self) -> &str {
        SERVICE
    }

    async fn search(&self, topic: &str) -> Result<SearchResults> {
        debug!("Searching {} for '{}'", SERVICE, topic);
        // Keep the key out of the request URL.
        let response = self
            .client
            .get(self.endpoint())
            .header("X-Api-Key", &self.api_key)
            .query(&[("q", topic)])
            .send()
            .await
            .map_err(|e| Error::upstream(SERVICE, e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| Error::upstream(SERVICE, e.to_string()))?;

        parse_search_response(status, &body)
    }
}

/// Turn an HTTP status and body into results, treating NewsAPI's
/// `{"status": "error", ...}` envelope and non-2xx codes as upstream failures.
pub fn parse_search_response(status: u16, body: &str) -> Result<SearchResults> {
    let results: SearchResults = serde_json::from_str(body).map_err(|e| {
        Error::upstream(SERVICE, format!("malformed response (HTTP {}): {}", status, e))
    })?;

    if !(200..300).contains(&status) || !results.is_ok() {
        let code = results.code.clone().unwrap_or_else(|| format!("HTTP {}", status));
        let message = results
            .message
            .clone()
            .unwrap_or_else(|| "request failed".to_string());
        return Err(Error::upstream(SERVICE, format!("{}: {}", code, message)));
    }

    Ok(results)
}
