use async_trait::async_trait;
use lazy_static::lazy_static;
use readabilityrs::Readability;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::debug;

use nl_core::{ContentExtractor, Error, HttpConfig, Result};

pub mod jsonld;

lazy_static! {
    /// Paragraph selectors for pages that mark up their body copy.
    static ref CONTENT_SELECTORS: Vec<Selector> = [
        "article p",
        "[itemprop='articleBody'] p",
        "main p",
    ]
    .iter()
    .filter_map(|s| Selector::parse(s).ok())
    .collect();
    static ref ANY_PARAGRAPH: Vec<Selector> = Selector::parse("p").into_iter().collect();
}

/// Generic article body extractor for arbitrary news pages.
#[derive(Debug, Clone)]
pub struct HtmlExtractor {
    client: Client,
}

impl HtmlExtractor {
    pub fn new(http: &HttpConfig) -> Result<Self> {
        Ok(Self {
            client: http.build_client()?,
        })
    }

    /// Use a preconfigured client (proxy, TLS or pooling settings).
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ContentExtractor for HtmlExtractor {
    async fn extract(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Extraction(format!("Failed to fetch {}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Extraction(format!("{} returned HTTP {}", url, status)));
        }

        let html = response
            .text()
            .await
            .map_err(|e| Error::Extraction(format!("Failed to read {}: {}", url, e)))?;

        let text = extract_main_text(&html, url);
        debug!("Extracted {} characters of body text from {}", text.len(), url);
        Ok(text)
    }
}

/// Best-effort main text of an HTML page; empty when nothing looks like body
/// copy.
///
/// Tried in order: JSON-LD `articleBody`, marked-up article paragraphs,
/// readability scoring, then every `<p>` on the page.
pub fn extract_main_text(html: &str, url: &str) -> String {
    let document = Html::parse_document(html);

    if let Some(body) = jsonld::extract_article_body(&document) {
        return body;
    }

    if let Some(text) = utils::first_paragraphs(&document, &CONTENT_SELECTORS) {
        return text;
    }

    if let Some(text) = readable_text(html, url) {
        return text;
    }

    utils::first_paragraphs(&document, &ANY_PARAGRAPH).unwrap_or_default()
}

/// Plain text of the readability-selected content, if it found any.
fn readable_text(html: &str, url: &str) -> Option<String> {
    let url = url.to_string();
    let content = Readability::new(html, Some(&url), None)
        .ok()?
        .parse()?
        .content?;

    let fragment = Html::parse_fragment(&content);
    utils::first_paragraphs(&fragment, &ANY_PARAGRAPH).or_else(|| {
        let text = utils::normalize_whitespace(&fragment.root_element().text().collect::<String>());
        (!text.is_empty()).then_some(text)
    })
}

/// Common utilities for scrapers
pub(crate) mod utils {
    use super::*;

    /// Whitespace-normalized text of every match, empty matches dropped.
    pub fn extract_texts(document: &Html, selector: &Selector) -> Vec<String> {
        document
            .select(selector)
            .map(|el| normalize_whitespace(&el.text().collect::<String>()))
            .filter(|text| !text.is_empty())
            .collect()
    }

    /// Paragraphs of the first selector that matches any text, blank-line joined.
    pub fn first_paragraphs(document: &Html, selectors: &[Selector]) -> Option<String> {
        selectors.iter().find_map(|selector| {
            let paragraphs = extract_texts(document, selector);
            (!paragraphs.is_empty()).then(|| paragraphs.join("\n\n"))
        })
    }

    pub fn normalize_whitespace(text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::utils;
    use axum::{http::StatusCode, response::Html as HtmlBody, routing::get, Router};

    const STORY_URL: &str = "https://example.com/story";

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        format!("http://{}", addr)
    }

    fn local_extractor() -> HtmlExtractor {
        HtmlExtractor::with_client(Client::builder().no_proxy().build().unwrap())
    }

    #[test]
    fn test_extract_texts() {
        let html = r#"
            <div class="item">Item   1</div>
            <div class="item">
                Item 2
            </div>
            <div class="item">   </div>
        "#;
        let document = Html::parse_document(html);
        let selector = Selector::parse(".item").unwrap();

        let texts = utils::extract_texts(&document, &selector);
        assert_eq!(texts, ["Item 1", "Item 2"]);
    }

    #[test]
    fn test_prefers_json_ld_body() {
        let html = r#"
            <html><head><script type="application/ld+json">{"articleBody": "From metadata."}</script></head>
            <body><article><p>From markup.</p></article></body></html>
        "#;
        assert_eq!(extract_main_text(html, STORY_URL), "From metadata.");
    }

    #[test]
    fn test_prefers_article_paragraphs_over_page_chrome() {
        let html = r#"
            <html><body>
                <nav><p>Subscribe now</p></nav>
                <article>
                    <h1>Headline</h1>
                    <p>First paragraph.</p>
                    <p>Second <b>paragraph</b>.</p>
                </article>
                <footer><p>Copyright</p></footer>
            </body></html>
        "#;
        assert_eq!(
            extract_main_text(html, STORY_URL),
            "First paragraph.\n\nSecond paragraph."
        );
    }

    #[test]
    fn test_falls_back_to_any_paragraph() {
        let html = "<html><body><div><p>Loose text.</p></div></body></html>";
        assert!(extract_main_text(html, STORY_URL).contains("Loose text."));
    }

    #[test]
    fn test_page_without_text_is_empty() {
        let html = "<html><body><div><img src='x.png'></div><script>var a = 1;</script></body></html>";
        assert_eq!(extract_main_text(html, STORY_URL), "");
    }

    #[test]
    fn test_extractor_builds() {
        assert!(HtmlExtractor::new(&HttpConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn test_extract_fetches_page() {
        let app = Router::new().route(
            "/story",
            get(|| async {
                HtmlBody("<html><body><article><p>Fetched body.</p></article></body></html>")
            }),
        );
        let base = serve(app).await;

        let text = local_extractor().extract(&format!("{}/story", base)).await.unwrap();
        assert_eq!(text, "Fetched body.");
    }

    #[tokio::test]
    async fn test_extract_non_success_page_is_upstream_error() {
        let app = Router::new().route("/gone", get(|| async { (StatusCode::NOT_FOUND, "gone") }));
        let base = serve(app).await;

        let err = local_extractor()
            .extract(&format!("{}/gone", base))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Extraction(_)));
        assert_eq!(err.kind(), nl_core::ErrorKind::UpstreamUnavailable);
        assert!(err.to_string().contains("404"));
    }
}
