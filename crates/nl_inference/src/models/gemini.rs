//! Google Gemini `generateContent` backend.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use nl_core::{Error, Result};
use crate::Config;

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

const SERVICE: &str = "Gemini";

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
    prompt_feedback: Option<PromptFeedback>,
    error: Option<GeminiError>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiResponseContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

pub struct GeminiModel {
    client: Client,
    api_key: String,
    base_url: String,
    model_name: String,
}

impl GeminiModel {
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| Error::Config("GOOGLE_API_KEY is required for the gemini model".to_string()))?;
        Ok(Self {
            client: config.http.build_client()?,
            api_key,
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| GEMINI_BASE_URL.to_string()),
            model_name: config
                .model_name
                .clone()
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model_name
        )
    }
}

impl fmt::Debug for GeminiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiModel")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model_name", &self.model_name)
            .finish()
    }
}

#[async_trait]
impl nl_core::InferenceModel for GeminiModel {
    fn name(&self) -> &str {
        SERVICE
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::upstream(SERVICE, e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| Error::upstream(SERVICE, e.to_string()))?;
        debug!("{} replied with HTTP {} ({} bytes)", SERVICE, status, body.len());

        parse_gemini_response(status, &body)
    }
}

/// Concatenated text parts of the first candidate.
fn parse_gemini_response(status: u16, body: &str) -> Result<String> {
    let response: GeminiResponse = serde_json::from_str(body).map_err(|e| {
        Error::Inference(format!("{} returned a malformed response (HTTP {}): {}", SERVICE, status, e))
    })?;

    if let Some(error) = response.error {
        return Err(Error::Inference(format!("{}: {}", SERVICE, error.message)));
    }
    if !(200..300).contains(&status) {
        return Err(Error::Inference(format!("{} returned HTTP {}", SERVICE, status)));
    }

    let text: String = response
        .candidates
        .unwrap_or_default()
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.is_empty() {
        let reason = response
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .map(|r| format!(" (blocked: {})", r))
            .unwrap_or_default();
        return Err(Error::Inference(format!("{} returned no text{}", SERVICE, reason)));
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ModelKind;
    use nl_core::ErrorKind;

    #[test]
    fn test_model_requires_api_key() {
        let err = GeminiModel::new(&Config::new(ModelKind::Gemini)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);

        let model = GeminiModel::new(&Config::new(ModelKind::Gemini).with_api_key("g-key")).unwrap();
        assert_eq!(
            model.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent"
        );
        assert!(!format!("{:?}", model).contains("g-key"));
    }

    #[test]
    fn test_custom_model_name() {
        let config = Config::new(ModelKind::Gemini)
            .with_api_key("g-key")
            .with_model_name("gemini-2.0-flash");
        let model = GeminiModel::new(&config).unwrap();
        assert!(model.endpoint().ends_with("/models/gemini-2.0-flash:generateContent"));
    }

    #[test]
    fn test_parse_candidate_text() {
        let body = r#"{
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "Part one. "}, {"text": "Part two."}]},
                "finishReason": "STOP"
            }]
        }"#;
        assert_eq!(parse_gemini_response(200, body).unwrap(), "Part one. Part two.");
    }

    #[test]
    fn test_parse_api_error() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}}"#;
        let err = parse_gemini_response(400, body).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UpstreamUnavailable);
        assert!(err.to_string().contains("API key not valid."));
    }

    #[test]
    fn test_parse_blocked_prompt() {
        let body = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
        let err = parse_gemini_response(200, body).unwrap_err();
        assert!(err.to_string().contains("blocked: SAFETY"));
    }
}
