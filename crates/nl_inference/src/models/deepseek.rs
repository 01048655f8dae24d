use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use nl_core::{Error, Result};
use crate::Config;

pub const DEEPSEEK_BASE_URL: &str = "https://api.deepseek.com/v1";
pub const DEFAULT_DEEPSEEK_MODEL: &str = "deepseek-chat";

const SERVICE: &str = "DeepSeek";

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

/// Any OpenAI-compatible chat completions endpoint; DeepSeek by default.
pub struct DeepSeekModel {
    client: Client,
    api_key: String,
    base_url: String,
    model_name: String,
}

impl DeepSeekModel {
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| Error::Config("DeepSeek API key is required".to_string()))?;
        Ok(Self {
            client: config.http.build_client()?,
            api_key,
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| DEEPSEEK_BASE_URL.to_string()),
            model_name: config
                .model_name
                .clone()
                .unwrap_or_else(|| DEFAULT_DEEPSEEK_MODEL.to_string()),
        })
    }
}

impl fmt::Debug for DeepSeekModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeepSeekModel")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model_name", &self.model_name)
            .finish()
    }
}

#[async_trait]
impl nl_core::InferenceModel for DeepSeekModel {
    fn name(&self) -> &str {
        SERVICE
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.model_name.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url.trim_end_matches('/')))
            .header("Authorization", format!("Bearer {}", self.api_key))
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

        parse_chat_response(status, &body)
    }
}

fn parse_chat_response(status: u16, body: &str) -> Result<String> {
    let response: ChatResponse = serde_json::from_str(body).map_err(|e| {
        Error::Inference(format!("{} returned a malformed response (HTTP {}): {}", SERVICE, status, e))
    })?;

    if let Some(error) = response.error {
        return Err(Error::Inference(format!("{}: {}", SERVICE, error.message)));
    }
    if !(200..300).contains(&status) {
        return Err(Error::Inference(format!("{} returned HTTP {}", SERVICE, status)));
    }

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| Error::Inference(format!("{} returned no choices", SERVICE)))
}
