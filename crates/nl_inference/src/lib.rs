use std::fmt;

use nl_core::HttpConfig;

pub mod models;

pub use models::{create_model, ModelKind};

/// Settings for building an inference backend.
#[derive(Clone, Default)]
pub struct Config {
    pub model: ModelKind,
    pub api_key: Option<String>,
    pub model_name: Option<String>,
    pub base_url: Option<String>,
    pub http: HttpConfig,
}

impl Config {
    pub fn new(model: ModelKind) -> Self {
        Self {
            model,
            ..Self::default()
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_model_name(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = Some(model_name.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_http(mut self, http: HttpConfig) -> Self {
        self.http = http;
        self
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model_name", &self.model_name)
            .field("base_url", &self.base_url)
            .field("http", &self.http)
            .finish()
    }
}

pub mod prelude {
    pub use super::Config;
    pub use super::models::{create_model, ModelKind};
    pub use nl_core::{Error, InferenceModel, Result};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_debug_redacts_key() {
        let config = Config::new(ModelKind::Gemini)
            .with_api_key("secret-key")
            .with_model_name("gemini-1.5-pro");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("<redacted>"));
        assert!(debug.contains("gemini-1.5-pro"));
    }
}
