use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use nl_core::{Error, InferenceModel, Result};
use tracing::info;

use crate::Config;

pub mod deepseek;
pub mod dummy;
pub mod gemini;

pub use deepseek::DeepSeekModel;
pub use dummy::DummyModel;
pub use gemini::GeminiModel;

/// Which text-generation backend to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelKind {
    #[default]
    Gemini,
    DeepSeek,
    Dummy,
}

impl ModelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::Gemini => "gemini",
            ModelKind::DeepSeek => "deepseek",
            ModelKind::Dummy => "dummy",
        }
    }

    /// Environment variable holding this backend's key, if it needs one.
    pub fn api_key_var(&self) -> Option<&'static str> {
        match self {
            ModelKind::Gemini => Some("GOOGLE_API_KEY"),
            ModelKind::DeepSeek => Some("DEEPSEEK_API_KEY"),
            ModelKind::Dummy => None,
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "gemini" | "google" => Ok(ModelKind::Gemini),
            "deepseek" => Ok(ModelKind::DeepSeek),
            "dummy" | "offline" => Ok(ModelKind::Dummy),
            other => Err(Error::Config(format!("Unknown model backend: {}", other))),
        }
    }
}

pub async fn create_model(config: Option<Config>) -> Result<Arc<dyn InferenceModel>> {
    let config = config.unwrap_or_default();
    let model: Arc<dyn InferenceModel> = match config.model {
        ModelKind::Gemini => Arc::new(GeminiModel::new(&config)?),
        ModelKind::DeepSeek => Arc::new(DeepSeekModel::new(&config)?),
        ModelKind::Dummy => Arc::new(DummyModel::new()),
    };
    info!("🤖 Using {} model backend", model.name());
    Ok(model)
}
