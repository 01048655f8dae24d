use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use nl_core::{BiasTable, Error, HttpConfig, Pipeline, Result};
use nl_inference::{create_model, Config as ModelConfig, ModelKind};
use nl_sources::newsapi::NEWSAPI_BASE_URL;
use nl_sources::{HtmlExtractor, NewsApiSource};

#[derive(Parser, Debug)]
#[command(name = "newslens", author, version, about = "News search, summaries, timelines and source bias", long_about = None)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, env = "NEWS_API_KEY", hide_env_values = true, global = true)]
    pub news_api_key: Option<String>,

    #[arg(long, env = "NEWS_API_URL", default_value = NEWSAPI_BASE_URL, global = true)]
    pub news_api_url: String,

    /// Text generation backend: gemini, deepseek or dummy
    #[arg(long, env = "NEWSLENS_MODEL", default_value = "gemini", global = true)]
    pub model: ModelKind,

    /// Backend-specific model name (e.g. gemini-1.5-flash, deepseek-chat)
    #[arg(long, env = "NEWSLENS_MODEL_NAME", global = true)]
    pub model_name: Option<String>,

    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true, global = true)]
    pub google_api_key: Option<String>,

    #[arg(long, env = "DEEPSEEK_API_KEY", hide_env_values = true, global = true)]
    pub deepseek_api_key: Option<String>,

    /// Timeout in seconds for every outbound request
    #[arg(
        long,
        env = "NEWSLENS_HTTP_TIMEOUT",
        default_value_t = nl_core::http::DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..),
        global = true
    )]
    pub http_timeout: u64,

    /// JSON file of `{"host": "Left|Center|Right"}` replacing the built-in table
    #[arg(long, env = "NEWSLENS_BIAS_TABLE", global = true)]
    pub bias_table: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API
    Serve {
        #[arg(long, env = "NEWSLENS_BIND", default_value = "0.0.0.0:8000")]
        bind: SocketAddr,
    },
    /// Search a topic and print the sorted payload
    Everything { topic: String },
    /// Group a topic's headlines by source bias
    Bias { topic: String },
    /// Ask the model for a timeline of a topic
    Timeline { topic: String },
    /// Summarize a single article
    Summarize { article_url: String },
    /// Look up the bias label of a URL (no network access)
    Classify { url: String },
}

impl Cli {
    pub fn http_config(&self) -> HttpConfig {
        HttpConfig::default().with_timeout(Duration::from_secs(self.http_timeout))
    }

    /// Key for the selected model backend; `None` for backends that need none.
    pub fn model_api_key(&self) -> Result<Option<String>> {
        let (key, var) = match self.model {
            ModelKind::Gemini => (&self.google_api_key, "GOOGLE_API_KEY"),
            ModelKind::DeepSeek => (&self.deepseek_api_key, "DEEPSEEK_API_KEY"),
            ModelKind::Dummy => return Ok(None),
        };
        require_key(key.as_deref(), var).map(Some)
    }

    pub fn model_config(&self) -> Result<ModelConfig> {
        let mut config = ModelConfig::new(self.model).with_http(self.http_config());
        if let Some(key) = self.model_api_key()? {
            config = config.with_api_key(key);
        }
        if let Some(name) = &self.model_name {
            config = config.with_model_name(name.clone());
        }
        Ok(config)
    }

    pub fn load_bias_table(&self) -> Result<BiasTable> {
        match &self.bias_table {
            Some(path) => BiasTable::load(path),
            None => Ok(BiasTable::builtin()),
        }
    }

    /// Validates every key before any collaborator is built.
    pub async fn build_pipeline(&self) -> Result<Pipeline> {
        let news_api_key = require_key(self.news_api_key.as_deref(), "NEWS_API_KEY")?;
        let model_config = self.model_config()?;
        let http = self.http_config();

        let bias_table = self.load_bias_table()?;
        info!("📚 Bias table loaded with {} sources", bias_table.len());

        let source = NewsApiSource::new(news_api_key, &http)?.with_base_url(self.news_api_url.clone());
        let extractor = HtmlExtractor::new(&http)?;
        let model = create_model(Some(model_config)).await?;

        Ok(Pipeline::new(
            Arc::new(source),
            Arc::new(extractor),
            model,
            Arc::new(bias_table),
        ))
    }
}

pub fn require_key(value: Option<&str>, var: &str) -> Result<String> {
    match value.map(str::trim) {
        Some(key) if !key.is_empty() => Ok(key.to_string()),
        _ => Err(Error::Config(format!("{} is required", var))),
    }
}
