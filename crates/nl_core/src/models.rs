use std::fmt;
use async_trait::async_trait;
use crate::Result;

#[async_trait]
pub trait InferenceModel: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Send a prompt and return the model's text reply untouched
    async fn generate(&self, prompt: &str) -> Result<String>;
}
