use std::fmt;
use nl_core::Result;

/// Offline stand-in that echoes the tail of the prompt, where the content sits.
pub struct DummyModel;

const REPLY_WORDS: usize = 40;

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel").finish()
    }
}

impl DummyModel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DummyModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl nl_core::InferenceModel for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let words: Vec<&str> = prompt.split_whitespace().collect();
        let start = words.len().saturating_sub(REPLY_WORDS);
        Ok(words[start..].join(" "))
    }
}
