mod openai;

pub use openai::OpenAiProvider;

use crate::Result;

/// System instruction sent with every summarization request
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Build the user prompt for summarizing an article
pub fn summary_prompt(text: &str) -> String {
    format!("Summarize the following article:\n{}", text)
}

/// Trait for text-generation providers
#[async_trait::async_trait]
pub trait AiProvider: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &str;

    /// Summarize `content` in at most `max_tokens` output tokens.
    /// Returns the raw completion text.
    async fn summarize(&self, content: &str, max_tokens: u32) -> Result<String>;
}
