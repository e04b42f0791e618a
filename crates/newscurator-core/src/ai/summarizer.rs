use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::providers::{AiProvider, OpenAiProvider};
use crate::config::AppConfig;
use crate::{Error, Result};

/// Requested summary length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SummaryLength {
    #[default]
    Short,
    Detailed,
}

impl SummaryLength {
    pub const ALL: [SummaryLength; 2] = [SummaryLength::Short, SummaryLength::Detailed];

    /// Output token budget for this length
    pub fn max_tokens(&self) -> u32 {
        match self {
            SummaryLength::Short => 50,
            SummaryLength::Detailed => 150,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryLength::Short => "Short",
            SummaryLength::Detailed => "Detailed",
        }
    }
}

impl fmt::Display for SummaryLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SummaryLength {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "short" => Ok(SummaryLength::Short),
            "detailed" | "long" => Ok(SummaryLength::Detailed),
            other => Err(format!("unknown summary length: {}", other)),
        }
    }
}

/// AI Summarizer that wraps the configured provider
pub struct Summarizer {
    provider: Arc<dyn AiProvider>,
    concurrency: usize,
}

impl Summarizer {
    /// Create a new summarizer based on configuration
    pub fn new(config: &AppConfig) -> Result<Self> {
        let api_key = config.openai_api_key()?;
        let model = &config.ai.openai_model;

        let provider: Arc<dyn AiProvider> = match config.ai.openai_base_url.as_deref() {
            Some(base_url) => Arc::new(OpenAiProvider::with_base_url(api_key, model, base_url)),
            None => Arc::new(OpenAiProvider::new(api_key, model)),
        };

        Ok(Self::with_provider(provider, config.ai.concurrency))
    }

    /// Wrap an existing provider
    pub fn with_provider(provider: Arc<dyn AiProvider>, concurrency: usize) -> Self {
        Self {
            provider,
            concurrency: concurrency.max(1),
        }
    }

    /// Summarize article text within a token budget.
    /// Returns the trimmed completion; an empty completion is an error.
    pub async fn summarize(&self, text: &str, max_tokens: u32) -> Result<String> {
        tracing::debug!(
            "Summarizing {} chars with {} (max_tokens={})",
            text.chars().count(),
            self.provider.name(),
            max_tokens
        );

        let summary = self.provider.summarize(text, max_tokens).await?;
        let summary = summary.trim();

        if summary.is_empty() {
            return Err(Error::Summarization(format!(
                "{} returned an empty summary",
                self.provider.name()
            )));
        }

        Ok(summary.to_string())
    }

    /// Max concurrent summarization requests
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }
}
