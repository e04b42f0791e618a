use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use backoff::ExponentialBackoffBuilder;

use super::{summary_prompt, AiProvider, SYSTEM_PROMPT};
use crate::{Error, Result};

/// OpenAI chat-completions provider
pub struct OpenAiProvider {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiProvider {
    pub fn new(api_key: &str, model: &str) -> Self {
        Self::with_config(OpenAIConfig::new().with_api_key(api_key), model)
    }

    /// Point the client at an OpenAI-compatible endpoint
    pub fn with_base_url(api_key: &str, model: &str, base_url: &str) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(base_url.trim_end_matches('/'));
        Self::with_config(config, model)
    }

    fn with_config(config: OpenAIConfig, model: &str) -> Self {
        // Fail on the first rate-limit response instead of retrying
        let no_retry = ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(Duration::ZERO))
            .build();

        Self {
            client: Client::with_config(config).with_backoff(no_retry),
            model: model.to_string(),
        }
    }

    async fn chat(&self, prompt: &str, max_tokens: u32) -> Result<String> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(SYSTEM_PROMPT)
                .build()
                .map_err(|e| Error::Summarization(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()
                .map_err(|e| Error::Summarization(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .max_tokens(max_tokens)
            .build()
            .map_err(|e| Error::Summarization(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| Error::Summarization(e.to_string()))?;

        response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::Summarization("completion returned no choices".to_string()))?
            .message
            .content
            .ok_or_else(|| Error::Summarization("completion choice has no content".to_string()))
    }
}

#[async_trait::async_trait]
impl AiProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn summarize(&self, content: &str, max_tokens: u32) -> Result<String> {
        self.chat(&summary_prompt(content), max_tokens).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn completion(choices: serde_json::Value) -> serde_json::Value {
        serde_json::json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "created": 1700000000,
            "model": "gpt-3.5-turbo",
            "choices": choices,
            "usage": { "prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15 }
        })
    }

    #[tokio::test]
    async fn test_summarize_sends_prompt_and_budget() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(serde_json::json!({
                "model": "gpt-3.5-turbo",
                "max_tokens": 50,
                "messages": [
                    { "role": "system", "content": "You are a helpful assistant." },
                    { "role": "user", "content": "Summarize the following article:\nA rocket landed." }
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(serde_json::json!([
                {
                    "index": 0,
                    "message": { "role": "assistant", "content": "  A rocket landed safely.  " },
                    "finish_reason": "stop"
                }
            ]))))
            .expect(1)
            .mount(&server)
            .await;

        let provider = OpenAiProvider::with_base_url("sk-test", "gpt-3.5-turbo", &server.uri());
        let summary = provider.summarize("A rocket landed.", 50).await.unwrap();

        assert_eq!(summary, "  A rocket landed safely.  ");
    }

    #[tokio::test]
    async fn test_no_choices_is_summarization_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(serde_json::json!([]))))
            .mount(&server)
            .await;

        let provider = OpenAiProvider::with_base_url("sk-test", "gpt-3.5-turbo", &server.uri());
        let err = provider.summarize("text", 150).await.unwrap_err();

        assert!(matches!(err, Error::Summarization(_)));
    }

    #[tokio::test]
    async fn test_api_error_is_summarization_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": {
                    "message": "Invalid model",
                    "type": "invalid_request_error",
                    "param": null,
                    "code": null
                }
            })))
            .mount(&server)
            .await;

        let provider = OpenAiProvider::with_base_url("sk-test", "no-such-model", &server.uri());
        let err = provider.summarize("text", 50).await.unwrap_err();

        assert!(matches!(err, Error::Summarization(_)));
        assert!(err.to_string().contains("Invalid model"));
    }

    #[tokio::test]
    async fn test_rate_limit_fails_without_retrying() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
                "error": {
                    "message": "Rate limit reached for requests",
                    "type": "requests",
                    "param": null,
                    "code": "rate_limit_exceeded"
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let provider = OpenAiProvider::with_base_url("sk-test", "gpt-3.5-turbo", &server.uri());
        let result = tokio::time::timeout(
            std::time::Duration::from_secs(5),
            provider.summarize("text", 50),
        )
        .await
        .expect("rate-limited request should not be retried");

        let err = result.unwrap_err();
        assert!(matches!(err, Error::Summarization(_)));
        assert!(err.to_string().contains("Rate limit"));
    }
}
