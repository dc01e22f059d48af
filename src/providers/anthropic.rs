use crate::config::ProviderConfig;
use crate::error::{ChefError, GenerationError};
use crate::providers::{read_response, text_at, CompletionRequest, LlmProvider};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

pub struct AnthropicProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl AnthropicProvider {
    /// Create a new Anthropic provider from configuration
    pub fn new(config: &ProviderConfig) -> Result<Self, ChefError> {
        // Try config first, then fall back to environment variable
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("ANTHROPIC_API_KEY").ok())
            .ok_or_else(|| {
                ChefError::Provider("ANTHROPIC_API_KEY not found in config or environment".into())
            })?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| "https://api.anthropic.com".to_string());

        Ok(AnthropicProvider {
            client: Client::new(),
            api_key,
            base_url,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Self {
        AnthropicProvider {
            client: Client::new(),
            api_key,
            base_url,
            model,
            temperature: 0.7,
            max_tokens: 4000,
        }
    }
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    fn provider_name(&self) -> &str {
        "anthropic"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: &CompletionRequest<'_>) -> Result<String, GenerationError> {
        // No schema parameter on the Messages API; the system prompt carries it
        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&json!({
                "model": self.model,
                "max_tokens": self.max_tokens,
                "temperature": request.temperature.unwrap_or(self.temperature),
                "system": request.system,
                "messages": [
                    {
                        "role": "user",
                        "content": request.prompt
                    }
                ]
            }))
            .send()
            .await?;

        let response_body = read_response(response, self.provider_name()).await?;
        let content = text_at(&response_body, "/content/0/text", self.provider_name())?;

        Ok(content.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::test_support::request;
    use mockito::{Matcher, Server};

    #[tokio::test]
    async fn test_complete() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/messages")
            .match_header("x-api-key", "test-key")
            .match_header("anthropic-version", "2023-06-01")
            .match_body(Matcher::PartialJson(json!({"system": "Reply with JSON."})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"content": [{"type": "text", "text": "{\"recipes\": [\"Panzanella\"]}"}]}"#)
            .create_async()
            .await;

        let provider = AnthropicProvider::with_base_url(
            "test-key".to_string(),
            server.url(),
            "claude-sonnet-4.5".to_string(),
        );
        let schema = json!({"type": "object"});

        let result = provider.complete(&request(&schema, None)).await.unwrap();
        assert_eq!(result, r#"{"recipes": ["Panzanella"]}"#);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_envelope_is_generation_failure() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/messages")
            .with_status(503)
            .with_body(r#"{"type": "error", "error": {"type": "overloaded_error", "message": "Overloaded"}}"#)
            .create_async()
            .await;

        let provider = AnthropicProvider::with_base_url(
            "test-key".to_string(),
            server.url(),
            "claude-sonnet-4.5".to_string(),
        );
        let schema = json!({"type": "object"});

        let err = provider.complete(&request(&schema, None)).await.unwrap_err();
        assert!(matches!(err, GenerationError::GenerationFailure(msg) if msg.contains("503")));
    }

    #[test]
    fn test_provider_name() {
        let mut config = ProviderConfig::for_model("claude-sonnet-4.5");
        config.api_key = Some("test-key".to_string());

        let provider = AnthropicProvider::new(&config).unwrap();
        assert_eq!(provider.provider_name(), "anthropic");
        assert_eq!(provider.model(), "claude-sonnet-4.5");
    }
}
