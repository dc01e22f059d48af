use crate::config::ProviderConfig;
use crate::error::{ChefError, GenerationError};
use crate::providers::{read_response, text_at, CompletionRequest, LlmProvider};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

pub struct OllamaProvider {
    client: Client,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OllamaProvider {
    /// Create a new Ollama provider from configuration
    pub fn new(config: &ProviderConfig) -> Result<Self, ChefError> {
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| "http://localhost:11434".to_string());

        Ok(OllamaProvider {
            client: Client::new(),
            base_url,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(base_url: String, model: String) -> Self {
        OllamaProvider {
            client: Client::new(),
            base_url,
            model,
            temperature: 0.7,
            max_tokens: 2000,
        }
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    fn provider_name(&self) -> &str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: &CompletionRequest<'_>) -> Result<String, GenerationError> {
        // Native chat endpoint; `format` accepts a JSON Schema
        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&json!({
                "model": self.model,
                "stream": false,
                "format": request.schema,
                "messages": [
                    {"role": "system", "content": request.system},
                    {"role": "user", "content": request.prompt}
                ],
                "options": {
                    "temperature": request.temperature.unwrap_or(self.temperature),
                    "num_predict": self.max_tokens
                }
            }))
            .send()
            .await?;

        let response_body = read_response(response, self.provider_name()).await?;
        let content = text_at(&response_body, "/message/content", self.provider_name())?;

        Ok(content.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::test_support::request;
    use mockito::{Matcher, Server};

    #[tokio::test]
    async fn test_complete_sends_schema_as_format() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/chat")
            .match_body(Matcher::PartialJson(json!({
                "model": "llama3.1",
                "stream": false,
                "format": {"type": "object"}
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"model": "llama3.1", "message": {"role": "assistant", "content": "{\"recipes\": [\"Tomato Soup\"]}"}, "done": true}"#,
            )
            .create_async()
            .await;

        let provider = OllamaProvider::with_base_url(server.url(), "llama3.1".to_string());
        let schema = json!({"type": "object"});

        let result = provider.complete(&request(&schema, Some(0.3))).await.unwrap();
        assert!(result.contains("Tomato Soup"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_model_not_found() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/chat")
            .with_status(404)
            .with_body(r#"{"error": "model \"llama9\" not found"}"#)
            .create_async()
            .await;

        let provider = OllamaProvider::with_base_url(server.url(), "llama9".to_string());
        let schema = json!({"type": "object"});

        let err = provider.complete(&request(&schema, None)).await.unwrap_err();
        assert!(matches!(err, GenerationError::GenerationFailure(msg) if msg.contains("not found")));
    }

    #[test]
    fn test_provider_needs_no_api_key() {
        let provider = OllamaProvider::new(&ProviderConfig::for_model("llama3.1")).unwrap();
        assert_eq!(provider.provider_name(), "ollama");
    }
}
