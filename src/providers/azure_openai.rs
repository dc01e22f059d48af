use crate::config::ProviderConfig;
use crate::error::{ChefError, GenerationError};
use crate::providers::{read_response, text_at, CompletionRequest, LlmProvider};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

pub struct AzureOpenAIProvider {
    client: Client,
    api_key: String,
    endpoint: String,
    deployment_name: String,
    api_version: String,
    temperature: f32,
    max_tokens: u32,
}

impl AzureOpenAIProvider {
    /// Create a new Azure OpenAI provider from configuration
    pub fn new(config: &ProviderConfig) -> Result<Self, ChefError> {
        // Try config first, then fall back to environment variable
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("AZURE_OPENAI_API_KEY").ok())
            .ok_or_else(|| {
                ChefError::Provider(
                    "AZURE_OPENAI_API_KEY not found in config or environment".into(),
                )
            })?;

        let endpoint = config
            .endpoint
            .clone()
            .ok_or_else(|| ChefError::Provider("Azure OpenAI endpoint is required".into()))?;

        let deployment_name = config.deployment_name.clone().ok_or_else(|| {
            ChefError::Provider("Azure OpenAI deployment_name is required".into())
        })?;

        // Structured outputs need 2024-08-01-preview or later
        let api_version = config
            .api_version
            .clone()
            .unwrap_or_else(|| "2024-08-01-preview".to_string());

        Ok(AzureOpenAIProvider {
            client: Client::new(),
            api_key,
            endpoint,
            deployment_name,
            api_version,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }
}

#[async_trait]
impl LlmProvider for AzureOpenAIProvider {
    fn provider_name(&self) -> &str {
        "azure_openai"
    }

    fn model(&self) -> &str {
        &self.deployment_name
    }

    async fn complete(&self, request: &CompletionRequest<'_>) -> Result<String, GenerationError> {
        // Azure OpenAI URL format:
        // https://{endpoint}/openai/deployments/{deployment-name}/chat/completions?api-version={api-version}
        let url = format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint.trim_end_matches('/'),
            self.deployment_name,
            self.api_version
        );

        let response = self
            .client
            .post(&url)
            .header("api-key", &self.api_key)
            .json(&json!({
                "messages": [
                    {"role": "system", "content": request.system},
                    {"role": "user", "content": request.prompt}
                ],
                "response_format": {
                    "type": "json_schema",
                    "json_schema": {
                        "name": request.schema_name,
                        "schema": request.schema
                    }
                },
                "temperature": request.temperature.unwrap_or(self.temperature),
                "max_tokens": self.max_tokens
            }))
            .send()
            .await?;

        let response_body = read_response(response, self.provider_name()).await?;
        let content = text_at(
            &response_body,
            "/choices/0/message/content",
            self.provider_name(),
        )?;

        Ok(content.to_string())
    }
}
