mod anthropic;
mod azure_openai;
mod factory;
mod google;
mod ollama;
mod open_ai;

pub use anthropic::AnthropicProvider;
pub use azure_openai::AzureOpenAIProvider;
pub use factory::{ProviderFactory, ProviderKind};
pub use google::GoogleProvider;
pub use ollama::OllamaProvider;
pub use open_ai::OpenAIProvider;

use crate::error::GenerationError;
use async_trait::async_trait;
use log::debug;
use reqwest::Response;
use serde_json::Value;

/// One schema-constrained completion request
#[derive(Debug, Clone)]
pub struct CompletionRequest<'a> {
    /// System instruction, including the expected JSON Schema
    pub system: &'a str,
    /// User-facing instruction built by the prompt module
    pub prompt: &'a str,
    /// Schema identifier, for APIs that require a name
    pub schema_name: &'a str,
    /// JSON Schema the reply must satisfy
    pub schema: &'a Value,
    /// Sampling temperature; `None` uses the provider's configured default
    pub temperature: Option<f32>,
}

/// Unified trait for all LLM providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "openai", "google")
    fn provider_name(&self) -> &str;

    /// Model identifier sent with every request
    fn model(&self) -> &str;

    /// Perform one request-response exchange and return the reply text
    async fn complete(&self, request: &CompletionRequest<'_>) -> Result<String, GenerationError>;
}

/// Decode a provider response body, turning non-2xx statuses and error
/// envelopes into `GenerationFailure`.
pub(crate) async fn read_response(
    response: Response,
    provider: &str,
) -> Result<Value, GenerationError> {
    let status = response.status();
    let body = response.text().await?;
    debug!("{} response ({}): {}", provider, status, body);

    if !status.is_success() {
        return Err(GenerationError::GenerationFailure(format!(
            "{} API returned status {}: {}",
            provider, status, body
        )));
    }

    let value: Value = serde_json::from_str(&body).map_err(|e| {
        GenerationError::GenerationFailure(format!("{} returned a non-JSON body: {}", provider, e))
    })?;

    if let Some(error) = value.get("error") {
        let message = error
            .as_str()
            .or_else(|| error["message"].as_str())
            .unwrap_or("Unknown error");
        return Err(GenerationError::GenerationFailure(format!(
            "{} API error: {}",
            provider, message
        )));
    }

    Ok(value)
}

/// Pull the text payload out of a decoded envelope
pub(crate) fn text_at<'v>(
    value: &'v Value,
    pointer: &str,
    provider: &str,
) -> Result<&'v str, GenerationError> {
    value.pointer(pointer).and_then(Value::as_str).ok_or_else(|| {
        GenerationError::GenerationFailure(format!(
            "Failed to extract content from {} response",
            provider
        ))
    })
}
