use crate::config::ProviderConfig;
use crate::error::{ChefError, GenerationError};
use crate::providers::{read_response, text_at, CompletionRequest, LlmProvider};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

pub struct GoogleProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl GoogleProvider {
    /// Create a new Google Gemini provider from configuration
    pub fn new(config: &ProviderConfig) -> Result<Self, ChefError> {
        // Try config first, then fall back to environment variable
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("GOOGLE_API_KEY").ok())
            .ok_or_else(|| {
                ChefError::Provider("GOOGLE_API_KEY not found in config or environment".into())
            })?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| "https://generativelanguage.googleapis.com".to_string());

        Ok(GoogleProvider {
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
        GoogleProvider {
            client: Client::new(),
            api_key,
            base_url,
            model,
            temperature: 0.7,
            max_tokens: 2000,
        }
    }
}

/// Gemini's response schema uses upper-case OpenAPI type names.
fn gemini_schema(schema: &Value) -> Value {
    match schema {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| {
                    let converted = match (key.as_str(), value) {
                        ("type", Value::String(kind)) => Value::String(kind.to_uppercase()),
                        _ => gemini_schema(value),
                    };
                    (key.clone(), converted)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(gemini_schema).collect()),
        other => other.clone(),
    }
}

#[async_trait]
impl LlmProvider for GoogleProvider {
    fn provider_name(&self) -> &str {
        "google"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: &CompletionRequest<'_>) -> Result<String, GenerationError> {
        // Google Gemini API endpoint
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .json(&json!({
                "systemInstruction": {
                    "parts": [{ "text": request.system }]
                },
                "contents": [{
                    "role": "user",
                    "parts": [{ "text": request.prompt }]
                }],
                "generationConfig": {
                    "temperature": request.temperature.unwrap_or(self.temperature),
                    "maxOutputTokens": self.max_tokens,
                    "responseMimeType": "application/json",
                    "responseSchema": gemini_schema(request.schema)
                }
            }))
            .send()
            .await?;

        let response_body = read_response(response, self.provider_name()).await?;
        let content = text_at(
            &response_body,
            "/candidates/0/content/parts/0/text",
            self.provider_name(),
        )?;

        Ok(content.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::test_support::request;
    use mockito::{Matcher, Server};

    #[test]
    fn test_gemini_schema_uppercases_types() {
        let schema = json!({
            "type": "object",
            "properties": {
                "recipes": { "type": "array", "items": { "type": "string" } }
            },
            "required": ["recipes"]
        });
        let converted = gemini_schema(&schema);
        assert_eq!(converted["type"], "OBJECT");
        assert_eq!(converted["properties"]["recipes"]["type"], "ARRAY");
        assert_eq!(converted["properties"]["recipes"]["items"]["type"], "STRING");
        assert_eq!(converted["required"], json!(["recipes"]));
    }

    #[tokio::test]
    async fn test_complete() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/models/gemini-1.5-flash:generateContent")
            .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
            .match_body(Matcher::PartialJson(json!({
                "generationConfig": { "responseMimeType": "application/json" }
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"candidates": [{"content": {"parts": [{"text": "{\"recipes\": [\"Caprese\"]}"}]}}]}"#,
            )
            .create_async()
            .await;

        let provider = GoogleProvider::with_base_url(
            "test-key".to_string(),
            server.url(),
            "gemini-1.5-flash".to_string(),
        );
        let schema = json!({"type": "object"});

        let result = provider.complete(&request(&schema, None)).await.unwrap();
        assert!(result.contains("Caprese"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_blocked_candidate_is_generation_failure() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1beta/models/gemini-1.5-flash:generateContent")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#)
            .create_async()
            .await;

        let provider = GoogleProvider::with_base_url(
            "test-key".to_string(),
            server.url(),
            "gemini-1.5-flash".to_string(),
        );
        let schema = json!({"type": "object"});

        let err = provider.complete(&request(&schema, None)).await.unwrap_err();
        assert!(matches!(err, GenerationError::GenerationFailure(_)));
    }

    #[test]
    fn test_provider_name() {
        let mut config = ProviderConfig::for_model("gemini-1.5-flash");
        config.api_key = Some("test-key".to_string());

        let provider = GoogleProvider::new(&config).unwrap();
        assert_eq!(provider.provider_name(), "google");
    }
}
