use crate::error::GenerationError;
use crate::prompt::build_system_prompt;
use crate::providers::{CompletionRequest, LlmProvider};
use crate::schema::OutputSchema;
use log::{debug, warn};
use std::sync::Arc;
use std::time::Instant;

/// Sampling knobs for one request
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SamplingConfig {
    /// `None` leaves the provider's configured temperature in place
    pub temperature: Option<f32>,
}

impl SamplingConfig {
    pub fn with_temperature(temperature: f32) -> Self {
        SamplingConfig {
            temperature: Some(temperature),
        }
    }
}

/// Runs one schema-constrained exchange with a model and validates the reply.
///
/// There is no retry and no timeout here: each call is a single attempt and
/// the outcome is handed back unchanged.
#[derive(Clone)]
pub struct GenerationClient {
    provider: Arc<dyn LlmProvider>,
}

impl GenerationClient {
    pub fn new(provider: Box<dyn LlmProvider>) -> Self {
        GenerationClient {
            provider: Arc::from(provider),
        }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }

    pub fn model(&self) -> &str {
        self.provider.model()
    }

    /// Send `prompt` and decode the reply according to `S`.
    ///
    /// # Errors
    /// - `GenerationFailure` when the provider is unreachable or answers
    ///   without content
    /// - `SchemaViolation` when the content does not satisfy `S`
    pub async fn generate<S: OutputSchema>(
        &self,
        prompt: &str,
        sampling: SamplingConfig,
    ) -> Result<S::Output, GenerationError> {
        let schema = S::json_schema();
        let system = build_system_prompt(&schema);
        let request = CompletionRequest {
            system: &system,
            prompt,
            schema_name: S::NAME,
            schema: &schema,
            temperature: sampling.temperature,
        };

        debug!(
            "Requesting {} from {}/{} (temperature: {:?})",
            S::NAME,
            self.provider.provider_name(),
            self.provider.model(),
            sampling.temperature
        );
        let start = Instant::now();
        let text = self.provider.complete(&request).await?;
        debug!(
            "{} answered in {} ms",
            self.provider.provider_name(),
            start.elapsed().as_millis()
        );

        S::parse(&text).inspect_err(|e| {
            warn!("Rejected {} output from {}: {}", S::NAME, self.provider.model(), e);
        })
    }
}
