use crate::config::{ChefConfig, ProviderConfig};
use crate::error::ChefError;
use crate::providers::{
    AnthropicProvider, AzureOpenAIProvider, GoogleProvider, LlmProvider, OllamaProvider,
    OpenAIProvider,
};
use std::str::FromStr;

/// Model backends a session can be wired to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAI,
    Anthropic,
    AzureOpenAI,
    Google,
    Ollama,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 5] = [
        ProviderKind::OpenAI,
        ProviderKind::Anthropic,
        ProviderKind::AzureOpenAI,
        ProviderKind::Google,
        ProviderKind::Ollama,
    ];

    /// Key used in the `[providers]` configuration table
    pub fn name(&self) -> &'static str {
        match self {
            ProviderKind::OpenAI => "openai",
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::AzureOpenAI => "azure_openai",
            ProviderKind::Google => "google",
            ProviderKind::Ollama => "ollama",
        }
    }

    fn build(&self, config: &ProviderConfig) -> Result<Box<dyn LlmProvider>, ChefError> {
        Ok(match self {
            ProviderKind::OpenAI => Box::new(OpenAIProvider::new(config)?),
            ProviderKind::Anthropic => Box::new(AnthropicProvider::new(config)?),
            ProviderKind::AzureOpenAI => Box::new(AzureOpenAIProvider::new(config)?),
            ProviderKind::Google => Box::new(GoogleProvider::new(config)?),
            ProviderKind::Ollama => Box::new(OllamaProvider::new(config)?),
        })
    }
}

impl FromStr for ProviderKind {
    type Err = ChefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProviderKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ChefError::Provider(format!("Unknown provider: {}", s)))
    }
}

/// Builds the provider both generation stages talk to
pub struct ProviderFactory;

impl ProviderFactory {
    /// Build the named provider, refusing ones disabled in configuration
    pub fn create(
        provider_name: &str,
        config: &ProviderConfig,
    ) -> Result<Box<dyn LlmProvider>, ChefError> {
        let kind: ProviderKind = provider_name.parse()?;
        if !config.enabled {
            return Err(ChefError::Provider(format!(
                "Provider '{}' is not enabled in configuration",
                kind.name()
            )));
        }
        kind.build(config)
    }

    /// Build the provider named by `default_provider`
    pub fn get_default_provider(config: &ChefConfig) -> Result<Box<dyn LlmProvider>, ChefError> {
        let provider_config = config.default_provider_config().ok_or_else(|| {
            ChefError::Provider(format!(
                "Default provider '{}' not found in configuration",
                config.default_provider
            ))
        })?;

        Self::create(&config.default_provider, provider_config)
    }

    pub fn available_providers() -> Vec<&'static str> {
        ProviderKind::ALL.iter().map(ProviderKind::name).collect()
    }
}
