use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ChefConfig {
    /// Provider used for both generation stages
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// Map of provider name to provider configuration
    #[serde(default = "default_providers")]
    pub providers: HashMap<String, ProviderConfig>,
    /// Sampling settings per generation stage
    #[serde(default)]
    pub generation: GenerationConfig,
    /// Initial pantry contents
    #[serde(default)]
    pub pantry: PantryConfig,
}

/// Configuration for a specific AI provider
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Whether this provider is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Model identifier (e.g., "gpt-4o-mini", "gemini-1.5-flash")
    pub model: String,
    /// Provider-side default temperature (0.0-1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    // Optional provider-specific fields
    /// API key for authentication (can also be set via environment variable)
    pub api_key: Option<String>,
    /// Base URL for API endpoint (for custom or proxy endpoints)
    pub base_url: Option<String>,
    /// Resource endpoint (Azure OpenAI specific)
    pub endpoint: Option<String>,
    /// Deployment name (Azure OpenAI specific)
    pub deployment_name: Option<String>,
    /// API version (Azure OpenAI specific)
    pub api_version: Option<String>,
}

impl ProviderConfig {
    /// Minimal enabled configuration for `model`
    pub fn for_model(model: impl Into<String>) -> Self {
        ProviderConfig {
            enabled: true,
            model: model.into(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            api_key: None,
            base_url: None,
            endpoint: None,
            deployment_name: None,
            api_version: None,
        }
    }
}

/// Sampling settings for the two generation stages
#[derive(Debug, Deserialize, Clone)]
pub struct GenerationConfig {
    /// Temperature override for suggestions; `None` keeps the provider default
    #[serde(default)]
    pub suggestion_temperature: Option<f32>,
    /// Temperature for detail expansion, kept low to reduce structural drift
    #[serde(default = "default_detail_temperature")]
    pub detail_temperature: f32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            suggestion_temperature: None,
            detail_temperature: default_detail_temperature(),
        }
    }
}

/// Pantry seeded at session start
#[derive(Debug, Deserialize, Clone)]
pub struct PantryConfig {
    #[serde(default = "default_seed")]
    pub seed: Vec<String>,
}

impl Default for PantryConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
        }
    }
}

impl Default for ChefConfig {
    fn default() -> Self {
        Self {
            default_provider: default_provider(),
            providers: default_providers(),
            generation: GenerationConfig::default(),
            pantry: PantryConfig::default(),
        }
    }
}

// Default value functions
fn default_provider() -> String {
    "google".to_string()
}

fn default_providers() -> HashMap<String, ProviderConfig> {
    let mut providers = HashMap::new();
    providers.insert(
        "google".to_string(),
        ProviderConfig::for_model("gemini-1.5-flash"),
    );
    providers
}

fn default_enabled() -> bool {
    true
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_detail_temperature() -> f32 {
    0.3
}

fn default_seed() -> Vec<String> {
    ["Tomatoes", "Basil", "Garlic", "Olive Oil"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl ChefConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with PANTRY_CHEF__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: PANTRY_CHEF__PROVIDERS__OPENAI__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    /// Configuration of the default provider, if present
    pub fn default_provider_config(&self) -> Option<&ProviderConfig> {
        self.providers.get(&self.default_provider)
    }
}

/// Load configuration from file and environment variables
///
/// See [`ChefConfig::load`] for precedence rules.
pub fn load_config() -> Result<ChefConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Use double underscore for nested: PANTRY_CHEF__GENERATION__DETAIL_TEMPERATURE
        .add_source(
            Environment::with_prefix("PANTRY_CHEF")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
