use thiserror::Error;

/// Errors produced by a single exchange with the language model
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    /// The model could not be reached, or answered without usable content
    #[error("Generation failed: {0}")]
    GenerationFailure(String),

    /// The model answered, but the payload does not match the expected shape
    #[error("Schema violation: {0}")]
    SchemaViolation(String),
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        GenerationError::GenerationFailure(err.to_string())
    }
}

/// Errors surfaced by the session and its services
#[derive(Error, Debug)]
pub enum ChefError {
    /// Suggestions were requested with nothing in the pantry
    #[error("The pantry is empty")]
    EmptyPantry,

    /// Details were requested for a blank recipe name
    #[error("Recipe name cannot be empty")]
    EmptyRecipeName,

    /// Model invocation or response validation failed
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// Provider could not be constructed from configuration
    #[error("Provider error: {0}")]
    Provider(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl ChefError {
    pub fn is_schema_violation(&self) -> bool {
        matches!(
            self,
            ChefError::Generation(GenerationError::SchemaViolation(_))
        )
    }

    pub fn is_generation_failure(&self) -> bool {
        matches!(
            self,
            ChefError::Generation(GenerationError::GenerationFailure(_))
        )
    }
}
