//! Pantry-driven recipe generation.
//!
//! The user keeps a pantry and a set of dietary filters, asks a language model
//! for recipe names, and expands a chosen name into a structured [`Recipe`].
//! Expanded recipes can be favorited; favorites are never generated twice.
//!
//! ```no_run
//! # use pantry_chef::{create_session, ChefConfig};
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ChefConfig::load()?;
//! let mut session = create_session(&config)?;
//! session.generate_suggestions().await?;
//! if let Some(name) = session.state().suggestions().first().cloned() {
//!     session.select_recipe(&name).await;
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod generation;
pub mod model;
pub mod prompt;
pub mod providers;
pub mod schema;
pub mod services;
pub mod session;

pub use config::ChefConfig;
pub use error::{ChefError, GenerationError};
pub use generation::{GenerationClient, SamplingConfig};
pub use model::{DietaryRestriction, Recipe, SuggestionList};
pub use providers::{LlmProvider, ProviderFactory};
pub use services::{DetailService, RecipeDetailer, RecipeSuggester, SuggestionService};
pub use session::{DetailOutcome, Notice, Session, SessionState, SuggestionOutcome};

/// Build a seeded session using the configured default provider
pub fn create_session(config: &ChefConfig) -> Result<Session, ChefError> {
    let provider = ProviderFactory::get_default_provider(config)?;
    Ok(Session::from_config(config, GenerationClient::new(provider)))
}
