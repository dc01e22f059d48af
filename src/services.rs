//! The two generation use cases: listing candidate recipes and expanding one.
//!
//! Both services are pure fetch-and-validate units. They hold no session
//! state, never touch the favorites cache and never retry.

use crate::config::GenerationConfig;
use crate::error::ChefError;
use crate::generation::{GenerationClient, SamplingConfig};
use crate::model::Recipe;
use crate::prompt::{build_detail_prompt, build_suggestion_prompt};
use crate::schema::{RecipeSchema, SuggestionSchema};
use async_trait::async_trait;
use log::info;

/// Temperature used for detail expansion unless configured otherwise
pub const DETAIL_TEMPERATURE: f32 = 0.3;

/// Produces recipe names from pantry contents
#[async_trait]
pub trait RecipeSuggester: Send + Sync {
    async fn suggest(
        &self,
        ingredients: &[String],
        restrictions: &[String],
    ) -> Result<Vec<String>, ChefError>;
}

/// Expands a recipe name into a full recipe
#[async_trait]
pub trait RecipeDetailer: Send + Sync {
    async fn get_details(&self, recipe_name: &str) -> Result<Recipe, ChefError>;
}

pub struct SuggestionService {
    client: GenerationClient,
    sampling: SamplingConfig,
}

impl SuggestionService {
    /// Suggestions use the provider's default sampling
    pub fn new(client: GenerationClient) -> Self {
        SuggestionService {
            client,
            sampling: SamplingConfig::default(),
        }
    }

    pub fn with_sampling(client: GenerationClient, sampling: SamplingConfig) -> Self {
        SuggestionService { client, sampling }
    }

    pub fn from_config(client: GenerationClient, config: &GenerationConfig) -> Self {
        Self::with_sampling(
            client,
            SamplingConfig {
                temperature: config.suggestion_temperature,
            },
        )
    }
}

#[async_trait]
impl RecipeSuggester for SuggestionService {
    /// The model's list is returned verbatim: order kept, duplicates kept.
    async fn suggest(
        &self,
        ingredients: &[String],
        restrictions: &[String],
    ) -> Result<Vec<String>, ChefError> {
        let prompt = build_suggestion_prompt(ingredients, restrictions);
        let list = self
            .client
            .generate::<SuggestionSchema>(&prompt, self.sampling)
            .await?;

        info!(
            "Received {} suggestions for {} ingredients",
            list.recipes.len(),
            ingredients.len()
        );
        Ok(list.recipes)
    }
}

pub struct DetailService {
    client: GenerationClient,
    sampling: SamplingConfig,
}

impl DetailService {
    pub fn new(client: GenerationClient) -> Self {
        Self::with_sampling(client, SamplingConfig::with_temperature(DETAIL_TEMPERATURE))
    }

    pub fn with_sampling(client: GenerationClient, sampling: SamplingConfig) -> Self {
        DetailService { client, sampling }
    }

    pub fn from_config(client: GenerationClient, config: &GenerationConfig) -> Self {
        Self::with_sampling(
            client,
            SamplingConfig::with_temperature(config.detail_temperature),
        )
    }
}

#[async_trait]
impl RecipeDetailer for DetailService {
    async fn get_details(&self, recipe_name: &str) -> Result<Recipe, ChefError> {
        if recipe_name.trim().is_empty() {
            return Err(ChefError::EmptyRecipeName);
        }

        let prompt = build_detail_prompt(recipe_name);
        let recipe = self
            .client
            .generate::<RecipeSchema>(&prompt, self.sampling)
            .await?;

        info!("Generated details for {}", recipe_name);
        Ok(recipe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenerationError;
    use crate::providers::{CompletionRequest, LlmProvider};
    use std::sync::{Arc, Mutex};

    struct ScriptedProvider {
        reply: String,
        prompts: Arc<Mutex<Vec<(String, Option<f32>)>>>,
    }

    #[async_trait]
    impl LlmProvider for ScriptedProvider {
        fn provider_name(&self) -> &str {
            "scripted"
        }

        fn model(&self) -> &str {
            "scripted-1"
        }

        async fn complete(
            &self,
            request: &CompletionRequest<'_>,
        ) -> Result<String, GenerationError> {
            self.prompts
                .lock()
                .unwrap()
                .push((request.prompt.to_string(), request.temperature));
            Ok(self.reply.clone())
        }
    }

    fn scripted(reply: &str) -> (GenerationClient, Arc<Mutex<Vec<(String, Option<f32>)>>>) {
        let prompts = Arc::new(Mutex::new(Vec::new()));
        let provider = ScriptedProvider {
            reply: reply.to_string(),
            prompts: prompts.clone(),
        };
        (GenerationClient::new(Box::new(provider)), prompts)
    }

    #[tokio::test]
    async fn test_suggest_returns_model_order() {
        let (client, prompts) = scripted(r#"{"recipes": ["Omelette", "Frittata"]}"#);
        let service = SuggestionService::new(client);

        let names = service
            .suggest(&["Egg".to_string()], &["Vegetarian".to_string()])
            .await
            .unwrap();
        assert_eq!(names, vec!["Omelette", "Frittata"]);

        let prompts = prompts.lock().unwrap();
        assert!(prompts[0].0.contains("Ingredients: Egg"));
        assert!(prompts[0].0.contains("Dietary Restrictions: Vegetarian"));
        assert_eq!(prompts[0].1, None);
    }

    #[tokio::test]
    async fn test_details_use_low_temperature() {
        let (client, prompts) = scripted(
            r#"{
                "name": "Omelette",
                "description": "Fluffy and quick.",
                "prepTime": "5 minutes",
                "cookTime": "5 minutes",
                "servings": "1 serving",
                "ingredients": ["2 eggs", "knob of butter"],
                "instructions": ["Whisk eggs.", "Cook in butter."]
            }"#,
        );
        let service = DetailService::new(client);

        let recipe = service.get_details("Omelette").await.unwrap();
        assert_eq!(recipe.name, "Omelette");
        assert_eq!(recipe.ingredients, vec!["2 eggs", "knob of butter"]);

        let prompts = prompts.lock().unwrap();
        assert!(prompts[0].0.contains("\"Omelette\""));
        assert_eq!(prompts[0].1, Some(DETAIL_TEMPERATURE));
    }

    #[tokio::test]
    async fn test_details_schema_violation_surfaces() {
        let (client, _) = scripted(r#"{"name": "Omelette"}"#);
        let service = DetailService::new(client);

        let err = service.get_details("Omelette").await.unwrap_err();
        assert!(err.is_schema_violation());
    }

    #[tokio::test]
    async fn test_blank_name_is_rejected_without_a_call() {
        let (client, prompts) = scripted("{}");
        let service = DetailService::new(client);

        let err = service.get_details("  ").await.unwrap_err();
        assert!(matches!(err, ChefError::EmptyRecipeName));
        assert!(prompts.lock().unwrap().is_empty());
    }

    #[test]
    fn test_from_config_uses_stage_temperatures() {
        let (client, _) = scripted("{}");
        let config = GenerationConfig {
            suggestion_temperature: Some(0.9),
            detail_temperature: 0.1,
        };

        let suggestions = SuggestionService::from_config(client.clone(), &config);
        let details = DetailService::from_config(client, &config);
        assert_eq!(suggestions.sampling.temperature, Some(0.9));
        assert_eq!(details.sampling.temperature, Some(0.1));
    }
}
