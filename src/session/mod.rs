//! Session coordinator.
//!
//! [`Session`] owns the [`SessionState`] and the two services. Requests are
//! handed out as detached `Pending*` values that own everything they need, so
//! a front end can await them while continuing to mutate the session; the
//! result is then fed back through `apply_*`, where stale detail results are
//! dropped.

mod favorites;
mod notice;
mod pantry;
mod state;

pub use favorites::FavoritesCache;
pub use notice::{Notice, NoticeKind};
pub use pantry::{DietaryFilters, Pantry};
pub use state::{
    DetailOutcome, DetailStatus, DetailTicket, SelectedRecipe, Selection, SessionSnapshot,
    SessionState, SuggestionOutcome, SuggestionPhase, SuggestionTicket,
};

use crate::config::ChefConfig;
use crate::error::ChefError;
use crate::generation::GenerationClient;
use crate::model::Recipe;
use crate::services::{DetailService, RecipeDetailer, RecipeSuggester, SuggestionService};
use std::sync::Arc;

pub struct Session {
    state: SessionState,
    suggester: Arc<dyn RecipeSuggester>,
    detailer: Arc<dyn RecipeDetailer>,
}

/// An admitted suggestion request, not yet sent
pub struct PendingSuggestions {
    ticket: SuggestionTicket,
    suggester: Arc<dyn RecipeSuggester>,
}

impl PendingSuggestions {
    pub async fn resolve(self) -> CompletedSuggestions {
        let result = self
            .suggester
            .suggest(&self.ticket.ingredients, &self.ticket.restrictions)
            .await;
        CompletedSuggestions {
            ticket: self.ticket,
            result,
        }
    }
}

pub struct CompletedSuggestions {
    ticket: SuggestionTicket,
    result: Result<Vec<String>, ChefError>,
}

/// A detail request for a placeholder currently shown, not yet sent
pub struct PendingDetails {
    ticket: DetailTicket,
    detailer: Arc<dyn RecipeDetailer>,
}

impl PendingDetails {
    pub fn recipe_name(&self) -> &str {
        &self.ticket.recipe_name
    }

    pub async fn resolve(self) -> CompletedDetails {
        let result = self.detailer.get_details(&self.ticket.recipe_name).await;
        CompletedDetails {
            ticket: self.ticket,
            result,
        }
    }
}

pub struct CompletedDetails {
    ticket: DetailTicket,
    result: Result<Recipe, ChefError>,
}

impl Session {
    pub fn new(
        state: SessionState,
        suggester: Arc<dyn RecipeSuggester>,
        detailer: Arc<dyn RecipeDetailer>,
    ) -> Self {
        Session {
            state,
            suggester,
            detailer,
        }
    }

    /// Seeded session backed by `client` for both stages
    pub fn from_config(config: &ChefConfig, client: GenerationClient) -> Self {
        let suggester = SuggestionService::from_config(client.clone(), &config.generation);
        let detailer = DetailService::from_config(client, &config.generation);
        Self::new(
            SessionState::with_seed(&config.pantry.seed),
            Arc::new(suggester),
            Arc::new(detailer),
        )
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Direct access for synchronous intents (pantry, filters, favorites, dialog)
    pub fn state_mut(&mut self) -> &mut SessionState {
        &mut self.state
    }

    /// Admit a suggestion request and return it unsent.
    pub fn request_suggestions(&mut self) -> Result<PendingSuggestions, ChefError> {
        let ticket = self.state.begin_suggestions()?;
        Ok(PendingSuggestions {
            ticket,
            suggester: self.suggester.clone(),
        })
    }

    pub fn apply_suggestions(&mut self, completed: CompletedSuggestions) -> SuggestionOutcome {
        self.state
            .finish_suggestions(completed.ticket, completed.result)
    }

    /// Request suggestions and apply the result.
    ///
    /// Generation errors do not surface here: they become a notice and a
    /// `Failed` outcome. Only requests refused up front return `Err`.
    pub async fn generate_suggestions(&mut self) -> Result<SuggestionOutcome, ChefError> {
        let pending = self.request_suggestions()?;
        let completed = pending.resolve().await;
        Ok(self.apply_suggestions(completed))
    }

    /// Select a recipe. Returns `None` when it was served from favorites.
    pub fn open_recipe(&mut self, recipe_name: &str) -> Option<PendingDetails> {
        match self.state.select_recipe(recipe_name) {
            Selection::Cached => None,
            Selection::Fetch(ticket) => Some(PendingDetails {
                ticket,
                detailer: self.detailer.clone(),
            }),
        }
    }

    pub fn apply_details(&mut self, completed: CompletedDetails) -> DetailOutcome {
        self.state.finish_details(completed.ticket, completed.result)
    }

    /// Select a recipe and, unless it is a favorite, fetch and apply its details.
    pub async fn select_recipe(&mut self, recipe_name: &str) -> DetailOutcome {
        match self.open_recipe(recipe_name) {
            None => DetailOutcome::Cached,
            Some(pending) => {
                let completed = pending.resolve().await;
                self.apply_details(completed)
            }
        }
    }
}
