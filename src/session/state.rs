//! Session state aggregate and its transitions.
//!
//! Every mutation goes through a method here. Async work is split into a
//! `begin_*` transition that hands out a ticket and a `finish_*` transition
//! that consumes the ticket together with the service result, so the
//! stale-response guard is a plain comparison against current state.

use super::favorites::FavoritesCache;
use super::notice::Notice;
use super::pantry::{DietaryFilters, Pantry};
use crate::error::ChefError;
use crate::model::{DietaryRestriction, Recipe};
use log::{debug, error, info};
use serde::Serialize;

/// Lifecycle of the suggestion list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionPhase {
    Idle,
    Loading,
    Loaded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailStatus {
    /// Placeholder shown while details are generated
    Loading,
    Resolved,
}

/// Recipe currently selected for the detail dialog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedRecipe {
    pub recipe: Recipe,
    pub status: DetailStatus,
}

impl SelectedRecipe {
    pub fn is_resolved(&self) -> bool {
        self.status == DetailStatus::Resolved
    }
}

/// Proof that a suggestion request was admitted, with the inputs to send.
///
/// Stale once a newer request is admitted.
#[derive(Debug)]
pub struct SuggestionTicket {
    pub ingredients: Vec<String>,
    pub restrictions: Vec<String>,
    generation: u64,
}

/// Identifies one detail request; stale once another selection is made
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailTicket {
    pub recipe_name: String,
    generation: u64,
}

/// Result of selecting a recipe
#[derive(Debug, PartialEq, Eq)]
pub enum Selection {
    /// Served from favorites; the dialog already shows the full recipe
    Cached,
    /// Placeholder shown; details must be fetched for this ticket
    Fetch(DetailTicket),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionOutcome {
    /// List replaced with this many suggestions
    Loaded(usize),
    /// Previous list kept; a notice was queued
    Failed,
    /// A newer request was admitted meanwhile; result dropped
    Discarded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailOutcome {
    /// Served from favorites without a request
    Cached,
    /// Placeholder replaced by the generated recipe
    Applied,
    /// The selection changed while the request was in flight; result dropped
    Discarded,
    /// Dialog closed and a notice queued
    Failed,
}

/// Everything the presentation layer needs to render
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub pantry: Vec<String>,
    pub restrictions: Vec<String>,
    pub suggestions: Vec<String>,
    pub favorites: Vec<Recipe>,
    pub selected_recipe: Option<SelectedRecipe>,
    pub selected_is_favorite: bool,
    pub dialog_open: bool,
    pub loading_suggestions: bool,
    pub loading_details: bool,
}

#[derive(Debug, Clone)]
pub struct SessionState {
    pantry: Pantry,
    filters: DietaryFilters,
    suggestions: Vec<String>,
    suggestion_phase: SuggestionPhase,
    // Bumped on every admitted suggestion request
    suggestion_generation: u64,
    favorites: FavoritesCache,
    selected: Option<SelectedRecipe>,
    dialog_open: bool,
    // Bumped on every selection; detail tickets carry the value they saw
    selection_generation: u64,
    notices: Vec<Notice>,
}

impl SessionState {
    pub fn new(pantry: Pantry) -> Self {
        SessionState {
            pantry,
            filters: DietaryFilters::new(),
            suggestions: Vec::new(),
            suggestion_phase: SuggestionPhase::Idle,
            suggestion_generation: 0,
            favorites: FavoritesCache::new(),
            selected: None,
            dialog_open: false,
            selection_generation: 0,
            notices: Vec::new(),
        }
    }

    pub fn with_seed<I, S>(seed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(Pantry::with_seed(seed))
    }

    // Pantry and filters

    pub fn add_ingredient(&mut self, ingredient: &str) -> bool {
        self.pantry.add(ingredient)
    }

    pub fn remove_ingredient(&mut self, ingredient: &str) -> bool {
        self.pantry.remove(ingredient)
    }

    pub fn toggle_restriction(&mut self, restriction: DietaryRestriction) -> bool {
        self.filters.toggle(restriction)
    }

    // Suggestions

    /// Admit a suggestion request.
    ///
    /// A request still pending is superseded: its ticket goes stale and its
    /// result will be discarded. An abandoned request therefore never blocks
    /// the next one.
    ///
    /// # Errors
    /// - `EmptyPantry` if there is nothing to cook with; a blocking notice is queued
    pub fn begin_suggestions(&mut self) -> Result<SuggestionTicket, ChefError> {
        if self.pantry.is_empty() {
            self.notices.push(Notice::empty_pantry());
            return Err(ChefError::EmptyPantry);
        }

        if self.suggestion_phase == SuggestionPhase::Loading {
            debug!("Superseding pending suggestion request");
        }
        self.suggestion_generation += 1;
        self.suggestion_phase = SuggestionPhase::Loading;
        Ok(SuggestionTicket {
            ingredients: self.pantry.as_slice().to_vec(),
            restrictions: self.filters.labels(),
            generation: self.suggestion_generation,
        })
    }

    /// Apply a suggestion result. The list and the loading flag change together.
    pub fn finish_suggestions(
        &mut self,
        ticket: SuggestionTicket,
        result: Result<Vec<String>, ChefError>,
    ) -> SuggestionOutcome {
        if ticket.generation != self.suggestion_generation {
            info!("Discarding suggestions from a superseded request");
            return SuggestionOutcome::Discarded;
        }

        match result {
            Ok(recipes) => {
                let count = recipes.len();
                self.suggestions = recipes;
                self.suggestion_phase = SuggestionPhase::Loaded;
                SuggestionOutcome::Loaded(count)
            }
            Err(e) => {
                error!("Error suggesting recipes: {}", e);
                self.suggestion_phase = SuggestionPhase::Failed;
                self.notices.push(Notice::suggestions_failed());
                SuggestionOutcome::Failed
            }
        }
    }

    // Detail dialog

    /// Select a recipe by name and open the dialog.
    ///
    /// A favorite is shown immediately. Anything else is shown as a
    /// placeholder and must be fetched with the returned ticket.
    pub fn select_recipe(&mut self, recipe_name: &str) -> Selection {
        self.selection_generation += 1;
        self.dialog_open = true;

        if let Some(favorite) = self.favorites.get(recipe_name) {
            debug!("Serving {} from favorites", recipe_name);
            self.selected = Some(SelectedRecipe {
                recipe: favorite.clone(),
                status: DetailStatus::Resolved,
            });
            return Selection::Cached;
        }

        self.selected = Some(SelectedRecipe {
            recipe: Recipe::placeholder(recipe_name),
            status: DetailStatus::Loading,
        });
        Selection::Fetch(DetailTicket {
            recipe_name: recipe_name.to_string(),
            generation: self.selection_generation,
        })
    }

    /// Apply a detail result if its ticket is still current.
    pub fn finish_details(
        &mut self,
        ticket: DetailTicket,
        result: Result<Recipe, ChefError>,
    ) -> DetailOutcome {
        if ticket.generation != self.selection_generation {
            info!(
                "Discarding late details for {}; selection has changed",
                ticket.recipe_name
            );
            return DetailOutcome::Discarded;
        }

        match result {
            Ok(mut recipe) => {
                // Keep the requested name so the cache key matches the suggestion
                if recipe.name != ticket.recipe_name {
                    debug!(
                        "Model renamed {} to {}; keeping requested name",
                        ticket.recipe_name, recipe.name
                    );
                    recipe.name = ticket.recipe_name;
                }
                self.selected = Some(SelectedRecipe {
                    recipe,
                    status: DetailStatus::Resolved,
                });
                DetailOutcome::Applied
            }
            Err(e) => {
                error!("Error getting recipe details: {}", e);
                self.selected = None;
                self.dialog_open = false;
                self.notices.push(Notice::details_failed(&ticket.recipe_name));
                DetailOutcome::Failed
            }
        }
    }

    /// Hide the dialog. The selection stays so a pending result still lands.
    pub fn close_dialog(&mut self) {
        self.dialog_open = false;
    }

    // Favorites

    /// Flip favorite membership for a resolved recipe.
    ///
    /// Placeholders, and recipes whose details are still being generated,
    /// are refused and membership is left as it was.
    pub fn toggle_favorite(&mut self, recipe: &Recipe) -> bool {
        let pending = self
            .selected
            .as_ref()
            .is_some_and(|s| !s.is_resolved() && s.recipe.same_recipe(recipe));
        if pending || recipe.is_placeholder() {
            debug!("Refusing to favorite unresolved recipe {}", recipe.name);
            return self.favorites.contains(&recipe.name);
        }
        self.favorites.toggle(recipe)
    }

    /// Flip favorite membership for the selected recipe.
    ///
    /// Returns `None` while the selection is still a placeholder.
    pub fn toggle_selected_favorite(&mut self) -> Option<bool> {
        let selected = self.selected.as_ref().filter(|s| s.is_resolved())?;
        Some(self.favorites.toggle(&selected.recipe))
    }

    // Notices

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    // Read access

    pub fn pantry(&self) -> &[String] {
        self.pantry.as_slice()
    }

    pub fn restrictions(&self) -> &DietaryFilters {
        &self.filters
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn suggestion_phase(&self) -> SuggestionPhase {
        self.suggestion_phase
    }

    pub fn favorites(&self) -> &FavoritesCache {
        &self.favorites
    }

    pub fn is_favorite(&self, recipe_name: &str) -> bool {
        self.favorites.contains(recipe_name)
    }

    pub fn selected(&self) -> Option<&SelectedRecipe> {
        self.selected.as_ref()
    }

    pub fn is_dialog_open(&self) -> bool {
        self.dialog_open && self.selected.is_some()
    }

    pub fn is_loading_suggestions(&self) -> bool {
        self.suggestion_phase == SuggestionPhase::Loading
    }

    pub fn is_loading_details(&self) -> bool {
        self.selected
            .as_ref()
            .is_some_and(|s| s.status == DetailStatus::Loading)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            pantry: self.pantry.as_slice().to_vec(),
            restrictions: self.filters.labels(),
            suggestions: self.suggestions.clone(),
            favorites: self.favorites.iter().cloned().collect(),
            selected_recipe: self.selected.clone(),
            selected_is_favorite: self
                .selected
                .as_ref()
                .is_some_and(|s| self.favorites.contains(&s.recipe.name)),
            dialog_open: self.is_dialog_open(),
            loading_suggestions: self.is_loading_suggestions(),
            loading_details: self.is_loading_details(),
        }
    }
}
