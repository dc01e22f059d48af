use crate::model::Recipe;
use std::collections::HashMap;

/// Fully expanded recipes the user has favorited, keyed by recipe name.
///
/// Doubles as the detail cache: a recipe found here is never generated again
/// during the session. Two recipes sharing a name occupy the same slot.
#[derive(Debug, Clone, Default)]
pub struct FavoritesCache {
    order: Vec<String>,
    recipes: HashMap<String, Recipe>,
}

impl FavoritesCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Recipe> {
        self.recipes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.recipes.contains_key(name)
    }

    /// Add the recipe if its name is absent, remove it otherwise.
    /// Returns true if the recipe is a favorite afterwards.
    pub fn toggle(&mut self, recipe: &Recipe) -> bool {
        if self.recipes.remove(&recipe.name).is_some() {
            self.order.retain(|name| name != &recipe.name);
            false
        } else {
            self.order.push(recipe.name.clone());
            self.recipes.insert(recipe.name.clone(), recipe.clone());
            true
        }
    }

    /// Favorites in the order they were added
    pub fn iter(&self) -> impl Iterator<Item = &Recipe> {
        self.order.iter().filter_map(|name| self.recipes.get(name))
    }

    pub fn names(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
