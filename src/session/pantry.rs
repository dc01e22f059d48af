use crate::model::DietaryRestriction;

/// Ingredients the user has on hand.
///
/// Insertion-ordered; entries are unique by exact, case-sensitive match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pantry {
    ingredients: Vec<String>,
}

impl Pantry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pantry from seed entries, dropping blanks and repeats
    pub fn with_seed<I, S>(seed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut pantry = Self::new();
        for item in seed {
            pantry.add(item.as_ref());
        }
        pantry
    }

    /// Add a trimmed ingredient. Returns false for blanks and duplicates.
    pub fn add(&mut self, ingredient: &str) -> bool {
        let ingredient = ingredient.trim();
        if ingredient.is_empty() || self.contains(ingredient) {
            return false;
        }
        self.ingredients.push(ingredient.to_string());
        true
    }

    /// Remove an ingredient. Returns false if it was not present.
    pub fn remove(&mut self, ingredient: &str) -> bool {
        let before = self.ingredients.len();
        self.ingredients.retain(|i| i != ingredient);
        self.ingredients.len() != before
    }

    pub fn contains(&self, ingredient: &str) -> bool {
        self.ingredients.iter().any(|i| i == ingredient)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.ingredients
    }

    pub fn len(&self) -> usize {
        self.ingredients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }
}

/// Active dietary restrictions, in the order they were switched on
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DietaryFilters {
    active: Vec<DietaryRestriction>,
}

impl DietaryFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership. Returns true if the restriction is now active.
    pub fn toggle(&mut self, restriction: DietaryRestriction) -> bool {
        if self.contains(restriction) {
            self.active.retain(|r| *r != restriction);
            false
        } else {
            self.active.push(restriction);
            true
        }
    }

    pub fn contains(&self, restriction: DietaryRestriction) -> bool {
        self.active.contains(&restriction)
    }

    pub fn active(&self) -> &[DietaryRestriction] {
        &self.active
    }

    /// Labels as rendered into prompts
    pub fn labels(&self) -> Vec<String> {
        self.active.iter().map(|r| r.label().to_string()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_duplicate_add_leaves_pantry_unchanged() {
        let mut pantry = Pantry::with_seed(["Tomatoes", "Basil"]);
        assert!(!pantry.add("Basil"));
        assert_eq!(pantry.as_slice(), ["Tomatoes", "Basil"]);

        // Exact match only: a different case is a different ingredient
        assert!(pantry.add("basil"));
        assert_eq!(pantry.len(), 3);
    }

    #[test]
    fn test_add_trims_and_rejects_blank() {
        let mut pantry = Pantry::new();
        assert!(pantry.add("  Garlic "));
        assert!(!pantry.add("Garlic"));
        assert!(!pantry.add("   "));
        assert_eq!(pantry.as_slice(), ["Garlic"]);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut pantry = Pantry::with_seed(["Tomatoes", "Basil"]);
        assert!(!pantry.remove("Saffron"));
        assert_eq!(pantry.as_slice(), ["Tomatoes", "Basil"]);

        assert!(pantry.remove("Tomatoes"));
        assert_eq!(pantry.as_slice(), ["Basil"]);
    }

    #[test]
    fn test_seed_drops_repeats() {
        let pantry = Pantry::with_seed(vec!["Egg".to_string(), "Egg".to_string(), " ".to_string()]);
        assert_eq!(pantry.as_slice(), ["Egg"]);
    }

    #[test]
    fn test_toggle_twice_restores_membership() {
        let mut filters = DietaryFilters::new();
        filters.toggle(DietaryRestriction::GlutenFree);
        let before: HashSet<_> = filters.active().iter().copied().collect();

        assert!(filters.toggle(DietaryRestriction::Vegan));
        assert!(!filters.toggle(DietaryRestriction::Vegan));

        let after: HashSet<_> = filters.active().iter().copied().collect();
        assert_eq!(before, after);
        assert_eq!(filters.labels(), vec!["Gluten-Free"]);
    }
}
