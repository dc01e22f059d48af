use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A fully expanded recipe as returned by the detail stage.
///
/// Identity is the `name` field alone: favorites and cache lookups treat two
/// recipes with the same name as the same recipe.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub name: String,
    pub description: String,
    pub prep_time: String,
    pub cook_time: String,
    pub servings: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
}

impl Recipe {
    /// Recipe shown while details are still being generated: name only.
    pub fn placeholder(name: impl Into<String>) -> Self {
        Recipe {
            name: name.into(),
            ..Default::default()
        }
    }

    /// True when two recipes share an identity key.
    pub fn same_recipe(&self, other: &Recipe) -> bool {
        self.name == other.name
    }

    /// True when nothing but the name is filled in
    pub fn is_placeholder(&self) -> bool {
        self.description.is_empty()
            && self.prep_time.is_empty()
            && self.cook_time.is_empty()
            && self.servings.is_empty()
            && self.ingredients.is_empty()
            && self.instructions.is_empty()
    }
}

/// Raw output of the suggestion stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuggestionList {
    pub recipes: Vec<String>,
}

/// Dietary filters offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DietaryRestriction {
    Vegetarian,
    #[serde(rename = "Gluten-Free")]
    GlutenFree,
    Vegan,
}

impl DietaryRestriction {
    pub const ALL: [DietaryRestriction; 3] = [
        DietaryRestriction::Vegetarian,
        DietaryRestriction::GlutenFree,
        DietaryRestriction::Vegan,
    ];

    /// Human-readable label, also used verbatim in prompts
    pub fn label(&self) -> &'static str {
        match self {
            DietaryRestriction::Vegetarian => "Vegetarian",
            DietaryRestriction::GlutenFree => "Gluten-Free",
            DietaryRestriction::Vegan => "Vegan",
        }
    }
}

impl fmt::Display for DietaryRestriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DietaryRestriction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        DietaryRestriction::ALL
            .into_iter()
            .find(|r| {
                r.label().eq_ignore_ascii_case(wanted)
                    || r.label().replace('-', "").eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| format!("Unknown dietary restriction: {}", wanted))
    }
}
