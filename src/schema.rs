//! Structural contracts for model output.
//!
//! Each contract lists its required fields and their shapes. The same list
//! drives both the JSON Schema handed to providers and the checks run on the
//! reply, so a reply that passes validation always deserializes.

use crate::error::GenerationError;
use crate::model::{Recipe, SuggestionList};
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};

/// Shape of a single required field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A single string
    Text,
    /// An ordered sequence of strings
    TextList,
}

impl FieldKind {
    fn matches(&self, value: &Value) -> bool {
        match self {
            FieldKind::Text => value.is_string(),
            FieldKind::TextList => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            FieldKind::Text => "a string",
            FieldKind::TextList => "an array of strings",
        }
    }

    fn json_schema(&self) -> Value {
        match self {
            FieldKind::Text => json!({ "type": "string" }),
            FieldKind::TextList => json!({ "type": "array", "items": { "type": "string" } }),
        }
    }
}

/// A structured-output contract the model reply must satisfy
pub trait OutputSchema {
    type Output: DeserializeOwned;

    /// Short identifier, used as the schema name for providers that need one
    const NAME: &'static str;

    /// Required fields, all of which must be present with the given shape
    const FIELDS: &'static [(&'static str, FieldKind)];

    /// JSON Schema document describing the expected object
    fn json_schema() -> Value {
        let mut properties = Map::new();
        for (name, kind) in Self::FIELDS {
            properties.insert((*name).to_string(), kind.json_schema());
        }
        let required: Vec<&str> = Self::FIELDS.iter().map(|(name, _)| *name).collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// Check a decoded JSON value against the contract and convert it
    fn validate(value: Value) -> Result<Self::Output, GenerationError> {
        let object = value.as_object().ok_or_else(|| {
            GenerationError::SchemaViolation(format!(
                "{} output must be a JSON object",
                Self::NAME
            ))
        })?;

        for (name, kind) in Self::FIELDS {
            match object.get(*name) {
                None => {
                    return Err(GenerationError::SchemaViolation(format!(
                        "missing required field `{}`",
                        name
                    )))
                }
                Some(field) if !kind.matches(field) => {
                    return Err(GenerationError::SchemaViolation(format!(
                        "field `{}` must be {}",
                        name,
                        kind.describe()
                    )))
                }
                Some(_) => {}
            }
        }

        serde_json::from_value(value)
            .map_err(|e| GenerationError::SchemaViolation(e.to_string()))
    }

    /// Parse raw model text and validate it
    fn parse(text: &str) -> Result<Self::Output, GenerationError> {
        Self::validate(extract_json(text)?)
    }
}

/// Suggestion stage: `{ "recipes": [string] }`
pub struct SuggestionSchema;

impl OutputSchema for SuggestionSchema {
    type Output = SuggestionList;

    const NAME: &'static str = "recipe_suggestions";

    const FIELDS: &'static [(&'static str, FieldKind)] = &[("recipes", FieldKind::TextList)];
}

/// Detail stage: the seven recipe fields
pub struct RecipeSchema;

impl OutputSchema for RecipeSchema {
    type Output = Recipe;

    const NAME: &'static str = "recipe";

    const FIELDS: &'static [(&'static str, FieldKind)] = &[
        ("name", FieldKind::Text),
        ("description", FieldKind::Text),
        ("prepTime", FieldKind::Text),
        ("cookTime", FieldKind::Text),
        ("servings", FieldKind::Text),
        ("ingredients", FieldKind::TextList),
        ("instructions", FieldKind::TextList),
    ];
}

/// Decode the JSON payload of a model reply.
///
/// Models occasionally wrap the object in a Markdown code fence even when told
/// not to; the fence is stripped before decoding.
pub fn extract_json(text: &str) -> Result<Value, GenerationError> {
    let trimmed = text.trim();
    let body = strip_code_fence(trimmed).unwrap_or(trimmed);

    serde_json::from_str(body).map_err(|e| {
        GenerationError::SchemaViolation(format!("response is not valid JSON: {}", e))
    })
}

fn strip_code_fence(text: &str) -> Option<&str> {
    let rest = text.strip_prefix("```")?;
    let rest = rest.strip_suffix("```")?;
    // Drop the optional language tag, with or without a line break after it
    let body = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    Some(body.trim())
}
