use serde_json::Value;

/// System prompt shared by both generation stages.
///
/// Loaded from `prompt.txt` at compile time; the expected JSON Schema is
/// appended per request by [`build_system_prompt`].
pub const STRUCTURED_OUTPUT_PROMPT: &str = include_str!("prompt.txt");

/// Build the system prompt for a request expecting `schema`.
pub fn build_system_prompt(schema: &Value) -> String {
    format!("{}\n{}", STRUCTURED_OUTPUT_PROMPT.trim_end(), schema)
}

/// Instruction for the suggestion stage.
///
/// The dietary restrictions line is only rendered when at least one
/// restriction is active.
pub fn build_suggestion_prompt(ingredients: &[String], restrictions: &[String]) -> String {
    let mut prompt = String::from("Suggest recipes based on the following ingredients:\n\n");
    prompt.push_str(&format!("Ingredients: {}\n\n", ingredients.join(", ")));

    if !restrictions.is_empty() {
        prompt.push_str(&format!(
            "Dietary Restrictions: {}\n\n",
            restrictions.join(", ")
        ));
    }

    prompt.push_str(
        "Please provide a list of recipe names that can be made with these ingredients, \
         considering any dietary restrictions.",
    );
    prompt
}

/// Instruction for the detail stage.
pub fn build_detail_prompt(recipe_name: &str) -> String {
    format!(
        "Generate a detailed but straightforward recipe for \"{}\". \
         Ensure the description is engaging. Follow the specified format exactly.",
        recipe_name
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_prompt_is_embedded() {
        assert!(!STRUCTURED_OUTPUT_PROMPT.is_empty());
        assert!(STRUCTURED_OUTPUT_PROMPT.contains("JSON"));
        assert!(STRUCTURED_OUTPUT_PROMPT.contains("required"));
    }

    #[test]
    fn test_system_prompt_appends_schema() {
        let prompt = build_system_prompt(&json!({"required": ["recipes"]}));
        assert!(prompt.starts_with(STRUCTURED_OUTPUT_PROMPT.trim_end()));
        assert!(prompt.ends_with(r#"{"required":["recipes"]}"#));
    }

    #[test]
    fn test_empty_inputs_have_no_restrictions_clause() {
        let prompt = build_suggestion_prompt(&[], &[]);
        assert!(prompt.contains("Ingredients: \n"));
        assert!(!prompt.contains("Dietary Restrictions:"));
    }

    #[test]
    fn test_empty_restrictions_have_no_restrictions_clause() {
        let prompt = build_suggestion_prompt(&strings(&["Egg", "Cheese"]), &[]);
        assert!(prompt.contains("Ingredients: Egg, Cheese"));
        assert!(!prompt.contains("Dietary Restrictions:"));
    }

    #[test]
    fn test_restrictions_clause_rendered_when_present() {
        let prompt = build_suggestion_prompt(&strings(&["Egg"]), &strings(&["Vegan"]));
        assert!(prompt.contains("Ingredients: Egg"));
        assert!(prompt.contains("Dietary Restrictions: Vegan"));

        let prompt = build_suggestion_prompt(
            &strings(&["Rice"]),
            &strings(&["Vegan", "Gluten-Free"]),
        );
        assert!(prompt.contains("Dietary Restrictions: Vegan, Gluten-Free"));
    }

    #[test]
    fn test_detail_prompt_quotes_name() {
        let prompt = build_detail_prompt("Caprese Salad");
        assert!(prompt.contains("\"Caprese Salad\""));
        assert!(prompt.contains("Follow the specified format exactly."));
    }
}
