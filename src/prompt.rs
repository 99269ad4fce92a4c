/// The instruction prompt sent to the recipe model.
///
/// The template is loaded from `prompt.txt` at compile time using the
/// `include_str!` macro, making it easy to edit without dealing with
/// Rust string syntax.
///
/// Contains `{{QUERY}}` placeholders that are replaced with the user's
/// message by [`build_prompt`]. The labels it asks for (`recipeName:`,
/// `ingredients:`, `instructions:`, `totalCalories:`, `botMessage:`) are
/// the ones the normalizer recognizes.
pub const RECIPE_PROMPT_TEMPLATE: &str = include_str!("prompt.txt");

/// Marker on the last line of the prompt; the model's answer follows it.
pub const RESPONSE_MARKER: &str = "Response:";

const QUERY_PLACEHOLDER: &str = "{{QUERY}}";

/// Injects the user query into the prompt template.
pub fn build_prompt(user_query: &str) -> String {
    RECIPE_PROMPT_TEMPLATE.replace(QUERY_PLACEHOLDER, user_query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_is_embedded() {
        assert!(!RECIPE_PROMPT_TEMPLATE.is_empty());
        assert!(RECIPE_PROMPT_TEMPLATE.contains(QUERY_PLACEHOLDER));
    }

    #[test]
    fn test_prompt_contains_every_label() {
        for label in [
            "recipeName:",
            "ingredients:",
            "instructions:",
            "totalCalories:",
            "botMessage:",
        ] {
            assert!(RECIPE_PROMPT_TEMPLATE.contains(label), "missing {label}");
        }
    }

    #[test]
    fn test_prompt_contains_example_and_fallback_instruction() {
        assert!(RECIPE_PROMPT_TEMPLATE.contains("recipeName: Quick Chicken Stir-fry"));
        assert!(RECIPE_PROMPT_TEMPLATE.contains("totalCalories: 450"));
        assert!(RECIPE_PROMPT_TEMPLATE.contains("set the 'botMessage' field"));
    }

    #[test]
    fn test_build_prompt_injects_query() {
        let prompt = build_prompt("vegan pasta under 500 calories");
        assert!(!prompt.contains(QUERY_PLACEHOLDER));
        assert_eq!(prompt.matches("vegan pasta under 500 calories").count(), 2);
        assert!(prompt.trim_end().ends_with(RESPONSE_MARKER));
    }

    #[test]
    fn test_build_prompt_accepts_empty_query() {
        let prompt = build_prompt("");
        assert!(prompt.contains("User Query: \"\""));
    }

    #[test]
    fn test_marker_only_ends_the_template() {
        assert_eq!(RECIPE_PROMPT_TEMPLATE.matches(RESPONSE_MARKER).count(), 1);
    }
}
