use serde::{Deserialize, Serialize};

/// Placeholder used for every text field that holds no recipe content.
pub const NOT_AVAILABLE: &str = "N/A";

/// A recipe, or a conversational reply when no recipe could be recovered.
///
/// Every field always carries a value. When `recipe_name`, `ingredients`
/// and `instructions` are all [`NOT_AVAILABLE`], `bot_message` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRecord {
    pub recipe_name: String,
    /// Newline-joined list of ingredients
    pub ingredients: String,
    /// Newline-joined list of steps
    pub instructions: String,
    pub total_calories: u32,
    /// Serialized as `null` when absent, never omitted
    pub bot_message: Option<String>,
}

impl Default for RecipeRecord {
    fn default() -> Self {
        Self {
            recipe_name: NOT_AVAILABLE.to_string(),
            ingredients: NOT_AVAILABLE.to_string(),
            instructions: NOT_AVAILABLE.to_string(),
            total_calories: 0,
            bot_message: None,
        }
    }
}

impl RecipeRecord {
    /// A record that carries only a conversational message.
    pub fn message(text: impl Into<String>) -> Self {
        Self {
            bot_message: Some(text.into()),
            ..Self::default()
        }
    }

    /// Record returned when no generation backend is available.
    pub fn service_unavailable() -> Self {
        Self {
            recipe_name: "Service Error".to_string(),
            ..Self::message(
                "The recipe generation service is not properly initialized. Please contact support.",
            )
        }
    }

    /// Record returned when a request fails unexpectedly.
    pub fn server_error(reason: impl std::fmt::Display) -> Self {
        Self {
            recipe_name: "Error".to_string(),
            ..Self::message(format!(
                "Sorry, an unexpected error occurred on the server: {}",
                reason
            ))
        }
    }

    /// True when name, ingredients and instructions are all placeholders.
    pub fn lacks_recipe(&self) -> bool {
        self.recipe_name == NOT_AVAILABLE
            && self.ingredients == NOT_AVAILABLE
            && self.instructions == NOT_AVAILABLE
    }

    /// True when a non-empty bot message is present.
    pub fn has_bot_message(&self) -> bool {
        self.bot_message.as_deref().is_some_and(|m| !m.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record() {
        let record = RecipeRecord::default();
        assert_eq!(record.recipe_name, "N/A");
        assert_eq!(record.ingredients, "N/A");
        assert_eq!(record.instructions, "N/A");
        assert_eq!(record.total_calories, 0);
        assert!(record.bot_message.is_none());
        assert!(record.lacks_recipe());
    }

    #[test]
    fn test_serializes_all_five_fields() {
        let json = serde_json::to_value(RecipeRecord::default()).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 5);
        assert_eq!(json["recipeName"], "N/A");
        assert_eq!(json["totalCalories"], 0);
        assert!(json["botMessage"].is_null());
    }

    #[test]
    fn test_service_records() {
        let unavailable = RecipeRecord::service_unavailable();
        assert_eq!(unavailable.recipe_name, "Service Error");
        assert!(unavailable.has_bot_message());

        let failed = RecipeRecord::server_error("boom");
        assert_eq!(failed.recipe_name, "Error");
        assert_eq!(
            failed.bot_message.as_deref(),
            Some("Sorry, an unexpected error occurred on the server: boom")
        );
    }

    #[test]
    fn test_empty_bot_message_is_not_a_message() {
        let record = RecipeRecord::message("");
        assert!(!record.has_bot_message());
    }
}
