use crate::error::GenieError;
use crate::generators::ResponseGenerator;
use crate::model::RecipeRecord;
use crate::normalizer::{is_conversational, normalize, strip_prompt_echo};
use crate::prompt::build_prompt;
use log::{error, info};

/// Runs one recipe request end to end: prompt, generate, strip, normalize.
pub struct RecipeService {
    generator: Option<Box<dyn ResponseGenerator>>,
}

impl RecipeService {
    pub fn new(generator: Box<dyn ResponseGenerator>) -> Self {
        Self {
            generator: Some(generator),
        }
    }

    /// A service whose model failed to load; every request is refused.
    pub fn unavailable() -> Self {
        Self { generator: None }
    }

    pub fn is_available(&self) -> bool {
        self.generator.is_some()
    }

    /// Answer a user query with a recipe record.
    ///
    /// Only generation can fail; the answer is normalized exactly once and
    /// normalization always yields a record.
    pub async fn suggest(&self, user_query: &str) -> Result<RecipeRecord, GenieError> {
        let generator = self.generator.as_ref().ok_or_else(|| {
            error!("Model not loaded. Cannot process request.");
            GenieError::ModelUnavailable("no generation backend configured".to_string())
        })?;

        info!("Received userQuery: {}", user_query);
        let prompt = build_prompt(user_query);

        let raw = generator.generate(&prompt).await?;
        info!("Raw model output from {}: {} bytes", generator.name(), raw.len());

        let answer = strip_prompt_echo(&raw, &prompt);
        let record = normalize(answer, user_query);
        if is_conversational(&record) {
            info!("Answering with a bot message only");
        }
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct EchoingGenerator {
        answer: &'static str,
    }

    #[async_trait]
    impl ResponseGenerator for EchoingGenerator {
        fn name(&self) -> &str {
            "echo"
        }

        async fn generate(&self, prompt: &str) -> Result<String, GenieError> {
            Ok(format!("{}{}", prompt, self.answer))
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl ResponseGenerator for FailingGenerator {
        fn name(&self) -> &str {
            "failing"
        }

        async fn generate(&self, _prompt: &str) -> Result<String, GenieError> {
            Err(GenieError::GeneratorResponse("out of memory".to_string()))
        }
    }

    #[tokio::test]
    async fn test_suggest_strips_echoed_prompt() {
        let service = RecipeService::new(Box::new(EchoingGenerator {
            answer: "\nrecipeName: Lentil Soup\ningredients:\n- lentils\ninstructions:\n1. Simmer\ntotalCalories: 320\nbotMessage: N/A",
        }));

        let record = service.suggest("something warm").await.unwrap();
        assert_eq!(record.recipe_name, "Lentil Soup");
        assert_eq!(record.ingredients, "- lentils");
        assert_eq!(record.instructions, "1. Simmer");
        assert_eq!(record.total_calories, 320);
    }

    #[tokio::test]
    async fn test_suggest_conversation() {
        let service = RecipeService::new(Box::new(EchoingGenerator {
            answer: " Hello! Ask me for any dish.",
        }));

        let record = service.suggest("hi").await.unwrap();
        assert_eq!(record.recipe_name, "N/A");
        assert_eq!(
            record.bot_message.as_deref(),
            Some("Hello! Ask me for any dish.")
        );
    }

    #[tokio::test]
    async fn test_unavailable_service() {
        let service = RecipeService::unavailable();
        assert!(!service.is_available());
        let result = service.suggest("hi").await;
        assert!(matches!(result, Err(GenieError::ModelUnavailable(_))));
    }

    #[tokio::test]
    async fn test_generation_failure_is_propagated() {
        let service = RecipeService::new(Box::new(FailingGenerator));
        let err = service.suggest("hi").await.unwrap_err();
        assert!(err.to_string().contains("out of memory"));
    }
}
