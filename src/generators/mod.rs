mod completion;

pub use completion::CompletionGenerator;

use crate::error::GenieError;
use async_trait::async_trait;

/// A language model backend: takes a prompt, returns the raw generated text
#[async_trait]
pub trait ResponseGenerator: Send + Sync {
    /// Get the backend name (e.g., "completion")
    fn name(&self) -> &str;

    /// Generate a single answer for the prompt. Called once per request.
    async fn generate(&self, prompt: &str) -> Result<String, GenieError>;
}
