pub mod config;
pub mod error;
pub mod generators;
pub mod model;
pub mod normalizer;
pub mod prompt;
pub mod server;
pub mod service;

// Re-export commonly used types
pub use error::GenieError;
pub use model::RecipeRecord;
pub use normalizer::{normalize, strip_prompt_echo};
pub use prompt::build_prompt;
pub use service::RecipeService;

use log::info;

/// Normalize a raw model transcript produced for `user_query`.
///
/// The echoed prompt is stripped against the prompt that [`build_prompt`]
/// would have sent for the same query.
pub fn parse_model_output(raw: &str, user_query: &str) -> RecipeRecord {
    let prompt = build_prompt(user_query);
    let answer = strip_prompt_echo(raw, &prompt);
    info!("Text to parse: {} bytes", answer.len());
    normalize(answer, user_query)
}
