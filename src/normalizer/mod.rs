//! Turns the model's free-form answer into a [`RecipeRecord`].
//!
//! The answer is tried against an embedded JSON object first, then against
//! `label: value` sections. When neither yields a recipe the record degrades
//! to a conversational `botMessage`. [`normalize`] never fails.

mod json_block;
mod sections;

use crate::model::{RecipeRecord, NOT_AVAILABLE};
use crate::prompt::RESPONSE_MARKER;
use log::{error, info, warn};
use thiserror::Error;

/// Bot message used when the model returned nothing at all.
pub const EMPTY_ANSWER_MESSAGE: &str = "I'm sorry, I couldn't find a specific recipe for that.";

/// Bot message used when nothing in the record reads as a recipe or a reply.
pub const CLARIFICATION_MESSAGE: &str =
    "I received a response, but it doesn't look like a recipe. Could you try rephrasing?";

/// Prefix of the bot message carried by a "Parsing Error" record.
pub const PARSING_ERROR_PREFIX: &str = "Error parsing the model's response. Raw: ";

/// Recipe name of the record produced when normalization itself fails.
pub const PARSING_ERROR_NAME: &str = "Parsing Error";

const LOG_PREVIEW_CHARS: usize = 500;

/// Failures inside normalization. Converted to a record, never returned.
#[derive(Error, Debug)]
pub enum NormalizeError {
    /// A complete JSON block carried a value that cannot fill the field
    #[error("field `{field}` has an unusable value: {found}")]
    InvalidField { field: &'static str, found: String },
}

/// Cuts the echoed prompt off the raw model output.
///
/// Uses the text after the last `Response:` marker, or after the exact
/// `prompt` when the output starts with it. Otherwise returns all of `raw`.
/// The result is always trimmed.
pub fn strip_prompt_echo<'a>(raw: &'a str, prompt: &str) -> &'a str {
    if let Some(index) = raw.rfind(RESPONSE_MARKER) {
        info!("Extracted text after '{}' marker.", RESPONSE_MARKER);
        return raw[index + RESPONSE_MARKER.len()..].trim();
    }

    if let Some(rest) = raw.strip_prefix(prompt) {
        info!("Removed prompt from start of response.");
        return rest.trim();
    }

    warn!("Could not reliably strip prompt from response. Using full output.");
    raw.trim()
}

/// Normalizes one answer into a fully populated record.
///
/// `user_query` is only used for logging.
pub fn normalize(answer: &str, user_query: &str) -> RecipeRecord {
    let answer = answer.trim();
    info!(
        "Normalizing answer for query {:?}: {}...",
        preview(user_query),
        preview(answer)
    );

    let record = parse_answer(answer).unwrap_or_else(|e| {
        error!("Error during response parsing: {}", e);
        RecipeRecord {
            recipe_name: PARSING_ERROR_NAME.to_string(),
            bot_message: Some(format!("{}{}", PARSING_ERROR_PREFIX, answer)),
            ..RecipeRecord::default()
        }
    });

    ensure_bot_message(record)
}

fn parse_answer(answer: &str) -> Result<RecipeRecord, NormalizeError> {
    if let Some(record) = json_block::extract(answer)? {
        info!("Successfully parsed model output as JSON block.");
        return Ok(record);
    }

    let parsed = sections::parse(answer);
    if parsed.has_recipe_content() {
        info!(
            "Parsed recipe: {}, Calories: {}",
            parsed.record.recipe_name, parsed.record.total_calories
        );
        return Ok(parsed.record);
    }

    // Stray values without a name, ingredients or steps are noise
    let message = match parsed.record.bot_message {
        Some(message) if !message.is_empty() => message,
        _ if !answer.is_empty() => answer.to_string(),
        _ => EMPTY_ANSWER_MESSAGE.to_string(),
    };
    info!("Parsed as a general bot message.");
    Ok(RecipeRecord::message(message))
}

fn ensure_bot_message(mut record: RecipeRecord) -> RecipeRecord {
    if record.lacks_recipe() && !record.has_bot_message() {
        info!("Response did not seem to be a recipe, setting default botMessage.");
        record.bot_message = Some(CLARIFICATION_MESSAGE.to_string());
    }
    record
}

fn preview(text: &str) -> &str {
    match text.char_indices().nth(LOG_PREVIEW_CHARS) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

/// True when the record is a conversational reply rather than a recipe.
pub fn is_conversational(record: &RecipeRecord) -> bool {
    record.recipe_name == NOT_AVAILABLE && record.has_bot_message()
}
