//! Recovery of a JSON object embedded anywhere in the answer.

use super::sections::scrape_calories;
use super::NormalizeError;
use crate::model::RecipeRecord;
use log::warn;
use serde_json::{Map, Value};

/// Keys a decoded block must carry before it is trusted as a whole record.
const REQUIRED_KEYS: [&str; 4] = ["recipeName", "ingredients", "instructions", "totalCalories"];

/// Returns the text from the first `{` through the last `}`, if ordered.
fn find_block(answer: &str) -> Option<&str> {
    let start = answer.find('{')?;
    let end = answer.rfind('}')?;
    (end > start).then(|| &answer[start..=end])
}

/// Builds a record from an embedded JSON object.
///
/// `Ok(None)` means no usable block: none present, malformed, or missing a
/// required key. An error means the block was complete but a value had a
/// shape that cannot be turned into a record field.
pub fn extract(answer: &str) -> Result<Option<RecipeRecord>, NormalizeError> {
    let Some(block) = find_block(answer) else {
        return Ok(None);
    };

    let object = match serde_json::from_str::<Value>(block) {
        Ok(Value::Object(object)) => object,
        Ok(_) => return Ok(None),
        Err(e) => {
            warn!(
                "Found JSON-like block, but failed to parse ({}). Falling back to keyword parsing.",
                e
            );
            return Ok(None);
        }
    };

    if let Some(missing) = REQUIRED_KEYS.iter().find(|key| !object.contains_key(**key)) {
        warn!(
            "JSON block has no `{}` key. Falling back to keyword parsing.",
            missing
        );
        return Ok(None);
    }

    Ok(Some(RecipeRecord {
        recipe_name: text_field(&object, "recipeName")?,
        ingredients: list_field(&object, "ingredients")?,
        instructions: list_field(&object, "instructions")?,
        total_calories: calories_field(&object)?,
        bot_message: bot_message_field(&object)?,
    }))
}

fn invalid(field: &'static str, value: &Value) -> NormalizeError {
    NormalizeError::InvalidField {
        field,
        found: value.to_string(),
    }
}

fn text_field(object: &Map<String, Value>, field: &'static str) -> Result<String, NormalizeError> {
    match &object[field] {
        Value::String(text) => Ok(text.clone()),
        other => Err(invalid(field, other)),
    }
}

/// A string, or an array of strings joined one per line.
fn list_field(object: &Map<String, Value>, field: &'static str) -> Result<String, NormalizeError> {
    match &object[field] {
        Value::String(text) => Ok(text.clone()),
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_str().ok_or_else(|| invalid(field, item)))
            .collect::<Result<Vec<_>, _>>()
            .map(|items| items.join("\n")),
        other => Err(invalid(field, other)),
    }
}

fn calories_field(object: &Map<String, Value>) -> Result<u32, NormalizeError> {
    let value = &object["totalCalories"];
    match value {
        Value::Number(number) => {
            if let Some(calories) = number.as_u64() {
                return u32::try_from(calories).map_err(|_| invalid("totalCalories", value));
            }
            match number.as_f64() {
                Some(calories) if calories.is_finite() && (0.0..=u32::MAX as f64).contains(&calories) => {
                    Ok(calories.round() as u32)
                }
                _ => Err(invalid("totalCalories", value)),
            }
        }
        Value::String(text) => Ok(scrape_calories(text).unwrap_or(0)),
        other => Err(invalid("totalCalories", other)),
    }
}

fn bot_message_field(object: &Map<String, Value>) -> Result<Option<String>, NormalizeError> {
    match object.get("botMessage") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(other) => Err(invalid("botMessage", other)),
    }
}
