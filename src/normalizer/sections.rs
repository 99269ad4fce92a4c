//! Line-oriented parsing of `label: value` answers.

use crate::model::{RecipeRecord, NOT_AVAILABLE};
use log::warn;

/// Which part of the answer the parser is currently reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    None,
    Name,
    Ingredients,
    Instructions,
    Calories,
    BotMessage,
}

/// Recognized label prefixes, matched against case-folded, trimmed lines
/// in this order.
const LABELS: [(&str, Section); 6] = [
    ("recipename:", Section::Name),
    ("ingredients:", Section::Ingredients),
    ("instructions:", Section::Instructions),
    ("totalcalories:", Section::Calories),
    ("calories:", Section::Calories),
    ("botmessage:", Section::BotMessage),
];

impl Section {
    /// Returns the section introduced by a label line, if `folded` is one.
    pub fn from_label(folded: &str) -> Option<Section> {
        LABELS
            .iter()
            .find(|(prefix, _)| folded.starts_with(prefix))
            .map(|(_, section)| *section)
    }

    /// Whether a content line belongs to this section. Only ingredient and
    /// instruction sections collect lines, and never lines that open with
    /// another section's label.
    fn accepts(self, folded: &str) -> bool {
        match self {
            Section::Ingredients | Section::Instructions => !LABELS
                .iter()
                .any(|(prefix, section)| *section != self && folded.starts_with(prefix)),
            _ => false,
        }
    }
}

/// Outcome of the line-oriented pass.
#[derive(Debug, Default)]
pub struct ParsedSections {
    pub record: RecipeRecord,
    /// A `recipeName:` line was seen, even with an empty value
    pub name_found: bool,
    ingredients: Vec<String>,
    instructions: Vec<String>,
}

impl ParsedSections {
    /// True when a name was given or real ingredients or steps were
    /// collected. A list that reads only `N/A` is a placeholder.
    pub fn has_recipe_content(&self) -> bool {
        self.name_found || has_items(&self.ingredients) || has_items(&self.instructions)
    }

    fn apply_label(&mut self, section: Section, line: &str) {
        // Text after the first colon, or the whole line when there is none
        let value = line.split_once(':').map_or(line, |(_, rest)| rest).trim();

        match section {
            Section::Name => {
                self.record.recipe_name = value.to_string();
                self.name_found = true;
            }
            Section::Ingredients | Section::Instructions => self.push(section, value),
            Section::Calories => {
                if let Some(calories) = scrape_calories(value) {
                    self.record.total_calories = calories;
                }
            }
            Section::BotMessage => self.record.bot_message = Some(value.to_string()),
            Section::None => {}
        }
    }

    fn push(&mut self, section: Section, item: &str) {
        if item.is_empty() {
            return;
        }
        match section {
            Section::Ingredients => self.ingredients.push(item.to_string()),
            Section::Instructions => self.instructions.push(item.to_string()),
            _ => {}
        }
    }

    fn finish(mut self) -> Self {
        if !self.ingredients.is_empty() {
            self.record.ingredients = self.ingredients.join("\n");
        }
        if !self.instructions.is_empty() {
            self.record.instructions = self.instructions.join("\n");
        }
        self
    }
}

fn has_items(items: &[String]) -> bool {
    !items.is_empty() && items.join("\n") != NOT_AVAILABLE
}

/// Parses `recipeName:` / `ingredients:` / ... sections line by line.
///
/// Free text outside the ingredient and instruction sections is dropped.
pub fn parse(answer: &str) -> ParsedSections {
    let mut parsed = ParsedSections::default();
    let mut cursor = Section::None;

    for line in answer.trim().lines() {
        let trimmed = line.trim();
        let folded = trimmed.to_lowercase();

        match Section::from_label(&folded) {
            Some(section) => {
                cursor = section;
                parsed.apply_label(section, line);
            }
            None if !trimmed.is_empty() && cursor.accepts(&folded) => parsed.push(cursor, trimmed),
            None => {}
        }
    }

    parsed.finish()
}

/// Keeps only the ASCII digits of `text` and reads them as a calorie count.
/// Non-ASCII digits such as full-width `４５０` are dropped.
///
/// Returns `None` when there are no digits or the number does not fit.
pub fn scrape_calories(text: &str) -> Option<u32> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        warn!("No calorie figure in {:?}", text);
        return None;
    }

    match digits.parse::<u32>() {
        Ok(calories) => Some(calories),
        Err(e) => {
            warn!("Could not parse calories from {:?}: {}", text, e);
            None
        }
    }
}
