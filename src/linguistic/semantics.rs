//! Semantic-field classification.

use crate::core::tokens::{is_whole_word, normalized_words, round_to};
use crate::linguistic::lexicon::SemanticField;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Reported when no field has any keyword hit.
pub const GENERAL_FIELD: &str = "general";

/// Fields counted as abstract vocabulary.
const ABSTRACT_FIELDS: [&str; 2] = ["emotions", "personality"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticProfile {
    /// Keyword hits per field
    pub fields: BTreeMap<String, u32>,
    pub dominant_field: String,
    /// Unique words over total words (0-1, 2 decimals)
    pub vocabulary_richness: f64,
    /// Hits in the emotions and personality fields
    pub abstract_words: u32,
}

impl Default for SemanticProfile {
    fn default() -> Self {
        Self {
            fields: BTreeMap::new(),
            dominant_field: GENERAL_FIELD.to_string(),
            vocabulary_richness: 0.0,
            abstract_words: 0,
        }
    }
}

/// Count keyword hits per field and pick the dominant one.
///
/// Ties go to the earliest field in `fields` order.
pub fn classify(text: &str, fields: &[SemanticField]) -> SemanticProfile {
    let lower = text.to_lowercase();

    let mut counts = BTreeMap::new();
    let mut dominant_field = GENERAL_FIELD;
    let mut max_count = 0;

    for field in fields {
        let count: u32 = field
            .keywords
            .iter()
            .map(|keyword| whole_word_hits(&lower, keyword))
            .sum();
        if count > max_count {
            max_count = count;
            dominant_field = field.name.as_str();
        }
        counts.insert(field.name.clone(), count);
    }

    let abstract_words = ABSTRACT_FIELDS
        .iter()
        .filter_map(|name| counts.get(*name))
        .sum();

    SemanticProfile {
        fields: counts,
        dominant_field: dominant_field.to_string(),
        vocabulary_richness: vocabulary_richness(text),
        abstract_words,
    }
}

/// Distinct lowercase words over total words, two decimals.
pub fn vocabulary_richness(text: &str) -> f64 {
    let words = normalized_words(text);
    if words.is_empty() {
        return 0.0;
    }
    let unique: HashSet<&str> = words.iter().map(String::as_str).collect();
    round_to(unique.len() as f64 / words.len() as f64, 2)
}

fn whole_word_hits(lower_text: &str, keyword: &str) -> u32 {
    if keyword.is_empty() {
        return 0;
    }
    lower_text
        .match_indices(keyword)
        .filter(|(start, m)| is_whole_word(lower_text, *start, start + m.len()))
        .count() as u32
}
