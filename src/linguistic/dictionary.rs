//! Dictionary pass: whole-word lookups of known wrong forms.

use crate::core::tokens::{char_offset, context_window, is_whole_word};
use crate::linguistic::lexicon::Lexicon;
use serde::{Deserialize, Serialize};

/// Characters of context kept on each side of a match.
pub const CONTEXT_RADIUS: usize = 20;

/// A dictionary correction found in the text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectionEntry {
    /// The form as written in the text
    pub wrong_form: String,
    pub canonical_form: String,
    /// Character offset of the match
    pub match_position: usize,
    pub context: String,
    pub rule_id: String,
}

/// Scan the text for every correction in the lexicon.
///
/// Results are ordered by position, then by wrong form.
pub fn find_corrections(text: &str, lexicon: &Lexicon) -> Vec<CorrectionEntry> {
    let mut entries: Vec<CorrectionEntry> = lexicon
        .corrections
        .iter()
        .flat_map(|rule| {
            rule.matcher()
                .find_iter(text)
                .filter(|m| is_whole_word(text, m.start(), m.end()))
                .map(move |m| CorrectionEntry {
                    wrong_form: m.as_str().to_string(),
                    canonical_form: rule.canonical.clone(),
                    match_position: char_offset(text, m.start()),
                    context: context_window(text, m.start(), m.end(), CONTEXT_RADIUS),
                    rule_id: format!("dictionary:{}", rule.wrong),
                })
        })
        .collect();

    entries.sort_by(|a, b| {
        a.match_position
            .cmp(&b.match_position)
            .then_with(|| a.rule_id.cmp(&b.rule_id))
    });
    entries
}
