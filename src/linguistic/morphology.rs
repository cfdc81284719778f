//! Closed word-class counts.

use crate::core::tokens::normalized_words;
use crate::linguistic::lexicon::WordClasses;
use serde::{Deserialize, Serialize};

/// Tokens per closed word class. A token may count in more than one class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MorphologyCounts {
    pub pronouns: u32,
    pub articles: u32,
    pub prepositions: u32,
    pub conjunctions: u32,
    pub interjections: u32,
}

/// Count tokens by lowercase exact lookup.
pub fn tag(text: &str, classes: &WordClasses) -> MorphologyCounts {
    let mut counts = MorphologyCounts::default();

    for word in normalized_words(text) {
        let word = word.as_str();
        counts.pronouns += classes.pronouns.contains(word) as u32;
        counts.articles += classes.articles.contains(word) as u32;
        counts.prepositions += classes.prepositions.contains(word) as u32;
        counts.conjunctions += classes.conjunctions.contains(word) as u32;
        counts.interjections += classes.interjections.contains(word) as u32;
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linguistic::lexicon::Lexicon;

    #[test]
    fn test_tag_counts_classes() {
        let classes = &Lexicon::builtin().word_classes;
        let counts = tag("Eu e ela fomos para a praia, opa!", classes);

        assert_eq!(counts.pronouns, 2);
        assert_eq!(counts.articles, 1);
        // "para" and "a"
        assert_eq!(counts.prepositions, 2);
        assert_eq!(counts.conjunctions, 1);
        assert_eq!(counts.interjections, 1);
    }

    #[test]
    fn test_tag_empty() {
        let classes = &Lexicon::builtin().word_classes;
        assert_eq!(tag("", classes), MorphologyCounts::default());
    }
}
