//! Style-issue detection: sentence length and word repetition.

use crate::core::tokens::{normalized_words, round_to, sentences};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sentences with fewer words than this are short.
const SHORT_SENTENCE_WORDS: usize = 4;
/// Short sentences are flagged above this share of all sentences.
const SHORT_SENTENCE_RATIO: f64 = 0.3;
/// Sentences with more words than this are long.
const LONG_SENTENCE_WORDS: usize = 25;
/// Only words longer than this are checked for repetition.
const REPETITION_MIN_CHARS: usize = 3;
/// Words repeated more often than this are flagged.
const REPETITION_MAX_COUNT: u32 = 5;
const TOP_REPEATED: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleIssueKind {
    ShortSentences,
    LongSentences,
    Repetition,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleIssue {
    pub kind: StyleIssueKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatedWord {
    pub word: String,
    pub count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleReport {
    pub issues: Vec<StyleIssue>,
    /// Short sentences over all sentences (2 decimals)
    pub short_sentence_ratio: f64,
    pub long_sentence_count: u32,
    /// Most repeated words, highest count first
    pub repeated_words: Vec<RepeatedWord>,
}

pub fn analyze_style(text: &str) -> StyleReport {
    let sentence_lengths: Vec<usize> = sentences(text)
        .iter()
        .map(|s| s.split_whitespace().count())
        .collect();

    let short = sentence_lengths
        .iter()
        .filter(|&&len| len < SHORT_SENTENCE_WORDS)
        .count();
    let long = sentence_lengths
        .iter()
        .filter(|&&len| len > LONG_SENTENCE_WORDS)
        .count() as u32;
    let short_sentence_ratio = if sentence_lengths.is_empty() {
        0.0
    } else {
        short as f64 / sentence_lengths.len() as f64
    };

    let repeated_words = repeated_words(text);

    let mut issues = Vec::new();
    if short_sentence_ratio > SHORT_SENTENCE_RATIO {
        issues.push(StyleIssue {
            kind: StyleIssueKind::ShortSentences,
            message: "Muitas frases muito curtas".to_string(),
        });
    }
    if long > 0 {
        issues.push(StyleIssue {
            kind: StyleIssueKind::LongSentences,
            message: format!("{long} frases muito longas"),
        });
    }
    if !repeated_words.is_empty() {
        issues.push(StyleIssue {
            kind: StyleIssueKind::Repetition,
            message: "Palavras repetidas em excesso".to_string(),
        });
    }

    StyleReport {
        issues,
        short_sentence_ratio: round_to(short_sentence_ratio, 2),
        long_sentence_count: long,
        repeated_words,
    }
}

/// Words over the length floor that repeat too often, top five.
fn repeated_words(text: &str) -> Vec<RepeatedWord> {
    let mut counts: BTreeMap<String, u32> = BTreeMap::new();
    for word in normalized_words(text) {
        if word.chars().count() > REPETITION_MIN_CHARS {
            *counts.entry(word).or_insert(0) += 1;
        }
    }

    let mut repeated: Vec<RepeatedWord> = counts
        .into_iter()
        .filter(|(_, count)| *count > REPETITION_MAX_COUNT)
        .map(|(word, count)| RepeatedWord { word, count })
        .collect();
    // BTreeMap order breaks count ties alphabetically
    repeated.sort_by(|a, b| b.count.cmp(&a.count));
    repeated.truncate(TOP_REPEATED);
    repeated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_empty() {
        let report = analyze_style("");
        assert!(report.issues.is_empty());
        assert_eq!(report.short_sentence_ratio, 0.0);
    }

    #[test]
    fn test_repeated_sentence_not_flagged_for_repetition() {
        let report = analyze_style("Eu sou feliz. Eu sou feliz. Eu sou feliz.");
        assert!(report.repeated_words.is_empty());
        assert!(!report
            .issues
            .iter()
            .any(|i| i.kind == StyleIssueKind::Repetition));
        // every sentence has three words
        assert_eq!(report.short_sentence_ratio, 1.0);
        assert_eq!(report.issues[0].kind, StyleIssueKind::ShortSentences);
    }

    #[test]
    fn test_repetition_over_five() {
        let text = "feliz ".repeat(6);
        let report = analyze_style(&text);
        assert_eq!(
            report.repeated_words,
            vec![RepeatedWord {
                word: "feliz".to_string(),
                count: 6
            }]
        );
        assert!(report
            .issues
            .iter()
            .any(|i| i.kind == StyleIssueKind::Repetition));
    }

    #[test]
    fn test_short_words_ignored_for_repetition() {
        let report = analyze_style(&"que ".repeat(10));
        assert!(report.repeated_words.is_empty());
    }

    #[test]
    fn test_long_sentence() {
        let text = format!("{}.", vec!["palavra"; 26].join(" "));
        let report = analyze_style(&text);
        assert_eq!(report.long_sentence_count, 1);
        assert!(report
            .issues
            .iter()
            .any(|i| i.message == "1 frases muito longas"));
    }
}
