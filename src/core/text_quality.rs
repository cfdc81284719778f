//! Text-quality metrics computed from the submitted text alone.

use crate::core::tokens::{normalized_words, round_to, sentences, words};
use crate::linguistic::lexicon::EmotionLexicon;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Vowels counted as syllable nuclei, including the locale's accented forms.
const VOWELS: &str = "aeiouáéíóúàèìòùâêîôûãõü";

/// Punctuation marks counted for the balance score.
const PUNCTUATION_MARKS: [char; 5] = ['.', ',', '!', '?', ';'];

/// Indicators kept in the emotional-expression report.
const MAX_EMOTION_INDICATORS: usize = 10;

/// Basic text statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStatistics {
    pub words: u32,
    pub sentences: u32,
    pub paragraphs: u32,
    pub characters: u32,
    pub characters_no_spaces: u32,
    pub syllables: u32,
    /// Estimated reading time in minutes (200 syllables per minute)
    pub reading_time_min: u32,
    /// Estimated speaking time in minutes (150 syllables per minute)
    pub speaking_time_min: u32,
}

/// Emotional-expression heuristic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionalExpression {
    /// `20 * positive - 10 * negative + 50`, clamped to 0-100
    pub score: u32,
    pub positive: u32,
    pub negative: u32,
    /// First matched words, positive matches before negative ones
    pub indicators: Vec<String>,
}

/// Text-quality indicators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextQualityMetrics {
    /// Unique words over total words (percent, 1 decimal)
    pub lexical_diversity: f64,
    /// Characters per word (1 decimal)
    pub avg_word_length: f64,
    /// Words per sentence (1 decimal)
    pub avg_sentence_length: f64,
    /// Flesch-like readability (0-100)
    pub readability: u32,
    /// Punctuation marks per word (2 decimals)
    pub punctuation_ratio: f64,
    /// Bucketed punctuation balance: 30 sparse, 60 dense, 100 acceptable
    pub punctuation_score: u32,
    pub emotional_expression: EmotionalExpression,
    pub statistics: TextStatistics,
}

/// Compute text-quality metrics.
pub fn compute_text_quality(text: &str, emotion: &EmotionLexicon) -> TextQualityMetrics {
    let statistics = text_statistics(text);

    TextQualityMetrics {
        lexical_diversity: lexical_diversity(text),
        avg_word_length: avg_word_length(text),
        avg_sentence_length: avg_sentence_length(text),
        readability: readability(&statistics),
        punctuation_ratio: round_to(punctuation_ratio(text), 2),
        punctuation_score: punctuation_score(text),
        emotional_expression: emotional_expression(text, emotion),
        statistics,
    }
}

/// Percentage of distinct lowercase words, one decimal.
pub fn lexical_diversity(text: &str) -> f64 {
    let words = normalized_words(text);
    if words.is_empty() {
        return 0.0;
    }
    let unique: HashSet<&str> = words.iter().map(String::as_str).collect();
    round_to(100.0 * unique.len() as f64 / words.len() as f64, 1)
}

/// Mean characters per whitespace token, one decimal.
pub fn avg_word_length(text: &str) -> f64 {
    let words = words(text);
    if words.is_empty() {
        return 0.0;
    }
    let total: usize = words.iter().map(|w| w.chars().count()).sum();
    round_to(total as f64 / words.len() as f64, 1)
}

/// Words per sentence, one decimal. Used as sentence complexity.
pub fn avg_sentence_length(text: &str) -> f64 {
    let sentence_count = sentences(text).len();
    if sentence_count == 0 {
        return 0.0;
    }
    round_to(words(text).len() as f64 / sentence_count as f64, 1)
}

/// Vowel count as a syllable approximation.
pub fn count_syllables(text: &str) -> u32 {
    text.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| VOWELS.contains(*c))
        .count() as u32
}

/// `206.835 - 1.015 * (words/sentences) - 84.6 * (syllables/words)`,
/// rounded and clamped to 0-100.
pub fn readability(statistics: &TextStatistics) -> u32 {
    if statistics.words == 0 || statistics.sentences == 0 {
        return 0;
    }
    let words = statistics.words as f64;
    let score = 206.835
        - 1.015 * (words / statistics.sentences as f64)
        - 84.6 * (statistics.syllables as f64 / words);
    score.clamp(0.0, 100.0).round() as u32
}

fn punctuation_ratio(text: &str) -> f64 {
    let word_count = words(text).len();
    if word_count == 0 {
        return 0.0;
    }
    let marks = text.chars().filter(|c| PUNCTUATION_MARKS.contains(c)).count();
    marks as f64 / word_count as f64
}

/// Three-way punctuation bucket; 0 when there is no text.
pub fn punctuation_score(text: &str) -> u32 {
    if words(text).is_empty() {
        return 0;
    }
    let ratio = punctuation_ratio(text);
    if ratio < 0.05 {
        30
    } else if ratio > 0.2 {
        60
    } else {
        100
    }
}

/// Count curated positive and negative words.
pub fn emotional_expression(text: &str, emotion: &EmotionLexicon) -> EmotionalExpression {
    let words = normalized_words(text);
    let positive: Vec<&String> = words.iter().filter(|w| emotion.is_positive(w)).collect();
    let negative: Vec<&String> = words.iter().filter(|w| emotion.is_negative(w)).collect();

    let raw = 20.0 * positive.len() as f64 - 10.0 * negative.len() as f64 + 50.0;
    let indicators = positive
        .iter()
        .chain(negative.iter())
        .take(MAX_EMOTION_INDICATORS)
        .map(|w| w.to_string())
        .collect();

    EmotionalExpression {
        score: raw.clamp(0.0, 100.0) as u32,
        positive: positive.len() as u32,
        negative: negative.len() as u32,
        indicators,
    }
}

/// Word, sentence, paragraph, character and syllable counts.
pub fn text_statistics(text: &str) -> TextStatistics {
    let syllables = count_syllables(text);
    let paragraphs = text
        .split("\n\n")
        .filter(|p| !p.trim().is_empty())
        .count() as u32;

    TextStatistics {
        words: words(text).len() as u32,
        sentences: sentences(text).len() as u32,
        paragraphs,
        characters: text.chars().count() as u32,
        characters_no_spaces: text.chars().filter(|c| !c.is_whitespace()).count() as u32,
        syllables,
        reading_time_min: syllables.div_ceil(200),
        speaking_time_min: syllables.div_ceil(150),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linguistic::lexicon::Lexicon;

    fn emotion() -> &'static EmotionLexicon {
        &Lexicon::builtin().emotion
    }

    #[test]
    fn test_text_quality_empty() {
        let metrics = compute_text_quality("", emotion());
        assert_eq!(metrics.lexical_diversity, 0.0);
        assert_eq!(metrics.readability, 0);
        assert_eq!(metrics.punctuation_score, 0);
        assert_eq!(metrics.emotional_expression.score, 50);
        assert_eq!(metrics.statistics.words, 0);
    }

    #[test]
    fn test_repeated_sentence_diversity() {
        let text = "Eu sou feliz. Eu sou feliz. Eu sou feliz.";
        let metrics = compute_text_quality(text, emotion());

        assert_eq!(metrics.statistics.words, 9);
        assert_eq!(metrics.statistics.sentences, 3);
        assert_eq!(metrics.lexical_diversity, 33.3);
        assert_eq!(metrics.avg_sentence_length, 3.0);
        assert_eq!(metrics.emotional_expression.positive, 3);
        assert_eq!(metrics.emotional_expression.score, 100);
    }

    #[test]
    fn test_punctuation_buckets() {
        let sparse = "um dois tres quatro cinco seis sete oito nove dez onze doze treze catorze quinze dezesseis dezessete dezoito dezenove vinte vinte e um.";
        assert_eq!(punctuation_score(sparse), 30);

        assert_eq!(punctuation_score("Sim! Não? Talvez, hoje."), 60);

        let balanced = "Hoje eu fui para a escola com meus amigos.";
        assert_eq!(punctuation_score(balanced), 100);
    }

    #[test]
    fn test_readability_clamped() {
        let stats = TextStatistics {
            words: 1,
            sentences: 1,
            syllables: 10,
            ..Default::default()
        };
        assert_eq!(readability(&stats), 0);

        let stats = TextStatistics {
            words: 10,
            sentences: 10,
            syllables: 0,
            ..Default::default()
        };
        assert_eq!(readability(&stats), 100);
    }

    #[test]
    fn test_syllables_count_accented_vowels() {
        assert_eq!(count_syllables("Ação"), 3);
        assert_eq!(count_syllables("PÊSSEGO"), 3);
    }

    #[test]
    fn test_emotional_expression_negative() {
        let expression = emotional_expression("Senti medo e raiva, muita tristeza.", emotion());
        assert_eq!(expression.negative, 3);
        assert_eq!(expression.score, 20);
        assert_eq!(expression.indicators, vec!["medo", "raiva", "tristeza"]);
    }

    #[test]
    fn test_statistics_paragraphs_and_times() {
        let text = "Primeiro parágrafo.\n\nSegundo parágrafo.";
        let stats = text_statistics(text);
        assert_eq!(stats.paragraphs, 2);
        assert_eq!(stats.reading_time_min, 1);
        assert_eq!(stats.speaking_time_min, 1);
    }
}
