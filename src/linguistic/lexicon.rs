//! Locale lexicon: correction table, grammar rules, semantic fields, closed
//! word classes and emotion word lists.
//!
//! Lexicons are JSON data assets. The pt-BR lexicon is embedded and parsed
//! once; other locales load through [`Lexicon::from_json`] or
//! [`Lexicon::from_path`].

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;

const BUILTIN_PT_BR: &str = include_str!("../../data/pt_br.json");

static BUILTIN: Lazy<Lexicon> = Lazy::new(|| {
    Lexicon::from_json(BUILTIN_PT_BR).expect("embedded pt-BR lexicon must be valid")
});

/// Errors from loading a lexicon.
#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("failed to read lexicon {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid lexicon JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid pattern in grammar rule '{rule_id}': {source}")]
    InvalidPattern {
        rule_id: String,
        #[source]
        source: regex::Error,
    },
    #[error("lexicon has no locale")]
    MissingLocale,
}

/// On-disk lexicon layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LexiconFile {
    pub locale: String,
    #[serde(default)]
    pub corrections: BTreeMap<String, String>,
    #[serde(default)]
    pub grammar_rules: Vec<GrammarRuleEntry>,
    #[serde(default)]
    pub semantic_fields: Vec<SemanticField>,
    #[serde(default)]
    pub word_classes: WordClassLists,
    #[serde(default)]
    pub emotion: EmotionLists,
}

/// A grammar rule as stored in the lexicon file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrammarRuleEntry {
    pub id: String,
    pub category: String,
    pub pattern: String,
    pub label: String,
    pub suggestion: String,
}

/// A named topical field and its keywords.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticField {
    pub name: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WordClassLists {
    #[serde(default)]
    pub pronouns: Vec<String>,
    #[serde(default)]
    pub articles: Vec<String>,
    #[serde(default)]
    pub prepositions: Vec<String>,
    #[serde(default)]
    pub conjunctions: Vec<String>,
    #[serde(default)]
    pub interjections: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmotionLists {
    #[serde(default)]
    pub positive: Vec<String>,
    #[serde(default)]
    pub negative: Vec<String>,
}

/// A wrong-form to canonical-form substitution.
#[derive(Debug, Clone)]
pub struct CorrectionRule {
    pub wrong: String,
    pub canonical: String,
    matcher: Regex,
}

impl CorrectionRule {
    /// Case-insensitive literal matcher for the wrong form.
    pub fn matcher(&self) -> &Regex {
        &self.matcher
    }
}

/// A compiled grammar rule.
#[derive(Debug, Clone)]
pub struct GrammarRule {
    pub id: String,
    pub category: String,
    pub label: String,
    pub suggestion: String,
    pattern: Regex,
}

impl GrammarRule {
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }
}

/// Closed word-class lists, lowercase.
#[derive(Debug, Clone, Default)]
pub struct WordClasses {
    pub pronouns: HashSet<String>,
    pub articles: HashSet<String>,
    pub prepositions: HashSet<String>,
    pub conjunctions: HashSet<String>,
    pub interjections: HashSet<String>,
}

/// Curated positive and negative emotion words, lowercase.
#[derive(Debug, Clone, Default)]
pub struct EmotionLexicon {
    positive: HashSet<String>,
    negative: HashSet<String>,
}

impl EmotionLexicon {
    pub fn is_positive(&self, word: &str) -> bool {
        self.positive.contains(word)
    }

    pub fn is_negative(&self, word: &str) -> bool {
        self.negative.contains(word)
    }
}

/// A compiled locale lexicon.
#[derive(Debug, Clone)]
pub struct Lexicon {
    pub locale: String,
    /// Ordered by wrong form
    pub corrections: Vec<CorrectionRule>,
    /// In file order
    pub grammar_rules: Vec<GrammarRule>,
    /// In file order; the order decides dominant-field ties
    pub semantic_fields: Vec<SemanticField>,
    pub word_classes: WordClasses,
    pub emotion: EmotionLexicon,
}

impl Lexicon {
    /// The embedded pt-BR lexicon.
    pub fn builtin() -> &'static Lexicon {
        &BUILTIN
    }

    /// Parse and compile a lexicon from JSON text.
    pub fn from_json(json: &str) -> Result<Self, LexiconError> {
        let file: LexiconFile = serde_json::from_str(json)?;
        Self::compile(file)
    }

    /// Read and compile a lexicon file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LexiconError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Compile patterns and clean up keyword lists.
    pub fn compile(file: LexiconFile) -> Result<Self, LexiconError> {
        let locale = file.locale.trim().to_string();
        if locale.is_empty() {
            return Err(LexiconError::MissingLocale);
        }

        let mut corrections = Vec::with_capacity(file.corrections.len());
        for (wrong, canonical) in file.corrections {
            let wrong = wrong.trim().to_lowercase();
            let canonical = canonical.trim().to_string();
            if wrong.is_empty() || wrong == canonical.to_lowercase() {
                continue;
            }
            // Escaped literal; cannot fail to compile
            let matcher = case_insensitive(&regex::escape(&wrong)).map_err(|source| {
                LexiconError::InvalidPattern {
                    rule_id: format!("correction:{wrong}"),
                    source,
                }
            })?;
            corrections.push(CorrectionRule {
                wrong,
                canonical,
                matcher,
            });
        }

        let grammar_rules = file
            .grammar_rules
            .into_iter()
            .map(|rule| -> Result<GrammarRule, LexiconError> {
                let pattern =
                    case_insensitive(&rule.pattern).map_err(|source| LexiconError::InvalidPattern {
                        rule_id: rule.id.clone(),
                        source,
                    })?;
                Ok(GrammarRule {
                    id: rule.id,
                    category: rule.category,
                    label: rule.label,
                    suggestion: rule.suggestion,
                    pattern,
                })
            })
            .collect::<Result<Vec<_>, LexiconError>>()?;

        let semantic_fields = file
            .semantic_fields
            .into_iter()
            .map(|field| SemanticField {
                name: field.name.trim().to_string(),
                keywords: clean_keywords(field.keywords),
            })
            .collect();

        let classes = file.word_classes;
        let word_classes = WordClasses {
            pronouns: word_set(classes.pronouns),
            articles: word_set(classes.articles),
            prepositions: word_set(classes.prepositions),
            conjunctions: word_set(classes.conjunctions),
            interjections: word_set(classes.interjections),
        };

        let emotion = EmotionLexicon {
            positive: word_set(file.emotion.positive),
            negative: word_set(file.emotion.negative),
        };

        Ok(Lexicon {
            locale,
            corrections,
            grammar_rules,
            semantic_fields,
            word_classes,
            emotion,
        })
    }

    /// Look up the canonical form for a wrong form.
    pub fn correction_for(&self, wrong: &str) -> Option<&str> {
        let wrong = wrong.to_lowercase();
        self.corrections
            .iter()
            .find(|rule| rule.wrong == wrong)
            .map(|rule| rule.canonical.as_str())
    }

    /// Short description for display.
    pub fn summary(&self) -> String {
        let keywords: usize = self.semantic_fields.iter().map(|f| f.keywords.len()).sum();
        let fields: Vec<&str> = self.semantic_fields.iter().map(|f| f.name.as_str()).collect();
        format!(
            "Lexicon {}\n  Corrections:     {}\n  Grammar rules:   {}\n  Semantic fields: {} ({} keywords)\n  Fields:          {}",
            self.locale,
            self.corrections.len(),
            self.grammar_rules.len(),
            self.semantic_fields.len(),
            keywords,
            fields.join(", ")
        )
    }
}

fn case_insensitive(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

/// Trim, lowercase, drop blanks and duplicates, keep first-seen order.
fn clean_keywords(keywords: Vec<String>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    keywords
        .into_iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty() && seen.insert(k.clone()))
        .collect()
}

fn word_set(words: Vec<String>) -> HashSet<String> {
    words
        .into_iter()
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lexicon_loads() {
        let lexicon = Lexicon::builtin();
        assert_eq!(lexicon.locale, "pt-BR");
        assert_eq!(lexicon.correction_for("vcs"), Some("vocês"));
        assert_eq!(lexicon.correction_for("VC"), Some("você"));
        assert!(!lexicon.grammar_rules.is_empty());

        let names: Vec<&str> = lexicon
            .semantic_fields
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "emotions",
                "social",
                "work",
                "education",
                "leisure",
                "personality",
                "time",
                "space",
                "quantity"
            ]
        );
        assert!(lexicon.emotion.is_positive("feliz"));
        assert!(lexicon.emotion.is_negative("medo"));
        assert!(lexicon.word_classes.articles.contains("uma"));
    }

    #[test]
    fn test_identity_corrections_and_blank_keywords_dropped() {
        let json = r#"{
            "locale": "xx",
            "corrections": {"abc": "abc", "foo": "bar", "  ": "x"},
            "semanticFields": [{"name": "f", "keywords": [" a ", "a", "", "B"]}]
        }"#;
        let lexicon = Lexicon::from_json(json).unwrap();

        assert_eq!(lexicon.corrections.len(), 1);
        assert_eq!(lexicon.corrections[0].wrong, "foo");
        assert_eq!(lexicon.semantic_fields[0].keywords, vec!["a", "b"]);
    }

    #[test]
    fn test_invalid_grammar_pattern_rejected() {
        let json = r#"{
            "locale": "xx",
            "grammarRules": [{"id": "broken", "category": "c", "pattern": "(", "label": "l", "suggestion": "s"}]
        }"#;
        match Lexicon::from_json(json) {
            Err(LexiconError::InvalidPattern { rule_id, .. }) => assert_eq!(rule_id, "broken"),
            other => panic!("expected InvalidPattern, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_locale_rejected() {
        assert!(matches!(
            Lexicon::from_json(r#"{"locale": " "}"#),
            Err(LexiconError::MissingLocale)
        ));
        assert!(matches!(
            Lexicon::from_json("not json"),
            Err(LexiconError::Parse(_))
        ));
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexicon.json");
        std::fs::write(&path, r#"{"locale": "pt-PT", "corrections": {"vc": "você"}}"#).unwrap();

        let lexicon = Lexicon::from_path(&path).unwrap();
        assert_eq!(lexicon.locale, "pt-PT");
        assert!(matches!(
            Lexicon::from_path(dir.path().join("missing.json")),
            Err(LexiconError::Io { .. })
        ));
    }
}
