//! Grammar-pattern pass.
//!
//! Rules are data: each compiled pattern from the lexicon is evaluated in
//! order and every match becomes a finding.

use crate::core::tokens::char_offset;
use crate::linguistic::lexicon::Lexicon;
use serde::{Deserialize, Serialize};

/// Where a finding came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingSource {
    Local,
    Remote,
}

/// A grammar or spelling finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrammarFinding {
    pub matched_text: String,
    pub suggestion: String,
    pub rule_id: String,
    /// Character offset of the match
    pub position: usize,
    pub category: String,
    /// Human-readable rule label or remote message
    pub message: String,
    pub source: FindingSource,
}

/// Run every grammar rule over the text, in rule order.
pub fn find_grammar_issues(text: &str, lexicon: &Lexicon) -> Vec<GrammarFinding> {
    lexicon
        .grammar_rules
        .iter()
        .flat_map(|rule| {
            rule.pattern().find_iter(text).map(move |m| GrammarFinding {
                matched_text: m.as_str().to_string(),
                suggestion: rule.suggestion.clone(),
                rule_id: rule.id.clone(),
                position: char_offset(text, m.start()),
                category: rule.category.clone(),
                message: rule.label.clone(),
                source: FindingSource::Local,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn findings(text: &str) -> Vec<GrammarFinding> {
        find_grammar_issues(text, Lexicon::builtin())
    }

    #[test]
    fn test_subject_verb_agreement() {
        let found = findings("Ontem eu foi ao parque.");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].rule_id, "subject-verb-eu");
        assert_eq!(found[0].matched_text, "eu foi");
        assert_eq!(found[0].position, 6);
        assert_eq!(found[0].source, FindingSource::Local);
    }

    #[test]
    fn test_correct_first_person_not_flagged() {
        assert!(findings("Eu sou feliz. Eu estou bem.").is_empty());
    }

    #[test]
    fn test_case_insensitive_rules() {
        let found = findings("ELES SOMOS amigos e tinha muito pessoas.");
        let ids: Vec<&str> = found.iter().map(|f| f.rule_id.as_str()).collect();
        assert_eq!(ids, vec!["subject-verb-eles", "noun-adjective-muito"]);
        assert_eq!(found[0].matched_text, "ELES SOMOS");
    }

    #[test]
    fn test_rule_order_then_position() {
        let found = findings("Gosto de fazer isso. Penso em que fazer.");
        let ids: Vec<&str> = found.iter().map(|f| f.rule_id.as_str()).collect();
        assert_eq!(ids, vec!["preposition-de-em-que", "infinitive-de"]);
    }

    #[test]
    fn test_each_builtin_rule_matches() {
        let cases = [
            ("Ontem eu foi ao parque.", "subject-verb-eu"),
            ("Eles somos amigos.", "subject-verb-eles"),
            ("Elas estamos cansadas.", "subject-verb-elas"),
            ("Vi muito meninas na praça.", "noun-adjective-muito"),
            ("Havia pouco pessoas lá.", "noun-adjective-pouco"),
            ("Penso em que fazer.", "preposition-de-em-que"),
            ("Fui pro que sobrou.", "preposition-pro"),
            ("Parei de fazer isso.", "infinitive-de"),
            ("Estudei para ser médico.", "infinitive-para"),
        ];

        for (text, rule_id) in cases {
            let ids: Vec<String> = findings(text).into_iter().map(|f| f.rule_id).collect();
            assert_eq!(ids, vec![rule_id.to_string()], "text: {text}");
        }
        assert_eq!(cases.len(), Lexicon::builtin().grammar_rules.len());
    }

    #[test]
    fn test_no_findings_on_empty_text() {
        assert!(findings("").is_empty());
    }
}
