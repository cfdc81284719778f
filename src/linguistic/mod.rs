//! Linguistic correction analysis.
//!
//! The local pipeline runs a dictionary pass, grammar patterns, semantic
//! classification, morphology counts and style checks, all driven by a
//! [`Lexicon`]. Remote findings from a [`GrammarChecker`] can be merged in
//! afterwards.

pub mod augment;
pub mod dictionary;
pub mod grammar;
#[cfg(feature = "remote")]
pub mod language_tool;
pub mod lexicon;
pub mod morphology;
pub mod semantics;
pub mod style;

pub use augment::{AugmentError, AugmentationStatus, GrammarChecker, RemoteFinding};
pub use dictionary::CorrectionEntry;
pub use grammar::{FindingSource, GrammarFinding};
pub use lexicon::{Lexicon, LexiconError};
pub use morphology::MorphologyCounts;
pub use semantics::SemanticProfile;
pub use style::StyleReport;

use augment::MergedFindings;
use serde::{Deserialize, Serialize};

/// Vocabulary richness above which the quality score gets a bonus.
const RICHNESS_BONUS_THRESHOLD: f64 = 0.7;

/// Linguistic findings for one text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinguisticReport {
    pub corrections: Vec<CorrectionEntry>,
    /// Remote spelling findings
    pub spelling: Vec<GrammarFinding>,
    /// Local rule findings followed by remote grammar findings
    pub grammar: Vec<GrammarFinding>,
    pub semantics: SemanticProfile,
    pub morphology: MorphologyCounts,
    pub style: StyleReport,
    /// Composite correctness score (0-100)
    pub quality_score: u32,
}

impl Default for LinguisticReport {
    fn default() -> Self {
        Self {
            corrections: Vec::new(),
            spelling: Vec::new(),
            grammar: Vec::new(),
            semantics: SemanticProfile::default(),
            morphology: MorphologyCounts::default(),
            style: StyleReport::default(),
            quality_score: 100,
        }
    }
}

impl LinguisticReport {
    /// Append remote findings and rescore.
    pub fn merge_remote(&mut self, remote: MergedFindings) {
        self.spelling.extend(remote.spelling);
        self.grammar.extend(remote.grammar);
        self.quality_score = quality_score(self);
    }
}

/// Run the local linguistic pipeline.
pub fn analyze_local(text: &str, lexicon: &Lexicon) -> LinguisticReport {
    let mut report = LinguisticReport {
        corrections: dictionary::find_corrections(text, lexicon),
        spelling: Vec::new(),
        grammar: grammar::find_grammar_issues(text, lexicon),
        semantics: semantics::classify(text, &lexicon.semantic_fields),
        morphology: morphology::tag(text, &lexicon.word_classes),
        style: style::analyze_style(text),
        quality_score: 0,
    };
    report.quality_score = quality_score(&report);
    report
}

/// 100 minus 3 per correction, 5 per spelling or grammar finding and 2 per
/// style issue, plus 5 for rich vocabulary; clamped to 0-100.
pub fn quality_score(report: &LinguisticReport) -> u32 {
    let mut score = 100i64;
    score -= 3 * report.corrections.len() as i64;
    score -= 5 * report.spelling.len() as i64;
    score -= 5 * report.grammar.len() as i64;
    score -= 2 * report.style.issues.len() as i64;
    if report.semantics.vocabulary_richness > RICHNESS_BONUS_THRESHOLD {
        score += 5;
    }
    score.clamp(0, 100) as u32
}
