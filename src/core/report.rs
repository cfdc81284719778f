//! Report pipeline.
//!
//! [`AnalysisEngine`] normalizes a [`Submission`], runs the first-layer
//! analyzers, derives cognitive load, engagement and proficiency from their
//! outputs, and optionally merges remote grammar findings.

use crate::capture::types::Submission;
use crate::core::cognitive::{estimate_cognitive_load, CognitiveLoad};
use crate::core::engagement::{compute_engagement, EngagementMetrics};
use crate::core::fluency::{compute_fluency, FluencyMetrics};
use crate::core::normalize::{normalize, NormalizedTelemetry, TelemetrySummary};
use crate::core::proficiency::{aggregate, writer_profile, Proficiency, WriterProfile};
use crate::core::reading::{compute_reading, ReadingMetrics};
use crate::core::text_quality::{compute_text_quality, TextQualityMetrics};
use crate::core::tokens::words;
use crate::linguistic::augment::{
    check_with_timeout, clamp_timeout, partition, AugmentationStatus, GrammarChecker,
};
use crate::linguistic::{analyze_local, Lexicon, LinguisticReport};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Engine settings.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Locale sent to the remote checker
    pub locale: String,
    /// Bound on remote augmentation; clamped to 3-5 seconds
    pub augmentation_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            locale: "pt-BR".to_string(),
            augmentation_timeout: Duration::from_secs(5),
        }
    }
}

/// All metrics for one submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricReport {
    pub student_id: String,
    pub telemetry: TelemetrySummary,
    pub fluency: FluencyMetrics,
    pub reading: ReadingMetrics,
    pub text_quality: TextQualityMetrics,
    pub linguistic: LinguisticReport,
    pub cognitive_load: CognitiveLoad,
    pub engagement: EngagementMetrics,
    pub proficiency: Proficiency,
    pub writer_profile: WriterProfile,
    pub augmentation: AugmentationStatus,
    /// `"<section>: <reason>"` for every section computed from missing input
    pub degraded: Vec<String>,
}

/// Submission analyzer.
#[derive(Clone)]
pub struct AnalysisEngine {
    config: EngineConfig,
    lexicon: Arc<Lexicon>,
    checker: Option<Arc<dyn GrammarChecker>>,
}

impl AnalysisEngine {
    /// Create an engine with the embedded pt-BR lexicon and no remote checker.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            lexicon: Arc::new(Lexicon::builtin().clone()),
            checker: None,
        }
    }

    /// Use a different lexicon.
    pub fn with_lexicon(mut self, lexicon: Lexicon) -> Self {
        self.lexicon = Arc::new(lexicon);
        self
    }

    /// Enable remote augmentation through `checker`.
    pub fn with_checker(mut self, checker: Arc<dyn GrammarChecker>) -> Self {
        self.checker = Some(checker);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Effective augmentation timeout.
    pub fn augmentation_timeout(&self) -> Duration {
        clamp_timeout(self.config.augmentation_timeout)
    }

    /// Analyze without remote augmentation.
    pub fn analyze_local(&self, submission: &Submission) -> MetricReport {
        let telemetry = normalize(submission);
        build_report(submission, &telemetry, &self.lexicon)
    }

    /// Analyze, merging remote findings when a checker is configured.
    ///
    /// Never fails: augmentation errors and timeouts leave the local report
    /// untouched apart from [`AugmentationStatus::Skipped`].
    pub async fn analyze(&self, submission: &Submission) -> MetricReport {
        let mut report = self.analyze_local(submission);

        let Some(checker) = self.checker.as_deref() else {
            return report;
        };
        if submission.text.trim().is_empty() {
            report.augmentation = AugmentationStatus::Skipped {
                reason: "empty text".to_string(),
            };
            return report;
        }

        let timeout = self.augmentation_timeout();
        match check_with_timeout(checker, &submission.text, &self.config.locale, timeout).await {
            Ok(findings) => {
                let merged = partition(findings);
                let spelling = merged.spelling.len() as u32;
                let grammar = merged.grammar.len() as u32;
                debug!(
                    checker = checker.name(),
                    spelling, grammar, "Merged remote findings"
                );
                report.linguistic.merge_remote(merged);
                report.augmentation = AugmentationStatus::Applied { spelling, grammar };
            }
            Err(e) => {
                warn!(checker = checker.name(), error = %e, "Augmentation skipped");
                report.augmentation = AugmentationStatus::Skipped {
                    reason: e.to_string(),
                };
            }
        }

        report
    }
}

/// Blocking engine for synchronous callers.
pub struct BlockingAnalysisEngine {
    inner: AnalysisEngine,
    runtime: tokio::runtime::Runtime,
}

impl BlockingAnalysisEngine {
    /// Create a blocking engine with its own current-thread runtime.
    pub fn new(inner: AnalysisEngine) -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        Ok(Self { inner, runtime })
    }

    pub fn analyze(&self, submission: &Submission) -> MetricReport {
        self.runtime.block_on(self.inner.analyze(submission))
    }

    pub fn engine(&self) -> &AnalysisEngine {
        &self.inner
    }
}

fn build_report(
    submission: &Submission,
    telemetry: &NormalizedTelemetry,
    lexicon: &Lexicon,
) -> MetricReport {
    let text = submission.text.as_str();
    let text_words = words(text).len();
    let reported_words = if submission.word_count > 0 {
        submission.word_count
    } else {
        text_words as u32
    };

    let fluency = compute_fluency(
        &telemetry.keystrokes,
        submission.time_spent_ms,
        text.chars().count(),
    );
    let reading = compute_reading(
        &telemetry.pointer_samples,
        &telemetry.zone_events,
        &telemetry.scroll_events,
        &telemetry.click_events,
    );
    let text_quality = compute_text_quality(text, &lexicon.emotion);
    let linguistic = analyze_local(text, lexicon);

    let cognitive_load = estimate_cognitive_load(
        fluency.pause_count,
        fluency.backspace_rate,
        text_quality.avg_sentence_length,
    );
    let engagement = compute_engagement(
        submission.time_spent_ms,
        reported_words,
        telemetry.pointer_samples.len(),
        submission.message_count,
        telemetry.timeline().len(),
    );
    let proficiency = aggregate(
        fluency.typing_speed,
        text_quality.lexical_diversity,
        text_words,
    );

    MetricReport {
        student_id: submission.student_id.clone(),
        telemetry: telemetry.summary(),
        writer_profile: writer_profile(fluency.backspace_rate, text_words),
        degraded: degraded_sections(submission, telemetry),
        fluency,
        reading,
        text_quality,
        linguistic,
        cognitive_load,
        engagement,
        proficiency,
        augmentation: AugmentationStatus::NotRequested,
    }
}

fn degraded_sections(submission: &Submission, telemetry: &NormalizedTelemetry) -> Vec<String> {
    let mut degraded = Vec::new();

    if telemetry.dropped.total() > 0 {
        degraded.push(format!(
            "telemetry: {} malformed events dropped",
            telemetry.dropped.total()
        ));
    }
    if telemetry.keystrokes.is_empty() {
        degraded.push("fluency: no keystrokes".to_string());
    }
    if submission.time_spent_ms == 0 {
        degraded.push("fluency: no time on task".to_string());
    }
    if telemetry.pointer_samples.is_empty() {
        degraded.push("reading: no pointer samples".to_string());
    }
    if telemetry.zone_events.len() < 2 {
        degraded.push("reading: no zone transitions".to_string());
    }
    if submission.text.trim().is_empty() {
        degraded.push("textQuality: empty text".to_string());
        degraded.push("linguistic: empty text".to_string());
    }

    degraded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::types::{RawKeystroke, RawZoneEvent};
    use crate::core::engagement::Tier;

    #[test]
    fn test_empty_submission_neutral() {
        let engine = AnalysisEngine::new(EngineConfig::default());
        let report = engine.analyze_local(&Submission::default());

        assert_eq!(report.fluency.typing_speed, 0);
        assert_eq!(report.linguistic.quality_score, 100);
        assert_eq!(report.engagement.time.tier, Tier::Low);
        assert_eq!(report.engagement.time.score, 30);
        assert_eq!(report.augmentation, AugmentationStatus::NotRequested);
        assert!(report.degraded.contains(&"fluency: no keystrokes".to_string()));
        assert!(report.degraded.contains(&"textQuality: empty text".to_string()));
    }

    #[test]
    fn test_reported_word_count_used_for_engagement() {
        let engine = AnalysisEngine::new(EngineConfig::default());
        let submission = Submission {
            text: "uma frase curta".to_string(),
            word_count: 10,
            time_spent_ms: 60_000,
            ..Default::default()
        };
        let report = engine.analyze_local(&submission);
        assert_eq!(report.engagement.words_per_minute, 10.0);
        assert_eq!(report.proficiency.adherence_score, 40);
    }

    #[test]
    fn test_full_pipeline() {
        let keystrokes = (0..50)
            .map(|i| RawKeystroke {
                time: Some(i as f64 * 1200.0),
                key: Some("a".to_string()),
                is_backspace: None,
            })
            .collect();
        let submission = Submission {
            student_id: "aluno-1".to_string(),
            text: "Hoje fui à escola com meus amigos.".to_string(),
            time_spent_ms: 60_000,
            keystrokes,
            zone_events: vec![
                RawZoneEvent {
                    time: Some(0.0),
                    zone: Some("editor".to_string()),
                },
                RawZoneEvent {
                    time: Some(1000.0),
                    zone: Some("agent".to_string()),
                },
            ],
            ..Default::default()
        };

        let engine = AnalysisEngine::new(EngineConfig::default());
        let report = engine.analyze_local(&submission);

        assert_eq!(report.student_id, "aluno-1");
        assert_eq!(report.fluency.typing_speed, 50);
        assert_eq!(report.fluency.backspace_rate, 0.0);
        assert_eq!(report.telemetry.accepted.keystrokes, 50);
        assert_eq!(report.reading.zone_dwell_ms["editor"], 1000.0);
        assert_eq!(report.proficiency.fluency_score, 100);
        assert!(!report
            .degraded
            .iter()
            .any(|d| d.starts_with("fluency")));
    }

    #[test]
    fn test_timeout_is_clamped() {
        let engine = AnalysisEngine::new(EngineConfig {
            augmentation_timeout: Duration::from_secs(60),
            ..Default::default()
        });
        assert_eq!(engine.augmentation_timeout(), Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_analyze_without_checker_matches_local() {
        let engine = AnalysisEngine::new(EngineConfig::default());
        let submission = Submission {
            text: "Eu foi na escola.".to_string(),
            ..Default::default()
        };
        let report = engine.analyze(&submission).await;
        assert_eq!(report, engine.analyze_local(&submission));
    }
}
