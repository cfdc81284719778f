//! Optional remote grammar-check augmentation.
//!
//! A [`GrammarChecker`] is any service that checks text and returns
//! findings. Calls are bounded by a timeout and fail open: every failure
//! becomes [`AugmentationStatus::Skipped`] and only local findings are kept.

use crate::linguistic::grammar::{FindingSource, GrammarFinding};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Lower bound for the augmentation timeout.
pub const MIN_AUGMENT_TIMEOUT: Duration = Duration::from_secs(3);
/// Upper bound for the augmentation timeout.
pub const MAX_AUGMENT_TIMEOUT: Duration = Duration::from_secs(5);

/// Replacements kept per remote finding.
const MAX_REPLACEMENTS: usize = 3;

/// Remote augmentation errors. Never returned from the engine.
#[derive(Debug, Error)]
pub enum AugmentError {
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    #[error("network error: {0}")]
    Network(String),
    #[error("server returned status {status}")]
    Status { status: u16 },
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// A finding returned by a remote checker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteFinding {
    pub message: String,
    pub matched_text: String,
    /// Character offset in the checked text
    pub offset: usize,
    pub rule_id: String,
    pub category: String,
    pub replacements: Vec<String>,
}

impl RemoteFinding {
    /// Spelling findings are those whose category mentions spelling or typos.
    pub fn is_spelling(&self) -> bool {
        let category = self.category.to_lowercase();
        category.contains("spelling") || category.contains("typo")
    }

    fn into_finding(self) -> GrammarFinding {
        let suggestion = self
            .replacements
            .into_iter()
            .take(MAX_REPLACEMENTS)
            .collect::<Vec<_>>()
            .join(" / ");
        GrammarFinding {
            matched_text: self.matched_text,
            suggestion,
            rule_id: self.rule_id,
            position: self.offset,
            category: self.category,
            message: self.message,
            source: FindingSource::Remote,
        }
    }
}

/// A text-checking capability.
#[async_trait]
pub trait GrammarChecker: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Check text in the given locale.
    async fn check(&self, text: &str, locale: &str) -> Result<Vec<RemoteFinding>, AugmentError>;
}

/// Outcome of the augmentation step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum AugmentationStatus {
    #[default]
    NotRequested,
    Applied { spelling: u32, grammar: u32 },
    Skipped { reason: String },
}

/// Clamp a configured timeout into the supported window.
pub fn clamp_timeout(timeout: Duration) -> Duration {
    timeout.clamp(MIN_AUGMENT_TIMEOUT, MAX_AUGMENT_TIMEOUT)
}

/// Run a checker under a timeout.
pub async fn check_with_timeout(
    checker: &dyn GrammarChecker,
    text: &str,
    locale: &str,
    timeout: Duration,
) -> Result<Vec<RemoteFinding>, AugmentError> {
    match tokio::time::timeout(timeout, checker.check(text, locale)).await {
        Ok(result) => result,
        Err(_) => Err(AugmentError::Timeout(timeout)),
    }
}

/// Remote findings split into spelling and grammar sets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedFindings {
    pub spelling: Vec<GrammarFinding>,
    pub grammar: Vec<GrammarFinding>,
}

/// Split remote findings by category, keeping response order.
pub fn partition(remote: Vec<RemoteFinding>) -> MergedFindings {
    let mut merged = MergedFindings::default();
    for finding in remote {
        if finding.is_spelling() {
            merged.spelling.push(finding.into_finding());
        } else {
            merged.grammar.push(finding.into_finding());
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remote(category: &str, replacements: &[&str]) -> RemoteFinding {
        RemoteFinding {
            message: "msg".to_string(),
            matched_text: "x".to_string(),
            offset: 3,
            rule_id: "R".to_string(),
            category: category.to_string(),
            replacements: replacements.iter().map(|r| r.to_string()).collect(),
        }
    }

    struct Slow;

    #[async_trait]
    impl GrammarChecker for Slow {
        fn name(&self) -> &str {
            "slow"
        }

        async fn check(&self, _: &str, _: &str) -> Result<Vec<RemoteFinding>, AugmentError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_clamp_timeout() {
        assert_eq!(clamp_timeout(Duration::from_secs(1)), MIN_AUGMENT_TIMEOUT);
        assert_eq!(clamp_timeout(Duration::from_secs(30)), MAX_AUGMENT_TIMEOUT);
        assert_eq!(
            clamp_timeout(Duration::from_millis(4000)),
            Duration::from_millis(4000)
        );
    }

    #[test]
    fn test_partition_by_category() {
        let merged = partition(vec![
            remote("Possible Typo", &["a", "b", "c", "d"]),
            remote("Grammar", &[]),
        ]);
        assert_eq!(merged.spelling.len(), 1);
        assert_eq!(merged.spelling[0].suggestion, "a / b / c");
        assert_eq!(merged.spelling[0].source, FindingSource::Remote);
        assert_eq!(merged.grammar.len(), 1);
        assert_eq!(merged.grammar[0].position, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_check_with_timeout_expires() {
        let result = check_with_timeout(&Slow, "texto", "pt-BR", MIN_AUGMENT_TIMEOUT).await;
        assert!(matches!(result, Err(AugmentError::Timeout(d)) if d == MIN_AUGMENT_TIMEOUT));
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&AugmentationStatus::Skipped {
            reason: "timed out".to_string(),
        })
        .unwrap();
        assert_eq!(json, r#"{"status":"skipped","reason":"timed out"}"#);
        assert_eq!(
            serde_json::to_string(&AugmentationStatus::NotRequested).unwrap(),
            r#"{"status":"notRequested"}"#
        );
    }
}
