//! Cognitive-load estimate from pauses, revisions and sentence complexity.

use serde::{Deserialize, Serialize};

const PAUSE_COUNT_THRESHOLD: u32 = 5;
const PAUSE_WEIGHT: u32 = 40;
const BACKSPACE_RATE_THRESHOLD: f64 = 15.0;
const BACKSPACE_WEIGHT: u32 = 30;
const COMPLEXITY_THRESHOLD: f64 = 20.0;
const COMPLEXITY_WEIGHT: u32 = 30;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl LoadLevel {
    /// Level for a summed load score.
    pub fn from_score(score: u32) -> Self {
        if score > 70 {
            LoadLevel::High
        } else if score > 40 {
            LoadLevel::Medium
        } else {
            LoadLevel::Low
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CognitiveLoad {
    pub score: u32,
    pub level: LoadLevel,
    pub pause_count: u32,
    pub backspace_rate: f64,
    /// Words per sentence
    pub sentence_complexity: f64,
}

pub fn estimate_cognitive_load(
    pause_count: u32,
    backspace_rate: f64,
    sentence_complexity: f64,
) -> CognitiveLoad {
    let mut score = 0;
    if pause_count > PAUSE_COUNT_THRESHOLD {
        score += PAUSE_WEIGHT;
    }
    if backspace_rate > BACKSPACE_RATE_THRESHOLD {
        score += BACKSPACE_WEIGHT;
    }
    if sentence_complexity > COMPLEXITY_THRESHOLD {
        score += COMPLEXITY_WEIGHT;
    }

    CognitiveLoad {
        score,
        level: LoadLevel::from_score(score),
        pause_count,
        backspace_rate,
        sentence_complexity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_load() {
        let load = estimate_cognitive_load(0, 0.0, 0.0);
        assert_eq!(load.score, 0);
        assert_eq!(load.level, LoadLevel::Low);
    }

    #[test]
    fn test_thresholds_are_exclusive() {
        let load = estimate_cognitive_load(5, 15.0, 20.0);
        assert_eq!(load.score, 0);
    }

    #[test]
    fn test_load_levels() {
        assert_eq!(estimate_cognitive_load(6, 0.0, 0.0).level, LoadLevel::Low);
        assert_eq!(estimate_cognitive_load(0, 16.0, 21.0).level, LoadLevel::Medium);
        let boundary = estimate_cognitive_load(6, 16.0, 0.0);
        assert_eq!(boundary.score, 70);
        assert_eq!(boundary.level, LoadLevel::Medium);
        assert_eq!(estimate_cognitive_load(6, 16.0, 21.0).level, LoadLevel::High);
    }
}
