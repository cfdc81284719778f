//! Proficiency aggregation and writer profile.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProficiencyLevel {
    #[default]
    Beginner,
    Basic,
    Intermediate,
    Advanced,
}

impl ProficiencyLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            ProficiencyLevel::Advanced
        } else if score >= 60.0 {
            ProficiencyLevel::Intermediate
        } else if score >= 40.0 {
            ProficiencyLevel::Basic
        } else {
            ProficiencyLevel::Beginner
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proficiency {
    pub overall_score: u32,
    pub level: ProficiencyLevel,
    pub fluency_score: u32,
    pub quality_score: u32,
    pub adherence_score: u32,
}

/// Combine fluency, text quality and task adherence.
///
/// `typing_speed` is keystrokes per minute, `lexical_diversity` a percentage
/// and `word_count` the number of words in the final text. The level is
/// taken from the unrounded mean.
pub fn aggregate(typing_speed: u32, lexical_diversity: f64, word_count: usize) -> Proficiency {
    let fluency = (typing_speed as f64 * 2.0).min(100.0);
    let quality = lexical_diversity.clamp(0.0, 100.0);
    let adherence = task_adherence(word_count) as f64;
    let mean = (fluency + quality + adherence) / 3.0;

    Proficiency {
        overall_score: mean.round() as u32,
        level: ProficiencyLevel::from_score(mean),
        fluency_score: fluency.round() as u32,
        quality_score: quality.round() as u32,
        adherence_score: adherence as u32,
    }
}

/// 100 inside the target length, 70 near it, 40 otherwise.
pub fn task_adherence(word_count: usize) -> u32 {
    match word_count {
        50..=200 => 100,
        30..=250 => 70,
        _ => 40,
    }
}

/// Coarse writer profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriterProfile {
    Meticulous,
    Spontaneous,
    Detailed,
    Concise,
    #[default]
    Balanced,
}

/// Checked in order: heavy revision, little revision, long text, short text.
pub fn writer_profile(backspace_rate: f64, word_count: usize) -> WriterProfile {
    if backspace_rate > 10.0 {
        WriterProfile::Meticulous
    } else if backspace_rate < 2.0 {
        WriterProfile::Spontaneous
    } else if word_count > 150 {
        WriterProfile::Detailed
    } else if word_count < 50 {
        WriterProfile::Concise
    } else {
        WriterProfile::Balanced
    }
}
