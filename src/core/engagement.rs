//! Engagement estimate from time on task, interaction volume and
//! conversational turns.
//!
//! Each dimension is an independent three-way bucket; the overall score is
//! their rounded mean.

use crate::core::tokens::round_to;
use serde::{Deserialize, Serialize};

/// Minimum time on task (in minutes) before engagement can exceed Low.
const MIN_ENGAGED_MINUTES: f64 = 0.5;
const MIN_ENGAGED_WPM: f64 = 5.0;
/// Pointer samples per interaction unit.
const SAMPLES_PER_UNIT: f64 = 100.0;

/// Ordinal engagement tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    None,
    #[default]
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TieredScore {
    pub tier: Tier,
    pub score: u32,
}

impl TieredScore {
    const fn new(tier: Tier, score: u32) -> Self {
        Self { tier, score }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementMetrics {
    pub time: TieredScore,
    pub interaction: TieredScore,
    pub conversation: TieredScore,
    /// Words per minute of time on task (1 decimal)
    pub words_per_minute: f64,
    /// Timeline events per minute of time on task (2 decimals)
    pub interaction_density: f64,
    /// Mean of the three sub-scores
    pub overall_score: u32,
}

pub fn compute_engagement(
    time_spent_ms: u64,
    word_count: u32,
    pointer_sample_count: usize,
    message_count: u32,
    timeline_events: usize,
) -> EngagementMetrics {
    let time = time_engagement(time_spent_ms, word_count);
    let interaction = interaction_engagement(pointer_sample_count);
    let conversation = conversation_engagement(message_count);
    let overall = (time.score + interaction.score + conversation.score) as f64 / 3.0;

    EngagementMetrics {
        time,
        interaction,
        conversation,
        words_per_minute: round_to(words_per_minute(time_spent_ms, word_count), 1),
        interaction_density: round_to(per_minute(timeline_events as f64, time_spent_ms), 2),
        overall_score: overall.round() as u32,
    }
}

pub fn words_per_minute(time_spent_ms: u64, word_count: u32) -> f64 {
    per_minute(word_count as f64, time_spent_ms)
}

pub fn time_engagement(time_spent_ms: u64, word_count: u32) -> TieredScore {
    let minutes = time_spent_ms as f64 / 60_000.0;
    if minutes < MIN_ENGAGED_MINUTES {
        TieredScore::new(Tier::Low, 30)
    } else if words_per_minute(time_spent_ms, word_count) < MIN_ENGAGED_WPM {
        TieredScore::new(Tier::Medium, 60)
    } else {
        TieredScore::new(Tier::High, 100)
    }
}

pub fn interaction_engagement(pointer_sample_count: usize) -> TieredScore {
    let units = pointer_sample_count as f64 / SAMPLES_PER_UNIT;
    if units < 1.0 {
        TieredScore::new(Tier::Low, 30)
    } else if units < 5.0 {
        TieredScore::new(Tier::Medium, 60)
    } else {
        TieredScore::new(Tier::High, 100)
    }
}

pub fn conversation_engagement(message_count: u32) -> TieredScore {
    match message_count {
        0 => TieredScore::new(Tier::None, 0),
        1..=2 => TieredScore::new(Tier::Low, 40),
        3..=5 => TieredScore::new(Tier::Medium, 70),
        _ => TieredScore::new(Tier::High, 100),
    }
}

fn per_minute(count: f64, time_spent_ms: u64) -> f64 {
    if time_spent_ms == 0 {
        return 0.0;
    }
    count / (time_spent_ms as f64 / 60_000.0)
}
