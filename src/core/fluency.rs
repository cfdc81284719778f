//! Writing-fluency metrics from keystroke timing.
//!
//! Inter-keystroke gaps are segmented into bursts and pauses; the first
//! intervals of the session feed a variance-based rhythm score.

use crate::capture::types::KeystrokeEvent;
use crate::core::tokens::round_to;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

/// Gap above which typing is considered paused (in milliseconds).
pub const PAUSE_THRESHOLD_MS: f64 = 500.0;

/// Gap above which a pause is flagged as long (in milliseconds).
pub const LONG_PAUSE_THRESHOLD_MS: f64 = 2000.0;

/// Number of leading intervals considered for rhythm consistency.
const RHYTHM_MAX_INTERVALS: usize = 50;

/// Minimum keystrokes before rhythm consistency is reported.
const RHYTHM_MIN_KEYSTROKES: usize = 10;

/// Writing-fluency indicators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FluencyMetrics {
    /// Keystrokes per minute of time on task
    pub typing_speed: u32,
    /// Keystrokes per character of final text (1 decimal)
    pub revision_ratio: f64,
    /// Percentage of keystrokes that are backspaces (1 decimal, 0-100)
    pub backspace_rate: f64,
    /// Number of gaps longer than the pause threshold
    pub pause_count: u32,
    /// Mean pause duration in milliseconds (rounded)
    pub mean_pause_ms: f64,
    /// Pauses longer than the long-pause threshold
    pub long_pause_count: u32,
    /// Runs of keystrokes separated by pauses
    pub burst_count: u32,
    /// Keystrokes per burst (1 decimal)
    pub mean_burst_length: f64,
    /// Typing rhythm steadiness (0-100)
    pub rhythm_consistency: u32,
}

/// Pause segmentation of a keystroke stream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PausePattern {
    pub pauses: u32,
    pub mean_pause_ms: f64,
    pub long_pauses: u32,
}

/// Compute fluency metrics from sorted keystrokes.
pub fn compute_fluency(
    keystrokes: &[KeystrokeEvent],
    time_spent_ms: u64,
    final_text_chars: usize,
) -> FluencyMetrics {
    if keystrokes.is_empty() {
        return FluencyMetrics::default();
    }

    let pauses = pause_pattern(keystrokes);
    let burst_count = pauses.pauses + 1;

    FluencyMetrics {
        typing_speed: typing_speed(keystrokes.len(), time_spent_ms),
        revision_ratio: revision_ratio(keystrokes.len(), final_text_chars),
        backspace_rate: backspace_rate(keystrokes),
        pause_count: pauses.pauses,
        mean_pause_ms: pauses.mean_pause_ms,
        long_pause_count: pauses.long_pauses,
        burst_count,
        mean_burst_length: round_to(keystrokes.len() as f64 / burst_count as f64, 1),
        rhythm_consistency: rhythm_consistency(keystrokes),
    }
}

/// Keystrokes per minute, rounded. Zero when time or keystrokes are missing.
pub fn typing_speed(keystroke_count: usize, time_spent_ms: u64) -> u32 {
    if keystroke_count == 0 || time_spent_ms == 0 {
        return 0;
    }
    let minutes = time_spent_ms as f64 / 60_000.0;
    (keystroke_count as f64 / minutes).round() as u32
}

/// Keystrokes per final character, one decimal.
pub fn revision_ratio(keystroke_count: usize, final_text_chars: usize) -> f64 {
    if keystroke_count == 0 || final_text_chars == 0 {
        return 0.0;
    }
    round_to(keystroke_count as f64 / final_text_chars as f64, 1)
}

/// Backspace percentage, one decimal.
pub fn backspace_rate(keystrokes: &[KeystrokeEvent]) -> f64 {
    if keystrokes.is_empty() {
        return 0.0;
    }
    let backspaces = keystrokes.iter().filter(|k| k.is_backspace).count();
    round_to(100.0 * backspaces as f64 / keystrokes.len() as f64, 1).clamp(0.0, 100.0)
}

/// Segment gaps between consecutive keystrokes into pauses.
pub fn pause_pattern(keystrokes: &[KeystrokeEvent]) -> PausePattern {
    let gaps: Vec<f64> = keystrokes
        .windows(2)
        .map(|pair| pair[1].time - pair[0].time)
        .filter(|&gap| gap > PAUSE_THRESHOLD_MS)
        .collect();

    if gaps.is_empty() {
        return PausePattern::default();
    }

    PausePattern {
        pauses: gaps.len() as u32,
        mean_pause_ms: (gaps.iter().sum::<f64>() / gaps.len() as f64).round(),
        long_pauses: gaps
            .iter()
            .filter(|&&gap| gap > LONG_PAUSE_THRESHOLD_MS)
            .count() as u32,
    }
}

/// Steadiness of the leading inter-keystroke intervals.
///
/// `max(0, 100 - stddev / mean * 50)`, rounded. Zero with fewer than ten
/// keystrokes or a non-positive mean interval.
pub fn rhythm_consistency(keystrokes: &[KeystrokeEvent]) -> u32 {
    if keystrokes.len() < RHYTHM_MIN_KEYSTROKES {
        return 0;
    }

    let intervals: Vec<f64> = keystrokes
        .windows(2)
        .take(RHYTHM_MAX_INTERVALS)
        .map(|pair| pair[1].time - pair[0].time)
        .collect();

    let mean = intervals.iter().mean();
    if !mean.is_finite() || mean <= 0.0 {
        return 0;
    }
    let std_dev = intervals.iter().population_std_dev();

    (100.0 - std_dev / mean * 50.0).clamp(0.0, 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evenly_spaced(count: usize, spacing_ms: f64) -> Vec<KeystrokeEvent> {
        (0..count)
            .map(|i| KeystrokeEvent::new(i as f64 * spacing_ms, "a"))
            .collect()
    }

    #[test]
    fn test_fluency_empty() {
        let metrics = compute_fluency(&[], 60_000, 100);
        assert_eq!(metrics, FluencyMetrics::default());
        assert_eq!(metrics.typing_speed, 0);
    }

    #[test]
    fn test_fifty_even_keystrokes_in_one_minute() {
        let keystrokes = evenly_spaced(50, 1200.0);
        let metrics = compute_fluency(&keystrokes, 60_000, 50);

        assert_eq!(metrics.typing_speed, 50);
        assert_eq!(metrics.backspace_rate, 0.0);
        assert_eq!(metrics.rhythm_consistency, 100);
        assert_eq!(metrics.revision_ratio, 1.0);
    }

    #[test]
    fn test_typing_speed_zero_time() {
        assert_eq!(typing_speed(40, 0), 0);
        assert_eq!(typing_speed(0, 1000), 0);
        assert_eq!(typing_speed(30, 30_000), 60);
    }

    #[test]
    fn test_backspace_rate() {
        let keystrokes = vec![
            KeystrokeEvent::new(0.0, "a"),
            KeystrokeEvent::new(10.0, "Backspace"),
            KeystrokeEvent::new(20.0, "b"),
        ];
        assert_eq!(backspace_rate(&keystrokes), 33.3);
    }

    #[test]
    fn test_pause_segmentation() {
        let keystrokes: Vec<KeystrokeEvent> = [0.0, 100.0, 700.0, 800.0, 3500.0, 3600.0]
            .iter()
            .map(|&t| KeystrokeEvent::new(t, "a"))
            .collect();

        let pattern = pause_pattern(&keystrokes);
        assert_eq!(pattern.pauses, 2);
        assert_eq!(pattern.long_pauses, 1);
        assert_eq!(pattern.mean_pause_ms, 1650.0);

        let metrics = compute_fluency(&keystrokes, 60_000, 6);
        assert_eq!(metrics.burst_count, 3);
        assert_eq!(metrics.mean_burst_length, 2.0);
    }

    #[test]
    fn test_rhythm_requires_ten_keystrokes() {
        assert_eq!(rhythm_consistency(&evenly_spaced(9, 100.0)), 0);
        assert_eq!(rhythm_consistency(&evenly_spaced(10, 100.0)), 100);
    }

    #[test]
    fn test_rhythm_irregular_typing_scores_lower() {
        let times = [0.0, 100.0, 150.0, 600.0, 650.0, 700.0, 1500.0, 1550.0, 1600.0, 2400.0];
        let keystrokes: Vec<KeystrokeEvent> =
            times.iter().map(|&t| KeystrokeEvent::new(t, "a")).collect();

        let score = rhythm_consistency(&keystrokes);
        assert!(score < 100);
    }

    #[test]
    fn test_rhythm_simultaneous_keystrokes() {
        let keystrokes = evenly_spaced(12, 0.0);
        assert_eq!(rhythm_consistency(&keystrokes), 0);
    }
}
