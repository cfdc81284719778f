//! Reading and attention metrics from pointer samples and zone changes.
//!
//! Only movement magnitudes and zone names are used; zone dwell is always
//! derived from consecutive zone-change events, never captured directly.

use crate::capture::types::{ClickEvent, PointerSample, ScrollEvent, ZoneEvent};
use crate::core::tokens::round_to;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reference screen area for movement efficiency (800 x 600 pixels).
const REFERENCE_AREA_PX: f64 = 480_000.0;

/// Exploration score reported when no pointer movement was captured.
const NEUTRAL_EXPLORATION_SCORE: u32 = 50;

/// Reading and attention indicators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingMetrics {
    /// Mean pointer speed in distance units per second (rounded)
    pub pointer_velocity: f64,
    /// Total travelled distance relative to the reference area (percent)
    pub movement_efficiency: u32,
    /// Milliseconds attributed to each zone
    pub zone_dwell_ms: BTreeMap<String, f64>,
    /// Share of total dwell per zone (percent, 1 decimal)
    pub zone_distribution: BTreeMap<String, f64>,
    /// Zones that received dwell time
    pub distinct_zones: u32,
    /// Breadth of zones visited and movement volume (0-100)
    pub exploration_score: u32,
    pub pointer_sample_count: u32,
    pub scroll_count: u32,
    pub click_count: u32,
}

/// Compute reading metrics from sorted event lists.
pub fn compute_reading(
    pointer_samples: &[PointerSample],
    zone_events: &[ZoneEvent],
    scroll_events: &[ScrollEvent],
    click_events: &[ClickEvent],
) -> ReadingMetrics {
    let zone_dwell_ms = zone_dwell(zone_events);
    let zone_distribution = zone_distribution(&zone_dwell_ms);
    let distinct_zones = zone_dwell_ms.values().filter(|&&ms| ms > 0.0).count() as u32;

    ReadingMetrics {
        pointer_velocity: pointer_velocity(pointer_samples),
        movement_efficiency: movement_efficiency(pointer_samples),
        exploration_score: exploration_score(pointer_samples.len(), distinct_zones),
        zone_dwell_ms,
        zone_distribution,
        distinct_zones,
        pointer_sample_count: pointer_samples.len() as u32,
        scroll_count: scroll_events.len() as u32,
        click_count: click_events.len() as u32,
    }
}

/// Mean pointer velocity.
///
/// Uses upstream velocities when any sample carries a non-zero one (zeros
/// are not counted); otherwise derives speed from consecutive positions as
/// total distance over total time, scaled to distance per second.
pub fn pointer_velocity(samples: &[PointerSample]) -> f64 {
    let precomputed: Vec<f64> = samples
        .iter()
        .filter_map(|s| s.velocity)
        .filter(|&v| v != 0.0)
        .collect();
    if !precomputed.is_empty() {
        return (precomputed.iter().sum::<f64>() / precomputed.len() as f64).round();
    }

    let (distance, elapsed_ms) = samples
        .windows(2)
        .fold((0.0, 0.0), |(distance, elapsed), pair| {
            (
                distance + euclidean(&pair[0], &pair[1]),
                elapsed + (pair[1].time - pair[0].time),
            )
        });

    if elapsed_ms <= 0.0 {
        return 0.0;
    }
    (distance / elapsed_ms * 1000.0).round()
}

/// Total travelled distance as a percentage of the reference area.
pub fn movement_efficiency(samples: &[PointerSample]) -> u32 {
    if samples.is_empty() {
        return 0;
    }
    (total_distance(samples) / REFERENCE_AREA_PX * 100.0).round() as u32
}

/// Accumulate time per zone: each delta goes to the zone being left.
pub fn zone_dwell(zone_events: &[ZoneEvent]) -> BTreeMap<String, f64> {
    let mut dwell: BTreeMap<String, f64> = BTreeMap::new();

    for event in zone_events {
        dwell.entry(event.zone.clone()).or_insert(0.0);
    }

    for pair in zone_events.windows(2) {
        let delta = pair[1].time - pair[0].time;
        if delta > 0.0 {
            *dwell.entry(pair[0].zone.clone()).or_insert(0.0) += delta;
        }
    }

    dwell
}

/// Normalize dwell times to percentages; empty when total dwell is zero.
pub fn zone_distribution(dwell: &BTreeMap<String, f64>) -> BTreeMap<String, f64> {
    let total: f64 = dwell.values().sum();
    if total <= 0.0 {
        return BTreeMap::new();
    }

    dwell
        .iter()
        .map(|(zone, &ms)| (zone.clone(), round_to(ms / total * 100.0, 1)))
        .collect()
}

/// `min(100, zones * 15 + samples / 20)`, neutral when nothing moved.
pub fn exploration_score(sample_count: usize, distinct_zones: u32) -> u32 {
    if sample_count == 0 {
        return NEUTRAL_EXPLORATION_SCORE;
    }
    let raw = distinct_zones as f64 * 15.0 + sample_count as f64 / 20.0;
    raw.min(100.0).round() as u32
}

fn euclidean(a: &PointerSample, b: &PointerSample) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}

fn total_distance(samples: &[PointerSample]) -> f64 {
    if samples.iter().any(|s| s.distance.is_some()) {
        return samples.iter().filter_map(|s| s.distance).sum();
    }
    samples
        .windows(2)
        .map(|pair| euclidean(&pair[0], &pair[1]))
        .sum()
}
