//! Telemetry normalization.
//!
//! Raw event lists from a submission are validated and sorted ascending by
//! time. Entries missing a timestamp or a kind-specific required field are
//! dropped and counted. No list is assumed to arrive pre-sorted.

use crate::capture::types::{
    ClickEvent, InteractionEvent, KeystrokeEvent, PointerSample, RawClickEvent, RawKeystroke,
    RawPointerSample, RawScrollEvent, RawZoneEvent, ScrollEvent, Submission, ZoneEvent,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Per-kind event counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventCounts {
    pub keystrokes: u32,
    pub pointer_samples: u32,
    pub zone_events: u32,
    pub scroll_events: u32,
    pub click_events: u32,
}

impl EventCounts {
    pub fn total(&self) -> u32 {
        self.keystrokes
            + self.pointer_samples
            + self.zone_events
            + self.scroll_events
            + self.click_events
    }
}

/// Accepted and dropped counts, reported alongside the metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetrySummary {
    pub accepted: EventCounts,
    pub dropped: EventCounts,
}

/// Sorted, validated event lists for one submission.
#[derive(Debug, Clone, Default)]
pub struct NormalizedTelemetry {
    pub keystrokes: Vec<KeystrokeEvent>,
    pub pointer_samples: Vec<PointerSample>,
    pub zone_events: Vec<ZoneEvent>,
    pub scroll_events: Vec<ScrollEvent>,
    pub click_events: Vec<ClickEvent>,
    /// Entries removed during validation
    pub dropped: EventCounts,
}

impl NormalizedTelemetry {
    /// Counts of accepted and dropped events.
    pub fn summary(&self) -> TelemetrySummary {
        TelemetrySummary {
            accepted: EventCounts {
                keystrokes: self.keystrokes.len() as u32,
                pointer_samples: self.pointer_samples.len() as u32,
                zone_events: self.zone_events.len() as u32,
                scroll_events: self.scroll_events.len() as u32,
                click_events: self.click_events.len() as u32,
            },
            dropped: self.dropped,
        }
    }

    /// Check if no event of any kind survived validation.
    pub fn is_empty(&self) -> bool {
        self.keystrokes.is_empty()
            && self.pointer_samples.is_empty()
            && self.zone_events.is_empty()
            && self.scroll_events.is_empty()
            && self.click_events.is_empty()
    }

    /// Merge all kinds into one timeline ordered by timestamp.
    ///
    /// Ties keep kind order (keystroke, pointer, zone, scroll, click).
    pub fn timeline(&self) -> Vec<InteractionEvent> {
        let mut events: Vec<InteractionEvent> = Vec::with_capacity(
            self.keystrokes.len()
                + self.pointer_samples.len()
                + self.zone_events.len()
                + self.scroll_events.len()
                + self.click_events.len(),
        );
        events.extend(self.keystrokes.iter().cloned().map(InteractionEvent::Keystroke));
        events.extend(
            self.pointer_samples
                .iter()
                .cloned()
                .map(InteractionEvent::PointerMove),
        );
        events.extend(self.zone_events.iter().cloned().map(InteractionEvent::ZoneChange));
        events.extend(self.scroll_events.iter().cloned().map(InteractionEvent::Scroll));
        events.extend(self.click_events.iter().cloned().map(InteractionEvent::Click));

        events.sort_by(|a, b| {
            a.timestamp()
                .total_cmp(&b.timestamp())
                .then(a.kind().cmp(&b.kind()))
        });
        events
    }
}

/// Validate and sort every event list of a submission.
pub fn normalize(submission: &Submission) -> NormalizedTelemetry {
    let (keystrokes, dropped_keys) = sanitize(&submission.keystrokes, keystroke);
    let (pointer_samples, dropped_pointer) = sanitize(&submission.pointer_samples, pointer);
    let (zone_events, dropped_zones) = sanitize(&submission.zone_events, zone);
    let (scroll_events, dropped_scrolls) = sanitize(&submission.scroll_events, scroll);
    let (click_events, dropped_clicks) = sanitize(&submission.click_events, click);

    let dropped = EventCounts {
        keystrokes: dropped_keys,
        pointer_samples: dropped_pointer,
        zone_events: dropped_zones,
        scroll_events: dropped_scrolls,
        click_events: dropped_clicks,
    };

    if dropped.total() > 0 {
        debug!(
            student_id = %submission.student_id,
            dropped = dropped.total(),
            "Dropped malformed telemetry entries"
        );
    }

    NormalizedTelemetry {
        keystrokes,
        pointer_samples,
        zone_events,
        scroll_events,
        click_events,
        dropped,
    }
}

/// Items that carry a millisecond timestamp.
trait Timed {
    fn time(&self) -> f64;
}

impl Timed for KeystrokeEvent {
    fn time(&self) -> f64 {
        self.time
    }
}

impl Timed for PointerSample {
    fn time(&self) -> f64 {
        self.time
    }
}

impl Timed for ZoneEvent {
    fn time(&self) -> f64 {
        self.time
    }
}

impl Timed for ScrollEvent {
    fn time(&self) -> f64 {
        self.time
    }
}

impl Timed for ClickEvent {
    fn time(&self) -> f64 {
        self.time
    }
}

/// Convert each raw entry, drop rejects, and stable-sort by time.
fn sanitize<R, T, F>(raw: &[R], convert: F) -> (Vec<T>, u32)
where
    T: Timed,
    F: Fn(&R) -> Option<T>,
{
    let mut events: Vec<T> = raw.iter().filter_map(&convert).collect();
    let dropped = (raw.len() - events.len()) as u32;
    events.sort_by(|a, b| a.time().total_cmp(&b.time()));
    (events, dropped)
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn keystroke(raw: &RawKeystroke) -> Option<KeystrokeEvent> {
    let time = finite(raw.time)?;
    let key = match (&raw.key, raw.is_backspace) {
        (Some(key), _) => key.clone(),
        (None, Some(true)) => "Backspace".to_string(),
        (None, _) => return None,
    };
    let is_backspace = raw.is_backspace.unwrap_or(false) || key == "Backspace";

    Some(KeystrokeEvent {
        time,
        key,
        is_backspace,
    })
}

fn pointer(raw: &RawPointerSample) -> Option<PointerSample> {
    Some(PointerSample {
        time: finite(raw.time)?,
        x: finite(raw.x)?,
        y: finite(raw.y)?,
        distance: finite(raw.distance),
        velocity: finite(raw.velocity),
    })
}

fn zone(raw: &RawZoneEvent) -> Option<ZoneEvent> {
    let time = finite(raw.time)?;
    let zone = raw.zone.as_deref().map(str::trim).filter(|z| !z.is_empty())?;

    Some(ZoneEvent {
        time,
        zone: zone.to_string(),
    })
}

fn scroll(raw: &RawScrollEvent) -> Option<ScrollEvent> {
    Some(ScrollEvent {
        time: finite(raw.time)?,
        delta: finite(raw.delta),
    })
}

fn click(raw: &RawClickEvent) -> Option<ClickEvent> {
    Some(ClickEvent {
        time: finite(raw.time)?,
        target: raw.target.clone(),
    })
}
