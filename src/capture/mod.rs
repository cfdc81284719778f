//! Input records for the analytics engine.
//!
//! The ingestion layer assembles a [`Submission`] from posted event data.
//! Raw event lists are validated and sorted by [`crate::core::normalize`]
//! into the typed events defined here.

pub mod types;

// Re-export commonly used types
pub use types::{
    ClickEvent, EventKind, InteractionEvent, KeystrokeEvent, PointerSample, RawClickEvent,
    RawKeystroke, RawPointerSample, RawScrollEvent, RawZoneEvent, ScrollEvent, Submission,
    ZoneEvent,
};
