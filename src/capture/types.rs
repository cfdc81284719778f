//! Interaction capture records.
//!
//! Raw records mirror what the ingestion layer posts. Every field is optional
//! so a malformed entry can be recognised and dropped by the normalizer
//! instead of failing deserialization of the whole submission.

use serde::{Deserialize, Serialize};

/// Keystroke as posted by the editor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawKeystroke {
    #[serde(default, alias = "timestamp", deserialize_with = "lenient::number")]
    pub time: Option<f64>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub key: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_backspace: Option<bool>,
}

/// Pointer sample as posted by the page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPointerSample {
    #[serde(default, alias = "timestamp", deserialize_with = "lenient::number")]
    pub time: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub x: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub y: Option<f64>,
    /// Distance travelled since the previous sample, if computed upstream
    #[serde(default, deserialize_with = "lenient::number")]
    pub distance: Option<f64>,
    /// Velocity at this sample, if computed upstream
    #[serde(default, deserialize_with = "lenient::number")]
    pub velocity: Option<f64>,
}

/// Zone change as posted by the page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawZoneEvent {
    #[serde(default, alias = "timestamp", deserialize_with = "lenient::number")]
    pub time: Option<f64>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub zone: Option<String>,
}

/// Scroll event as posted by the page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawScrollEvent {
    #[serde(default, alias = "timestamp", deserialize_with = "lenient::number")]
    pub time: Option<f64>,
    #[serde(default, alias = "deltaY", deserialize_with = "lenient::number")]
    pub delta: Option<f64>,
}

/// Click event as posted by the page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawClickEvent {
    #[serde(default, alias = "timestamp", deserialize_with = "lenient::number")]
    pub time: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub x: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub y: Option<f64>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub target: Option<String>,
}

/// A student's submission: the sole input of the engine.
///
/// Field names follow the ingestion layer's JSON (camelCase), with aliases
/// for the older capture names. A missing or mistyped field takes its
/// default; an event entry that is not an object is kept as an empty record
/// so the normalizer counts it as dropped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    #[serde(default, deserialize_with = "lenient::text")]
    pub student_id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub text: String,
    /// Word count reported by the client; derived from `text` when zero
    #[serde(default, deserialize_with = "lenient::count")]
    pub word_count: u32,
    #[serde(default, alias = "timeSpent", deserialize_with = "lenient::count")]
    pub time_spent_ms: u64,
    /// Conversational turns exchanged with the writing agent
    #[serde(default, deserialize_with = "lenient::count")]
    pub message_count: u32,
    #[serde(default, deserialize_with = "lenient::records")]
    pub keystrokes: Vec<RawKeystroke>,
    #[serde(
        default,
        alias = "mouseMovements",
        deserialize_with = "lenient::records"
    )]
    pub pointer_samples: Vec<RawPointerSample>,
    #[serde(default, alias = "zoneChanges", deserialize_with = "lenient::records")]
    pub zone_events: Vec<RawZoneEvent>,
    #[serde(default, deserialize_with = "lenient::records")]
    pub scroll_events: Vec<RawScrollEvent>,
    #[serde(default, deserialize_with = "lenient::records")]
    pub click_events: Vec<RawClickEvent>,
}

/// A validated keystroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeystrokeEvent {
    /// Milliseconds since capture start
    pub time: f64,
    pub key: String,
    pub is_backspace: bool,
}

impl KeystrokeEvent {
    pub fn new(time: f64, key: impl Into<String>) -> Self {
        let key = key.into();
        let is_backspace = key == "Backspace";
        Self {
            time,
            key,
            is_backspace,
        }
    }
}

/// A validated pointer sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerSample {
    pub time: f64,
    pub x: f64,
    pub y: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub velocity: Option<f64>,
}

impl PointerSample {
    pub fn at(time: f64, x: f64, y: f64) -> Self {
        Self {
            time,
            x,
            y,
            distance: None,
            velocity: None,
        }
    }
}

/// A validated zone change: attention moved into `zone` at `time`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneEvent {
    pub time: f64,
    pub zone: String,
}

/// A validated scroll event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollEvent {
    pub time: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta: Option<f64>,
}

/// A validated click event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClickEvent {
    pub time: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

/// Event kind classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    Keystroke,
    PointerMove,
    ZoneChange,
    Scroll,
    Click,
}

/// Unified interaction event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "kebab-case")]
pub enum InteractionEvent {
    Keystroke(KeystrokeEvent),
    PointerMove(PointerSample),
    ZoneChange(ZoneEvent),
    Scroll(ScrollEvent),
    Click(ClickEvent),
}

impl InteractionEvent {
    pub fn timestamp(&self) -> f64 {
        match self {
            InteractionEvent::Keystroke(e) => e.time,
            InteractionEvent::PointerMove(e) => e.time,
            InteractionEvent::ZoneChange(e) => e.time,
            InteractionEvent::Scroll(e) => e.time,
            InteractionEvent::Click(e) => e.time,
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            InteractionEvent::Keystroke(_) => EventKind::Keystroke,
            InteractionEvent::PointerMove(_) => EventKind::PointerMove,
            InteractionEvent::ZoneChange(_) => EventKind::ZoneChange,
            InteractionEvent::Scroll(_) => EventKind::Scroll,
            InteractionEvent::Click(_) => EventKind::Click,
        }
    }
}

/// Lenient field decoding for posted capture data.
///
/// Numbers and numeric strings are accepted where a number is expected;
/// anything else becomes `None` (or the field default) so one bad value
/// never fails the whole submission.
mod lenient {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
        .filter(|v| v.is_finite()))
    }

    /// Non-negative whole count, rounded; the default otherwise.
    pub fn count<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: TryFrom<u64> + Default,
    {
        Ok(number(deserializer)?
            .filter(|v| *v >= 0.0)
            .and_then(|v| T::try_from(v.round() as u64).ok())
            .unwrap_or_default())
    }

    /// Strings as-is, numbers in their decimal form, anything else `None`.
    pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::String(s)) => Some(s),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        })
    }

    pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(string(deserializer)?.unwrap_or_default())
    }

    pub fn flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::Bool(b)) => Some(b),
            Some(Value::String(s)) => s.trim().parse::<bool>().ok(),
            _ => None,
        })
    }

    /// Event list where each undecodable entry becomes `T::default()`.
    ///
    /// A non-array value yields an empty list.
    pub fn records<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::Array(items)) => items
                .into_iter()
                .map(|item| serde_json::from_value(item).unwrap_or_default())
                .collect(),
            _ => Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_serialization() {
        let json = serde_json::to_string(&EventKind::PointerMove).unwrap();
        assert_eq!(json, "\"pointer-move\"");
    }

    #[test]
    fn test_keystroke_backspace_from_key() {
        assert!(KeystrokeEvent::new(0.0, "Backspace").is_backspace);
        assert!(!KeystrokeEvent::new(0.0, "a").is_backspace);
    }

    #[test]
    fn test_submission_deserialization_with_aliases() {
        let json = r#"{
            "studentId": "aluno-7",
            "text": "Eu gosto de ler.",
            "wordCount": 4,
            "timeSpent": 90000,
            "messageCount": 2,
            "keystrokes": [{"time": 10, "key": "E"}, {"time": "25", "key": "u"}],
            "mouseMovements": [{"time": 5, "x": 1, "y": 2, "velocity": 0.4}],
            "zoneChanges": [{"zone": "editor", "timestamp": 0}]
        }"#;

        let submission: Submission = serde_json::from_str(json).unwrap();
        assert_eq!(submission.student_id, "aluno-7");
        assert_eq!(submission.time_spent_ms, 90000);
        assert_eq!(submission.keystrokes.len(), 2);
        assert_eq!(submission.keystrokes[1].time, Some(25.0));
        assert_eq!(submission.pointer_samples[0].velocity, Some(0.4));
        assert_eq!(submission.zone_events[0].time, Some(0.0));
        assert!(submission.click_events.is_empty());
    }

    #[test]
    fn test_malformed_number_becomes_none() {
        let raw: RawKeystroke = serde_json::from_str(r#"{"time": "soon", "key": "a"}"#).unwrap();
        assert_eq!(raw.time, None);

        let raw: RawKeystroke = serde_json::from_str(r#"{"time": null}"#).unwrap();
        assert_eq!(raw.time, None);
    }

    #[test]
    fn test_mistyped_submission_fields_take_defaults() {
        let json = r#"{
            "studentId": 42,
            "text": null,
            "wordCount": "12",
            "timeSpent": 60000.5,
            "messageCount": -3
        }"#;

        let submission: Submission = serde_json::from_str(json).unwrap();
        assert_eq!(submission.student_id, "42");
        assert_eq!(submission.text, "");
        assert_eq!(submission.word_count, 12);
        assert_eq!(submission.time_spent_ms, 60001);
        assert_eq!(submission.message_count, 0);
    }

    #[test]
    fn test_numeric_string_time_spent() {
        let submission: Submission =
            serde_json::from_str(r#"{"timeSpent": "60000", "text": ["x"]}"#).unwrap();
        assert_eq!(submission.time_spent_ms, 60000);
        assert_eq!(submission.text, "");
    }

    #[test]
    fn test_bad_event_entries_kept_as_empty_records() {
        let json = r#"{
            "keystrokes": [{"time": 1, "key": "a"}, null, {"time": 2, "key": 65}, "x"],
            "zoneChanges": [{"time": 0, "zone": ["editor"]}],
            "clickEvents": {"time": 1}
        }"#;

        let submission: Submission = serde_json::from_str(json).unwrap();
        assert_eq!(submission.keystrokes.len(), 4);
        assert_eq!(submission.keystrokes[1].time, None);
        assert_eq!(submission.keystrokes[2].key.as_deref(), Some("65"));
        assert_eq!(submission.keystrokes[3].time, None);
        assert_eq!(submission.zone_events[0].zone, None);
        assert!(submission.click_events.is_empty());
    }

    #[test]
    fn test_lenient_backspace_flag() {
        let raw: RawKeystroke =
            serde_json::from_str(r#"{"time": 3, "isBackspace": "true"}"#).unwrap();
        assert_eq!(raw.is_backspace, Some(true));

        let raw: RawKeystroke = serde_json::from_str(r#"{"time": 3, "isBackspace": 1}"#).unwrap();
        assert_eq!(raw.is_backspace, None);
    }

    #[test]
    fn test_interaction_event_accessors() {
        let event = InteractionEvent::ZoneChange(ZoneEvent {
            time: 1500.0,
            zone: "agent".to_string(),
        });
        assert_eq!(event.timestamp(), 1500.0);
        assert_eq!(event.kind(), EventKind::ZoneChange);
    }
}
