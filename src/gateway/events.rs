use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Gesture labels the synthetic emitter picks from.
pub const GESTURE_LABELS: [&str; 6] = [
    "swipe_left",
    "swipe_right",
    "push",
    "tap",
    "rotate_clockwise",
    "rotate_counterclockwise",
];

/// Value of `source` on every server-generated event.
pub const DEBUG_SOURCE: &str = "debug";

/// Wire message, discriminated by its `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    Command(CommandEvent),
    Gesture(GestureEvent),
    DriverState(DriverStateEvent),
    #[serde(other)]
    Unknown,
}

impl Event {
    pub fn kind(&self) -> &'static str {
        match self {
            Event::Command(_) => "command",
            Event::Gesture(_) => "gesture",
            Event::DriverState(_) => "driver_state",
            Event::Unknown => "unknown",
        }
    }
}

/// Client control message, e.g. `{"type":"command","cmd":"toggle_gesture_debug"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmd: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ts: Option<f64>,
    pub gesture: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Fields outside the schema, carried through relay untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverStateEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ts: Option<f64>,
    #[serde(default)]
    pub fatigue: bool,
    #[serde(default)]
    pub yawn: bool,
    #[serde(default)]
    pub eye_closed: bool,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub source: String,
}

/// Current wall-clock time in seconds, millisecond precision.
pub fn now_ts() -> f64 {
    Utc::now().timestamp_millis() as f64 / 1000.0
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_command() {
        let event: Event =
            serde_json::from_str(r#"{"type":"command","cmd":"toggle_driver_debug"}"#).unwrap();
        assert_eq!(
            event,
            Event::Command(CommandEvent {
                cmd: Some("toggle_driver_debug".to_string())
            })
        );
    }

    #[test]
    fn test_decode_command_without_cmd() {
        let event: Event = serde_json::from_str(r#"{"type":"command"}"#).unwrap();
        assert_eq!(event, Event::Command(CommandEvent { cmd: None }));
    }

    #[test]
    fn test_decode_gesture_minimal() {
        let event: Event = serde_json::from_str(r#"{"type":"gesture","gesture":"tap"}"#).unwrap();
        match event {
            Event::Gesture(g) => {
                assert_eq!(g.gesture, "tap");
                assert!(g.ts.is_none());
                assert!(g.confidence.is_none());
            }
            other => panic!("expected gesture, got {other:?}"),
        }
    }

    #[test]
    fn test_gesture_missing_label_is_decode_error() {
        assert!(serde_json::from_str::<Event>(r#"{"type":"gesture","ts":1.0}"#).is_err());
    }

    #[test]
    fn test_unknown_type_decodes_to_unknown() {
        let event: Event = serde_json::from_str(r#"{"type":"telemetry","x":1}"#).unwrap();
        assert_eq!(event, Event::Unknown);
    }

    #[test]
    fn test_missing_type_is_decode_error() {
        assert!(serde_json::from_str::<Event>(r#"{"cmd":"toggle_gesture_debug"}"#).is_err());
        assert!(serde_json::from_str::<Event>("not json").is_err());
    }

    #[test]
    fn test_driver_state_wire_shape() {
        let event = Event::DriverState(DriverStateEvent {
            ts: Some(12.5),
            fatigue: true,
            yawn: false,
            eye_closed: true,
            confidence: 0.95,
            source: DEBUG_SOURCE.to_string(),
        });
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "driver_state",
                "ts": 12.5,
                "fatigue": true,
                "yawn": false,
                "eye_closed": true,
                "confidence": 0.95,
                "source": "debug"
            })
        );
    }

    #[test]
    fn test_gesture_omits_absent_fields() {
        let event = Event::Gesture(GestureEvent {
            ts: None,
            gesture: "push".to_string(),
            confidence: None,
            source: None,
            extra: Default::default(),
        });
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value, json!({ "type": "gesture", "gesture": "push" }));
    }

    #[test]
    fn test_gesture_keeps_unknown_fields() {
        let input = json!({
            "type": "gesture",
            "ts": 1.5,
            "gesture": "tap",
            "confidence": 0.9,
            "source": "camera",
            "hand": "left",
            "frame": 42
        });
        let event: Event = serde_json::from_value(input.clone()).unwrap();
        match &event {
            Event::Gesture(g) => {
                assert_eq!(g.extra.len(), 2);
                assert!(!g.extra.contains_key("type"));
            }
            other => panic!("expected gesture, got {other:?}"),
        }
        assert_eq!(serde_json::to_value(&event).unwrap(), input);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(0.876), 0.88);
        assert_eq!(round2(1.0), 1.0);
    }
}
