//! Gesture event types for driving the photo transform.
//!
//! Gesture scripts are JSONL: one event object per line, `#` lines are
//! comments. Coordinates are client pixels; only their deltas matter.

use serde::{Deserialize, Serialize};

/// A single touch contact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub x: f64,
    pub y: f64,
}

impl TouchPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another touch.
    pub fn distance_to(&self, other: &TouchPoint) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

/// Discriminated union of gesture inputs on the drawing surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GestureEvent {
    /// Mouse button pressed over the surface.
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        button: MouseButton,
    },

    /// Mouse moved over the surface.
    PointerMove { x: f64, y: f64 },

    /// Mouse button released.
    PointerUp,

    /// Pointer left the surface.
    PointerLeave,

    /// One or more fingers touched down; `touches` lists all active contacts.
    TouchStart { touches: Vec<TouchPoint> },

    /// Active contacts moved.
    TouchMove { touches: Vec<TouchPoint> },

    /// A finger lifted; `touches` lists the contacts still down.
    TouchEnd {
        #[serde(default)]
        touches: Vec<TouchPoint>,
    },

    /// Scroll wheel; negative `delta_y` scrolls up.
    Wheel { delta_y: f64 },
}

impl GestureEvent {
    pub fn pointer_down(x: f64, y: f64) -> Self {
        Self::PointerDown {
            x,
            y,
            button: MouseButton::Left,
        }
    }

    pub fn pointer_move(x: f64, y: f64) -> Self {
        Self::PointerMove { x, y }
    }

    pub fn wheel(delta_y: f64) -> Self {
        Self::Wheel { delta_y }
    }

    /// Number of active touches carried by a touch event, zero otherwise.
    pub fn touch_count(&self) -> usize {
        match self {
            Self::TouchStart { touches }
            | Self::TouchMove { touches }
            | Self::TouchEnd { touches } => touches.len(),
            _ => 0,
        }
    }
}

/// Distance between the first two touches, if there are at least two.
pub fn pinch_distance(touches: &[TouchPoint]) -> Option<f64> {
    match touches {
        [a, b, ..] => Some(a.distance_to(b)),
        _ => None,
    }
}

/// Parse gestures from JSONL content (one JSON object per line).
pub fn parse_gestures(jsonl: &str) -> Result<Vec<GestureEvent>, serde_json::Error> {
    jsonl
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(serde_json::from_str)
        .collect()
}

/// Serialize gestures to JSONL format.
pub fn serialize_gestures(events: &[GestureEvent]) -> Result<String, serde_json::Error> {
    let mut output = String::new();
    for event in events {
        output.push_str(&serde_json::to_string(event)?);
        output.push('\n');
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_shape_is_tagged_snake_case() {
        let json = serde_json::to_string(&GestureEvent::wheel(-120.0)).unwrap();
        assert_eq!(json, r#"{"type":"wheel","delta_y":-120.0}"#);

        let json = serde_json::to_string(&GestureEvent::PointerUp).unwrap();
        assert_eq!(json, r#"{"type":"pointer_up"}"#);
    }

    #[test]
    fn pointer_down_defaults_to_left_button() {
        let parsed: GestureEvent =
            serde_json::from_str(r#"{"type":"pointer_down","x":1,"y":2}"#).unwrap();
        assert_eq!(parsed, GestureEvent::pointer_down(1.0, 2.0));
    }

    #[test]
    fn parse_skips_comments_and_blank_lines() {
        let script = "# drag then zoom\n\n{\"type\":\"pointer_down\",\"x\":0,\"y\":0}\n  \n{\"type\":\"wheel\",\"delta_y\":-1}\n";
        let events = parse_gestures(script).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1], GestureEvent::wheel(-1.0));
    }

    #[test]
    fn parse_rejects_unknown_event_type() {
        assert!(parse_gestures(r#"{"type":"keypress","code":"KeyA"}"#).is_err());
    }

    #[test]
    fn script_survives_serialization() {
        let events = vec![
            GestureEvent::TouchStart {
                touches: vec![TouchPoint::new(0.0, 0.0), TouchPoint::new(30.0, 40.0)],
            },
            GestureEvent::TouchEnd { touches: vec![] },
            GestureEvent::PointerLeave,
        ];
        let jsonl = serialize_gestures(&events).unwrap();
        assert_eq!(jsonl.lines().count(), 3);
        assert_eq!(parse_gestures(&jsonl).unwrap(), events);
    }

    #[test]
    fn pinch_distance_needs_two_touches() {
        assert_eq!(pinch_distance(&[TouchPoint::new(1.0, 1.0)]), None);
        let d = pinch_distance(&[TouchPoint::new(0.0, 0.0), TouchPoint::new(3.0, 4.0)]);
        assert_eq!(d, Some(5.0));
    }
}
