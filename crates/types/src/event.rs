use serde::{Deserialize, Serialize};

use crate::state::VisualState;

/// Input delivered by the host to the focused OTP field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum OtpEvent {
    /// A character typed into the active slot.
    Char(char),
    /// The delete/backspace key was pressed in the active slot.
    Delete,
    /// Text pasted into the active slot.
    Paste(String),
    /// The widget was tapped or clicked.
    Tap,
}

/// Host-visible consequence of handling an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OtpEffect {
    /// Every slot is filled; `code` is their in-order concatenation.
    Completed { code: String },
    /// The active (editable) slot moved.
    FocusMoved { from: usize, to: usize },
    /// The host should place input focus on this slot.
    FocusSlot { index: usize },
    /// The host should bring up its keyboard, if it has one.
    ShowKeyboard,
    /// The visual state changed.
    StateChanged { from: VisualState, to: VisualState },
    /// All slots were cleared and focus returned to the first one.
    Reset,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effects_serialize_with_type_tag() {
        let json = serde_json::to_value(OtpEffect::Completed { code: "123".into() }).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "completed", "code": "123" }));

        let json = serde_json::to_value(OtpEffect::StateChanged {
            from: VisualState::Normal,
            to: VisualState::Error,
        })
        .unwrap();
        assert_eq!(json["to"], "error");
    }

    #[test]
    fn events_round_trip_through_json() {
        let event: OtpEvent = serde_json::from_str(r#"{ "type": "paste", "value": "4321" }"#).unwrap();
        assert_eq!(event, OtpEvent::Paste("4321".into()));
        let event: OtpEvent = serde_json::from_str(r#"{ "type": "delete" }"#).unwrap();
        assert_eq!(event, OtpEvent::Delete);
    }
}
