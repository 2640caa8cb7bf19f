//! Platform-agnostic input event types.
//!
//! The host page maps its native pointer, touch and click events to these
//! enums. Scroll and resize are not events here: the controllers read the
//! viewport directly when notified.

use serde::{Deserialize, Serialize};

/// An interaction targeted at a single widget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputEvent {
    /// Finger touched down at horizontal position `x`.
    TouchStart { x: f32 },
    /// Finger moved to horizontal position `x`.
    TouchMove { x: f32 },
    /// Finger lifted.
    TouchEnd,
    /// Pointer entered the widget bounds.
    PointerEnter,
    /// Pointer left the widget bounds.
    PointerLeave,
    /// A navigation button was clicked.
    Button { button: Button },
    /// A tab (or dot indicator) at `index` was clicked.
    Select { index: usize },
}

/// Navigation buttons rendered next to a carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Button {
    Next,
    Previous,
}

/// Which kind of user engagement is holding a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interaction {
    Pointer,
    Touch,
}

impl InputEvent {
    /// The interaction this event starts, if any.
    pub fn starts(&self) -> Option<Interaction> {
        match self {
            Self::TouchStart { .. } => Some(Interaction::Touch),
            Self::PointerEnter => Some(Interaction::Pointer),
            _ => None,
        }
    }

    /// The interaction this event ends, if any.
    pub fn ends(&self) -> Option<Interaction> {
        match self {
            Self::TouchEnd => Some(Interaction::Touch),
            Self::PointerLeave => Some(Interaction::Pointer),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touch_events_carry_position() {
        let e = InputEvent::TouchStart { x: 300.0 };
        if let InputEvent::TouchStart { x } = e {
            assert_eq!(x, 300.0);
        } else {
            panic!("wrong variant");
        }
    }

    #[test]
    fn start_and_end_pairs() {
        assert_eq!(
            InputEvent::TouchStart { x: 0.0 }.starts(),
            Some(Interaction::Touch)
        );
        assert_eq!(InputEvent::TouchEnd.ends(), Some(Interaction::Touch));
        assert_eq!(InputEvent::PointerEnter.starts(), Some(Interaction::Pointer));
        assert_eq!(InputEvent::PointerLeave.ends(), Some(Interaction::Pointer));
    }

    #[test]
    fn navigation_events_neither_start_nor_end() {
        let events = [
            InputEvent::TouchMove { x: 1.0 },
            InputEvent::Button {
                button: Button::Next,
            },
            InputEvent::Select { index: 2 },
        ];
        for e in events {
            assert_eq!(e.starts(), None);
            assert_eq!(e.ends(), None);
        }
    }

    #[test]
    fn event_deserializes_from_tagged_json() {
        let e: InputEvent = serde_json::from_str(r#"{"kind":"touch_move","x":12.5}"#).unwrap();
        assert_eq!(e, InputEvent::TouchMove { x: 12.5 });
        let e: InputEvent =
            serde_json::from_str(r#"{"kind":"button","button":"previous"}"#).unwrap();
        assert_eq!(
            e,
            InputEvent::Button {
                button: Button::Previous
            }
        );
    }

    #[test]
    fn interaction_hash_distinct() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(Interaction::Pointer);
        set.insert(Interaction::Touch);
        set.insert(Interaction::Pointer);
        assert_eq!(set.len(), 2);
    }
}
