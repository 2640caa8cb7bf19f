//! Horizontal swipe gesture recognition.

use folio_types::config::SwipeConfig;
use serde::Serialize;

/// A discrete navigation intent produced by a completed swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeIntent {
    /// Finger moved left: reveal the next item.
    Advance,
    /// Finger moved right: reveal the previous item.
    Retreat,
}

/// One touch interaction in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SwipeGesture {
    start_x: f32,
    current_x: Option<f32>,
}

/// Turns touch start/move/end into [`SwipeIntent`]s.
#[derive(Debug, Clone)]
pub struct SwipeRecognizer {
    gesture: Option<SwipeGesture>,
    min_distance: f32,
}

impl SwipeRecognizer {
    pub fn new(config: &SwipeConfig) -> Self {
        Self {
            gesture: None,
            min_distance: config.min_distance,
        }
    }

    /// Begin a gesture at `x`. An unfinished gesture is discarded.
    pub fn touch_start(&mut self, x: f32) {
        if !x.is_finite() {
            return;
        }
        self.gesture = Some(SwipeGesture {
            start_x: x,
            current_x: None,
        });
    }

    /// Record the latest finger position. Ignored without a gesture.
    pub fn touch_move(&mut self, x: f32) {
        if !x.is_finite() {
            return;
        }
        if let Some(gesture) = self.gesture.as_mut() {
            gesture.current_x = Some(x);
        }
    }

    /// Finish the gesture. A tap (no move) or a short drag yields `None`.
    pub fn touch_end(&mut self) -> Option<SwipeIntent> {
        let gesture = self.gesture.take()?;
        let current_x = gesture.current_x?;
        let distance = gesture.start_x - current_x;
        if distance > self.min_distance {
            Some(SwipeIntent::Advance)
        } else if distance < -self.min_distance {
            Some(SwipeIntent::Retreat)
        } else {
            None
        }
    }

    /// Drop any gesture in progress.
    pub fn cancel(&mut self) {
        self.gesture = None;
    }

    pub fn is_tracking(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn min_distance(&self) -> f32 {
        self.min_distance
    }
}
