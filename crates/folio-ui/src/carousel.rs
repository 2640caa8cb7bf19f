//! Carousel / tab selection controller with auto-advance.
//!
//! A carousel owns a fixed list of items and a single selection. When
//! auto-advance is on and there is more than one item, `tick` moves the
//! selection forward every `interval_ms`. Pointer hover and touches pause
//! the countdown until the interaction ends; manual navigation restarts it.

use std::collections::HashSet;

use folio_types::config::{CarouselConfig, SwipeConfig};
use folio_types::error::{FolioError, Result};
use folio_types::input::{Button, InputEvent, Interaction};
use serde::Serialize;

use crate::swipe::{SwipeIntent, SwipeRecognizer};

/// Anything a carousel can hold.
pub trait CarouselItem {
    /// Identifier, unique within one carousel.
    fn id(&self) -> &str;
}

/// Auto-advance timer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AutoAdvanceState {
    /// Switched off by config, or fewer than two items.
    Disabled,
    Advancing,
    /// Held by a pointer or touch interaction.
    Paused,
    /// The carousel was disposed. Nothing fires again.
    Disposed,
}

/// Serialisable view of a carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CarouselState {
    pub selected_index: Option<usize>,
    pub len: usize,
    pub auto_advance: AutoAdvanceState,
}

#[derive(Debug, Clone)]
struct AutoAdvance {
    state: AutoAdvanceState,
    interval_ms: u32,
    elapsed_ms: u32,
    pointer: bool,
    touch: bool,
}

impl AutoAdvance {
    fn engaged(&self) -> bool {
        self.pointer || self.touch
    }
}

/// An ordered list of items with one selection.
pub struct Carousel<T> {
    items: Vec<T>,
    selected: Option<usize>,
    timer: AutoAdvance,
    swipe: SwipeRecognizer,
}

impl<T: CarouselItem> Carousel<T> {
    /// Create a carousel selecting the first item.
    ///
    /// Fails if two items share an id. An empty list is accepted and
    /// yields an inert carousel.
    pub fn new(items: Vec<T>, config: &CarouselConfig, swipe: &SwipeConfig) -> Result<Self> {
        let mut seen = HashSet::new();
        for item in &items {
            if !seen.insert(item.id()) {
                return Err(FolioError::Content(format!(
                    "duplicate carousel item '{}'",
                    item.id()
                )));
            }
        }
        let state = if config.auto_advance && items.len() > 1 {
            AutoAdvanceState::Advancing
        } else {
            AutoAdvanceState::Disabled
        };
        let selected = (!items.is_empty()).then_some(0);
        Ok(Self {
            items,
            selected,
            timer: AutoAdvance {
                state,
                interval_ms: config.interval_ms.max(1),
                elapsed_ms: 0,
                pointer: false,
                touch: false,
            },
            swipe: SwipeRecognizer::new(swipe),
        })
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&T> {
        self.selected.map(|i| &self.items[i])
    }

    pub fn auto_advance_state(&self) -> AutoAdvanceState {
        self.timer.state
    }

    pub fn state(&self) -> CarouselState {
        CarouselState {
            selected_index: self.selected,
            len: self.items.len(),
            auto_advance: self.timer.state,
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.timer.state == AutoAdvanceState::Disposed
    }

    /// Select the next item, wrapping from last to first.
    pub fn next(&mut self) -> Option<usize> {
        if self.is_disposed() {
            return self.selected;
        }
        self.step(1);
        self.restart_countdown();
        self.selected
    }

    /// Select the previous item, wrapping from first to last.
    pub fn previous(&mut self) -> Option<usize> {
        if self.is_disposed() {
            return self.selected;
        }
        self.step(-1);
        self.restart_countdown();
        self.selected
    }

    /// Select `index` directly. Selecting the current index is a no-op.
    pub fn jump_to(&mut self, index: usize) -> Result<()> {
        if index >= self.items.len() {
            log::warn!(
                "carousel jump to {index} out of range ({} items)",
                self.items.len()
            );
            return Err(FolioError::OutOfRange {
                index,
                len: self.items.len(),
            });
        }
        if self.is_disposed() {
            log::debug!("jump_to({index}) on disposed carousel ignored");
            return Ok(());
        }
        self.selected = Some(index);
        self.restart_countdown();
        Ok(())
    }

    /// Advance time. Returns `true` if the selection moved.
    pub fn tick(&mut self, dt_ms: u32) -> bool {
        if self.timer.state != AutoAdvanceState::Advancing {
            return false;
        }
        let before = self.selected;
        self.timer.elapsed_ms = self.timer.elapsed_ms.saturating_add(dt_ms);
        let steps = self.timer.elapsed_ms / self.timer.interval_ms;
        self.timer.elapsed_ms %= self.timer.interval_ms;
        if steps > 0 && !self.items.is_empty() {
            // Whole laps land back on the same item.
            self.step((steps as usize % self.items.len()) as isize);
        }
        if self.selected != before {
            log::debug!("carousel auto-advanced to {:?}", self.selected);
        }
        self.selected != before
    }

    /// A pointer or touch interaction started: pause auto-advance.
    pub fn begin_interaction(&mut self, kind: Interaction) {
        match kind {
            Interaction::Pointer => self.timer.pointer = true,
            Interaction::Touch => self.timer.touch = true,
        }
        if self.timer.state == AutoAdvanceState::Advancing {
            self.timer.state = AutoAdvanceState::Paused;
        }
    }

    /// An interaction ended: resume once nothing holds the carousel.
    pub fn end_interaction(&mut self, kind: Interaction) {
        match kind {
            Interaction::Pointer => self.timer.pointer = false,
            Interaction::Touch => self.timer.touch = false,
        }
        if self.timer.state == AutoAdvanceState::Paused && !self.timer.engaged() {
            self.timer.state = AutoAdvanceState::Advancing;
            self.timer.elapsed_ms = 0;
        }
    }

    /// Route an input event. Returns `true` if the selection moved.
    pub fn handle_event(&mut self, event: InputEvent) -> Result<bool> {
        if self.is_disposed() {
            return Ok(false);
        }
        let before = self.selected;
        if let Some(kind) = event.starts() {
            self.begin_interaction(kind);
        }
        match event {
            InputEvent::TouchStart { x } => self.swipe.touch_start(x),
            InputEvent::TouchMove { x } => self.swipe.touch_move(x),
            InputEvent::TouchEnd => match self.swipe.touch_end() {
                Some(SwipeIntent::Advance) => {
                    self.next();
                },
                Some(SwipeIntent::Retreat) => {
                    self.previous();
                },
                None => {},
            },
            InputEvent::PointerEnter | InputEvent::PointerLeave => {},
            InputEvent::Button {
                button: Button::Next,
            } => {
                self.next();
            },
            InputEvent::Button {
                button: Button::Previous,
            } => {
                self.previous();
            },
            InputEvent::Select { index } => self.jump_to(index)?,
        }
        if let Some(kind) = event.ends() {
            self.end_interaction(kind);
        }
        Ok(self.selected != before)
    }

    /// Stop the timer for good. Later ticks and events are no-ops.
    pub fn dispose(&mut self) {
        if self.is_disposed() {
            return;
        }
        self.timer.state = AutoAdvanceState::Disposed;
        self.timer.elapsed_ms = 0;
        self.swipe.cancel();
    }

    fn step(&mut self, delta: isize) {
        let Some(current) = self.selected else {
            return;
        };
        let len = self.items.len() as isize;
        self.selected = Some((current as isize + delta).rem_euclid(len) as usize);
    }

    fn restart_countdown(&mut self) {
        self.timer.elapsed_ms = 0;
    }
}
