//! Shared test utilities for folio-ui widget tests.
//!
//! Provides a [`MockViewport`] with settable scroll position and anchor
//! offsets that counts anchor lookups.

use std::cell::Cell;
use std::collections::HashMap;

use crate::scroll::ViewportReader;

/// A viewport whose geometry is set directly by the test.
pub struct MockViewport {
    pub scroll_y: f32,
    pub viewport_height: f32,
    anchors: HashMap<String, f32>,
    queries: Cell<usize>,
}

impl MockViewport {
    pub fn new(viewport_height: f32) -> Self {
        Self {
            scroll_y: 0.0,
            viewport_height,
            anchors: HashMap::new(),
            queries: Cell::new(0),
        }
    }

    pub fn with_anchor(mut self, anchor_id: &str, top: f32) -> Self {
        self.set_anchor(anchor_id, top);
        self
    }

    pub fn set_anchor(&mut self, anchor_id: &str, top: f32) {
        self.anchors.insert(anchor_id.to_string(), top);
    }

    pub fn remove_anchor(&mut self, anchor_id: &str) {
        self.anchors.remove(anchor_id);
    }

    pub fn scroll_to(&mut self, y: f32) {
        self.scroll_y = y;
    }

    /// Number of `anchor_offset` calls so far.
    pub fn query_count(&self) -> usize {
        self.queries.get()
    }
}

impl ViewportReader for MockViewport {
    fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    fn anchor_offset(&self, anchor_id: &str) -> Option<f32> {
        self.queries.set(self.queries.get() + 1);
        self.anchors.get(anchor_id).copied()
    }
}

/// Minimal carousel item for controller tests.
#[derive(Debug, Clone, PartialEq)]
pub struct Item(pub &'static str);

impl crate::carousel::CarouselItem for Item {
    fn id(&self) -> &str {
        self.0
    }
}

pub fn items(ids: &[&'static str]) -> Vec<Item> {
    ids.iter().map(|&id| Item(id)).collect()
}
