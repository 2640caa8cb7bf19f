//! Viewport scroll tracking and active-section detection.
//!
//! The tracker decides which page section the nav bar highlights. It
//! probes a point one third of the way down the viewport and picks the
//! bottom-most section whose anchor top sits at or above that point.

use std::collections::HashSet;

use folio_types::config::ScrollConfig;
use folio_types::error::{FolioError, Result};
use serde::{Deserialize, Serialize};

/// Read access to the host viewport.
pub trait ViewportReader {
    /// Current vertical scroll offset in pixels.
    fn scroll_y(&self) -> f32;

    /// Visible viewport height in pixels.
    fn viewport_height(&self) -> f32;

    /// Top offset of the element with this anchor id, or `None` if it is
    /// not rendered.
    fn anchor_offset(&self, anchor_id: &str) -> Option<f32>;
}

/// One navigable page region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub anchor_id: String,
    pub label: String,
    pub order: usize,
}

impl Section {
    pub fn new(anchor_id: &str, label: &str, order: usize) -> Self {
        Self {
            anchor_id: anchor_id.to_string(),
            label: label.to_string(),
            order,
        }
    }
}

/// Derived scroll state, recomputed on every scroll or resize.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScrollState {
    pub scroll_y: f32,
    pub viewport_height: f32,
    pub active_index: usize,
    /// Nav bar switches to its solid background.
    pub scrolled: bool,
    pub show_back_to_top: bool,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            scroll_y: 0.0,
            viewport_height: 0.0,
            active_index: 0,
            scrolled: false,
            show_back_to_top: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Detached,
    Attached,
    TornDown,
}

/// Index of the last section whose top is at or above `probe_y`.
///
/// Unresolved anchors (`None`) never match. Returns `None` when no section
/// qualifies.
pub fn active_section(offsets: &[Option<f32>], probe_y: f32) -> Option<usize> {
    offsets
        .iter()
        .rposition(|top| top.is_some_and(|top| top <= probe_y))
}

/// Tracks which section is active as the viewport scrolls.
#[derive(Debug)]
pub struct ScrollTracker {
    sections: Vec<Section>,
    /// Anchor offsets from the last viewport read, parallel to `sections`.
    offsets: Vec<Option<f32>>,
    state: ScrollState,
    config: ScrollConfig,
    lifecycle: Lifecycle,
}

impl ScrollTracker {
    /// Build a tracker over `sections`.
    ///
    /// Sections are sorted by `order`, which must then run `0..N` without
    /// gaps; anchor ids must be unique and at least one section is needed.
    pub fn new(mut sections: Vec<Section>, config: ScrollConfig) -> Result<Self> {
        if sections.is_empty() {
            return Err(FolioError::Content("page has no sections".into()));
        }
        sections.sort_by_key(|s| s.order);
        let mut seen = HashSet::new();
        for (i, section) in sections.iter().enumerate() {
            if section.order != i {
                return Err(FolioError::Content(format!(
                    "section '{}' has order {} but position {i}",
                    section.anchor_id, section.order
                )));
            }
            if !seen.insert(section.anchor_id.as_str()) {
                return Err(FolioError::Content(format!(
                    "duplicate section anchor '{}'",
                    section.anchor_id
                )));
            }
        }
        let offsets = vec![None; sections.len()];
        Ok(Self {
            sections,
            offsets,
            state: ScrollState::default(),
            config,
            lifecycle: Lifecycle::Detached,
        })
    }

    /// Attach to the viewport: resolve every anchor and compute the
    /// initial active section.
    pub fn init(&mut self, viewport: &dyn ViewportReader) -> usize {
        if self.lifecycle == Lifecycle::TornDown {
            log::warn!("scroll tracker re-initialised after teardown");
        }
        self.lifecycle = Lifecycle::Attached;
        self.resolve_all(viewport);
        self.update(viewport);
        log::debug!(
            "scroll tracker attached, active section '{}'",
            self.active_section().anchor_id
        );
        self.state.active_index
    }

    /// Handle a scroll event. Returns the new active index if it changed.
    pub fn on_scroll(&mut self, viewport: &dyn ViewportReader) -> Option<usize> {
        if self.lifecycle != Lifecycle::Attached {
            return None;
        }
        self.resolve_all(viewport);
        self.update(viewport)
    }

    /// Handle a resize: layout moved, so every anchor is re-resolved.
    pub fn on_resize(&mut self, viewport: &dyn ViewportReader) -> Option<usize> {
        if self.lifecycle != Lifecycle::Attached {
            return None;
        }
        self.resolve_all(viewport);
        self.update(viewport)
    }

    /// Force the active section, as a nav-link click does.
    pub fn set_active(&mut self, index: usize) -> Result<()> {
        if index >= self.sections.len() {
            log::warn!(
                "nav selection {index} out of range ({} sections)",
                self.sections.len()
            );
            return Err(FolioError::OutOfRange {
                index,
                len: self.sections.len(),
            });
        }
        self.state.active_index = index;
        Ok(())
    }

    /// Detach from the viewport. Later scroll and resize events are ignored.
    pub fn teardown(&mut self) {
        if self.lifecycle == Lifecycle::TornDown {
            return;
        }
        self.lifecycle = Lifecycle::TornDown;
        self.offsets.iter_mut().for_each(|o| *o = None);
        log::debug!("scroll tracker torn down");
    }

    pub fn is_attached(&self) -> bool {
        self.lifecycle == Lifecycle::Attached
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    pub fn active_index(&self) -> usize {
        self.state.active_index
    }

    pub fn active_section(&self) -> &Section {
        &self.sections[self.state.active_index]
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    fn resolve_all(&mut self, viewport: &dyn ViewportReader) {
        for (section, offset) in self.sections.iter().zip(self.offsets.iter_mut()) {
            *offset = viewport.anchor_offset(&section.anchor_id);
        }
    }

    fn update(&mut self, viewport: &dyn ViewportReader) -> Option<usize> {
        let scroll_y = viewport.scroll_y();
        let scroll_y = if scroll_y.is_finite() {
            scroll_y.max(0.0)
        } else {
            0.0
        };
        let height = viewport.viewport_height();
        if height.is_finite() && height > 0.0 {
            self.state.viewport_height = height;
        } else {
            log::warn!("ignoring viewport height {height}");
        }

        self.state.scroll_y = scroll_y;
        self.state.scrolled = scroll_y > self.config.scrolled_threshold;
        self.state.show_back_to_top = scroll_y > self.config.back_to_top_threshold;

        let probe = scroll_y + self.state.viewport_height * self.config.active_fraction;
        let previous = self.state.active_index;
        if let Some(index) = active_section(&self.offsets, probe) {
            self.state.active_index = index;
        }
        (self.state.active_index != previous).then_some(self.state.active_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockViewport;
    use proptest::prelude::*;

    fn three_sections() -> Vec<Section> {
        vec![
            Section::new("home", "Home", 0),
            Section::new("about", "About", 1),
            Section::new("skills", "Skills", 2),
        ]
    }

    fn three_section_viewport() -> MockViewport {
        MockViewport::new(900.0)
            .with_anchor("home", 0.0)
            .with_anchor("about", 800.0)
            .with_anchor("skills", 1600.0)
    }

    fn tracker() -> ScrollTracker {
        ScrollTracker::new(three_sections(), ScrollConfig::default()).unwrap()
    }

    #[test]
    fn reference_scenario() {
        let mut vp = three_section_viewport();
        let mut t = tracker();
        assert_eq!(t.init(&vp), 0);

        vp.scroll_to(850.0);
        assert_eq!(t.on_scroll(&vp), Some(1));
        assert_eq!(t.active_section().anchor_id, "about");

        vp.scroll_to(1650.0);
        assert_eq!(t.on_scroll(&vp), Some(2));

        vp.scroll_to(0.0);
        assert_eq!(t.on_scroll(&vp), Some(0));
    }

    #[test]
    fn unchanged_section_reports_none() {
        let mut vp = three_section_viewport();
        let mut t = tracker();
        t.init(&vp);
        vp.scroll_to(10.0);
        assert_eq!(t.on_scroll(&vp), None);
        assert_eq!(t.active_index(), 0);
    }

    #[test]
    fn boundary_is_inclusive() {
        // 500 + 900/3 = 800, exactly the top of "about".
        let mut vp = three_section_viewport();
        let mut t = tracker();
        t.init(&vp);
        vp.scroll_to(500.0);
        assert_eq!(t.on_scroll(&vp), Some(1));
    }

    #[test]
    fn later_section_wins_ties() {
        let vp = MockViewport::new(900.0)
            .with_anchor("home", 0.0)
            .with_anchor("about", 100.0)
            .with_anchor("skills", 100.0);
        let mut t = tracker();
        assert_eq!(t.init(&vp), 2);
    }

    #[test]
    fn missing_anchor_never_active() {
        let mut vp = MockViewport::new(900.0)
            .with_anchor("home", 0.0)
            .with_anchor("skills", 1600.0);
        let mut t = tracker();
        t.init(&vp);
        vp.scroll_to(850.0);
        assert_eq!(t.on_scroll(&vp), None);
        assert_eq!(t.active_index(), 0);
    }

    #[test]
    fn late_anchor_is_picked_up_on_scroll() {
        let mut vp = MockViewport::new(900.0).with_anchor("home", 0.0);
        let mut t = tracker();
        t.init(&vp);
        vp.set_anchor("about", 800.0);
        vp.scroll_to(850.0);
        assert_eq!(t.on_scroll(&vp), Some(1));
    }

    #[test]
    fn anchor_moved_between_scrolls_uses_current_offset() {
        let mut vp = three_section_viewport();
        let mut t = tracker();
        t.init(&vp);
        // "about" pushed down by content above it, no resize.
        vp.set_anchor("about", 2000.0);
        vp.scroll_to(850.0);
        t.on_scroll(&vp);
        assert_eq!(t.active_index(), 0);
    }

    #[test]
    fn anchor_removed_between_scrolls_is_skipped() {
        let mut vp = three_section_viewport();
        let mut t = tracker();
        t.init(&vp);
        vp.remove_anchor("skills");
        vp.scroll_to(1650.0);
        assert_eq!(t.on_scroll(&vp), Some(1));
    }

    #[test]
    fn each_scroll_reads_every_anchor_once() {
        let mut vp = three_section_viewport();
        let mut t = tracker();
        t.init(&vp);
        let after_init = vp.query_count();
        for y in 0..10 {
            vp.scroll_to(y as f32 * 40.0);
            t.on_scroll(&vp);
        }
        assert_eq!(vp.query_count(), after_init + 10 * 3);
    }

    #[test]
    fn resize_requeries_anchors() {
        let mut vp = three_section_viewport();
        let mut t = tracker();
        t.init(&vp);
        vp.scroll_to(600.0);
        assert_eq!(t.on_scroll(&vp), Some(1));

        // Layout reflowed: "about" moved down.
        vp.set_anchor("about", 1200.0);
        assert_eq!(t.on_resize(&vp), Some(0));
    }

    #[test]
    fn above_all_anchors_keeps_previous() {
        let mut vp = MockViewport::new(900.0)
            .with_anchor("home", 400.0)
            .with_anchor("about", 800.0)
            .with_anchor("skills", 1600.0);
        let mut t = tracker();
        t.init(&vp);
        vp.scroll_to(600.0);
        assert_eq!(t.on_scroll(&vp), Some(1));
        vp.scroll_to(0.0);
        // Probe at 300 is above "home" (400): nothing matches.
        assert_eq!(t.on_scroll(&vp), None);
        assert_eq!(t.active_index(), 1);
    }

    #[test]
    fn scrolled_and_back_to_top_flags() {
        let mut vp = three_section_viewport();
        let mut t = tracker();
        t.init(&vp);
        assert!(!t.state().scrolled);
        vp.scroll_to(50.0);
        t.on_scroll(&vp);
        assert!(!t.state().scrolled);
        vp.scroll_to(51.0);
        t.on_scroll(&vp);
        assert!(t.state().scrolled);
        assert!(!t.state().show_back_to_top);
        vp.scroll_to(301.0);
        t.on_scroll(&vp);
        assert!(t.state().show_back_to_top);
    }

    #[test]
    fn negative_scroll_clamped() {
        let mut vp = three_section_viewport();
        let mut t = tracker();
        t.init(&vp);
        vp.scroll_to(-120.0);
        t.on_scroll(&vp);
        assert_eq!(t.state().scroll_y, 0.0);
        assert_eq!(t.active_index(), 0);
    }

    #[test]
    fn zero_viewport_height_keeps_last_height() {
        let mut vp = three_section_viewport();
        let mut t = tracker();
        t.init(&vp);
        vp.viewport_height = 0.0;
        vp.scroll_to(500.0);
        t.on_scroll(&vp);
        assert_eq!(t.state().viewport_height, 900.0);
        assert_eq!(t.active_index(), 1);
    }

    #[test]
    fn events_before_init_or_after_teardown_ignored() {
        let mut vp = three_section_viewport();
        let mut t = tracker();
        vp.scroll_to(1650.0);
        assert_eq!(t.on_scroll(&vp), None);
        assert_eq!(t.active_index(), 0);

        t.init(&vp);
        assert_eq!(t.active_index(), 2);
        t.teardown();
        t.teardown();
        vp.scroll_to(0.0);
        assert_eq!(t.on_scroll(&vp), None);
        assert_eq!(t.on_resize(&vp), None);
        assert_eq!(t.active_index(), 2);
        assert!(!t.is_attached());
    }

    #[test]
    fn set_active_bounds() {
        let mut t = tracker();
        assert!(t.set_active(2).is_ok());
        assert_eq!(t.active_index(), 2);
        let err = t.set_active(3).unwrap_err();
        assert!(matches!(err, FolioError::OutOfRange { index: 3, len: 3 }));
        assert_eq!(t.active_index(), 2);
    }

    #[test]
    fn sections_sorted_by_order() {
        let t = ScrollTracker::new(
            vec![
                Section::new("about", "About", 1),
                Section::new("home", "Home", 0),
            ],
            ScrollConfig::default(),
        )
        .unwrap();
        assert_eq!(t.sections()[0].anchor_id, "home");
    }

    #[test]
    fn gap_in_order_rejected() {
        let err = ScrollTracker::new(
            vec![Section::new("home", "Home", 0), Section::new("about", "About", 2)],
            ScrollConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, FolioError::Content(_)));
    }

    #[test]
    fn duplicate_anchor_rejected() {
        let err = ScrollTracker::new(
            vec![Section::new("home", "Home", 0), Section::new("home", "Again", 1)],
            ScrollConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, FolioError::Content(ref m) if m.contains("duplicate")));
    }

    #[test]
    fn empty_sections_rejected() {
        assert!(ScrollTracker::new(Vec::new(), ScrollConfig::default()).is_err());
    }

    proptest! {
        #[test]
        fn active_section_is_deterministic(
            offsets in proptest::collection::vec(proptest::option::of(0.0f32..5000.0), 1..8),
            probe in 0.0f32..6000.0,
        ) {
            let a = active_section(&offsets, probe);
            let b = active_section(&offsets, probe);
            prop_assert_eq!(a, b);
            if let Some(i) = a {
                prop_assert!(offsets[i].is_some_and(|top| top <= probe));
                for later in &offsets[i + 1..] {
                    prop_assert!(!later.is_some_and(|top| top <= probe));
                }
            }
        }
    }
}
