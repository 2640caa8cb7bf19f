//! Nav bar: link list, mobile menu and active-link highlighting.

use folio_types::error::{FolioError, Result};
use serde::Serialize;

use crate::scroll::{ScrollTracker, Section};

/// A nav link pointing at a page section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub href: String,
    pub label: String,
    pub anchor_id: String,
}

impl From<&Section> for NavItem {
    fn from(section: &Section) -> Self {
        Self {
            href: format!("#{}", section.anchor_id),
            label: section.label.clone(),
            anchor_id: section.anchor_id.clone(),
        }
    }
}

/// Nav bar state. The active link comes from the [`ScrollTracker`].
#[derive(Debug, Clone)]
pub struct NavBar {
    items: Vec<NavItem>,
    menu_open: bool,
}

impl NavBar {
    pub fn from_sections(sections: &[Section]) -> Self {
        Self {
            items: sections.iter().map(NavItem::from).collect(),
            menu_open: false,
        }
    }

    pub fn items(&self) -> &[NavItem] {
        &self.items
    }

    /// Flip the mobile menu. Returns the new state.
    pub fn toggle_menu(&mut self) -> bool {
        self.menu_open = !self.menu_open;
        self.menu_open
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// A link was clicked: highlight it right away and close the menu.
    /// Returns the href the host should scroll to.
    pub fn click(&mut self, index: usize, tracker: &mut ScrollTracker) -> Result<&str> {
        let Some(item) = self.items.get(index) else {
            log::warn!("nav click {index} out of range ({} links)", self.items.len());
            return Err(FolioError::OutOfRange {
                index,
                len: self.items.len(),
            });
        };
        tracker.set_active(index)?;
        self.menu_open = false;
        Ok(&item.href)
    }

    /// Whether link `index` is the current page (`aria-current`).
    pub fn is_current(&self, index: usize, tracker: &ScrollTracker) -> bool {
        tracker.active_index() == index
    }

    /// Solid background once scrolled or while the mobile menu is open.
    pub fn solid_background(&self, scrolled: bool) -> bool {
        scrolled || self.menu_open
    }
}
