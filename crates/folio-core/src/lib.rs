//! folio core: portfolio content and the page controller.
//!
//! Ties the headless widgets of `folio-ui` and the contact gateway of
//! `folio-contact` into one [`PageController`] with a single lifecycle.

// Re-exports from folio-types (foundation types).
pub use folio_types::color;
pub use folio_types::config;
pub use folio_types::error;
pub use folio_types::input;

pub use folio_contact as contact;
pub use folio_ui as ui;

pub mod content;
pub mod page;

#[cfg(test)]
pub(crate) mod test_utils;

pub use content::{ContactDetail, Portfolio, SkillCategory};
pub use page::{PageController, PageSnapshot, SkillStripSnapshot, WidgetId};
