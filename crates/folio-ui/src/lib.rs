//! folio-ui: headless widgets for the portfolio page.
//!
//! Nothing here touches a DOM. Widgets read the viewport through
//! [`ViewportReader`], receive [`folio_types::input::InputEvent`]s and are
//! advanced by `tick(dt_ms)` from the host's frame loop.

pub mod carousel;
pub mod nav;
pub mod project;
pub mod scroll;
pub mod skill;
pub mod swipe;

#[cfg(test)]
pub(crate) mod test_utils;

pub use carousel::{AutoAdvanceState, Carousel, CarouselItem, CarouselState};
pub use nav::{NavBar, NavItem};
pub use project::{Project, ProjectShowcase};
pub use scroll::{ScrollState, ScrollTracker, Section, ViewportReader};
pub use skill::{Skill, SkillKind, SkillLevel};
pub use swipe::{SwipeIntent, SwipeRecognizer};
