//! Page controller: owns every widget on the portfolio page.
//!
//! The host forwards viewport events, input routed to a widget, form edits
//! and frame ticks. `teardown` disposes each widget once; afterwards every
//! entry point is a no-op.

use serde::{Deserialize, Serialize};

use crate::config::FolioConfig;
use crate::contact::{
    ClipboardWriter, ContactForm, ContactGateway, CopyFeedback, FieldName, MailRelay,
    RelayTicket, SubmissionStatus,
};
use crate::content::{ContactDetail, Portfolio};
use crate::error::{FolioError, Result};
use crate::input::InputEvent;
use crate::ui::{
    Carousel, CarouselState, NavBar, ProjectShowcase, ScrollState, ScrollTracker, Skill,
    ViewportReader,
};

/// Input target for [`PageController::dispatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetId {
    /// The project archive tabs.
    Projects,
    /// A skill category strip, by position.
    SkillCategory(usize),
}

struct SkillStrip {
    name: String,
    carousel: Carousel<Skill>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillStripSnapshot {
    pub name: String,
    pub carousel: CarouselState,
    pub selected: Option<String>,
}

/// Everything observable about the page at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageSnapshot {
    pub owner: String,
    pub scroll: ScrollState,
    pub active_section: String,
    pub menu_open: bool,
    pub solid_nav: bool,
    pub featured_project: String,
    pub archive: CarouselState,
    pub archive_selected: Option<String>,
    pub skills: Vec<SkillStripSnapshot>,
    pub contact_status: SubmissionStatus,
    pub contact_error: Option<String>,
    pub form: ContactForm,
    pub copied: Option<String>,
    pub torn_down: bool,
}

impl PageSnapshot {
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub struct PageController<R> {
    owner: String,
    tracker: ScrollTracker,
    nav: NavBar,
    showcase: ProjectShowcase,
    skills: Vec<SkillStrip>,
    contact: ContactGateway<R>,
    details: Vec<ContactDetail>,
    copy: CopyFeedback,
    torn_down: bool,
}

impl<R: MailRelay> PageController<R> {
    pub fn new(portfolio: Portfolio, config: &FolioConfig, relay: R) -> Result<Self> {
        config.validate()?;
        portfolio.validate()?;

        let tracker = ScrollTracker::new(portfolio.sections, config.scroll.clone())?;
        let nav = NavBar::from_sections(tracker.sections());
        let showcase = ProjectShowcase::new(portfolio.projects, &config.projects, &config.swipe)?;
        let skills = portfolio
            .skill_categories
            .into_iter()
            .map(|category| {
                Ok(SkillStrip {
                    carousel: Carousel::new(category.skills, &config.skills, &config.swipe)?,
                    name: category.name,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        log::info!(
            "page built: {} sections, {} skill categories, {} archived projects",
            tracker.sections().len(),
            skills.len(),
            showcase.archive().len()
        );
        Ok(Self {
            owner: portfolio.owner,
            tracker,
            nav,
            showcase,
            skills,
            contact: ContactGateway::new(relay, &config.contact),
            details: portfolio.contact_details,
            copy: CopyFeedback::new(config.contact.copy_feedback_ms),
            torn_down: false,
        })
    }

    /// Attach to the viewport. Returns the initial active section index.
    pub fn init(&mut self, viewport: &dyn ViewportReader) -> usize {
        if self.torn_down {
            return self.tracker.active_index();
        }
        self.tracker.init(viewport)
    }

    pub fn on_scroll(&mut self, viewport: &dyn ViewportReader) -> Option<usize> {
        if self.torn_down {
            return None;
        }
        self.tracker.on_scroll(viewport)
    }

    pub fn on_resize(&mut self, viewport: &dyn ViewportReader) -> Option<usize> {
        if self.torn_down {
            return None;
        }
        self.tracker.on_resize(viewport)
    }

    /// Route an input event to one widget. Returns `true` if its selection
    /// moved.
    pub fn dispatch(&mut self, widget: WidgetId, event: InputEvent) -> Result<bool> {
        if self.torn_down {
            return Ok(false);
        }
        match widget {
            WidgetId::Projects => self.showcase.archive_mut().handle_event(event),
            WidgetId::SkillCategory(index) => {
                let len = self.skills.len();
                let strip = self
                    .skills
                    .get_mut(index)
                    .ok_or(FolioError::OutOfRange { index, len })?;
                strip.carousel.handle_event(event)
            },
        }
    }

    /// Advance every countdown on the page.
    pub fn tick(&mut self, dt_ms: u32) {
        if self.torn_down {
            return;
        }
        self.showcase.archive_mut().tick(dt_ms);
        for strip in &mut self.skills {
            strip.carousel.tick(dt_ms);
        }
        self.contact.tick(dt_ms);
        self.copy.tick(dt_ms);
    }

    /// Nav link click. Returns the href to scroll to.
    pub fn nav_click(&mut self, index: usize) -> Result<String> {
        if self.torn_down {
            let len = self.nav.items().len();
            return self
                .nav
                .items()
                .get(index)
                .map(|item| item.href.clone())
                .ok_or(FolioError::OutOfRange { index, len });
        }
        let href = self.nav.click(index, &mut self.tracker)?;
        Ok(href.to_string())
    }

    pub fn toggle_menu(&mut self) -> bool {
        if self.torn_down {
            return self.nav.is_menu_open();
        }
        self.nav.toggle_menu()
    }

    pub fn image_failed(&mut self, title: &str) {
        if !self.torn_down {
            self.showcase.image_failed(title);
        }
    }

    pub fn update_field(&mut self, field: FieldName, value: &str) {
        if !self.torn_down {
            self.contact.update_field(field, value);
        }
    }

    pub fn submit(&mut self) -> Result<RelayTicket> {
        self.contact.submit()
    }

    pub fn poll(&mut self) -> SubmissionStatus {
        self.contact.poll()
    }

    /// Copy the contact detail called `label`.
    pub fn copy_detail(&mut self, writer: &mut dyn ClipboardWriter, label: &str) -> Result<()> {
        if self.torn_down {
            return Ok(());
        }
        let detail = self
            .details
            .iter()
            .find(|d| d.label == label)
            .ok_or_else(|| FolioError::Content(format!("no contact detail '{label}'")))?;
        self.copy.copy(writer, &detail.label, &detail.value)
    }

    /// Detach from the viewport and stop every countdown.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.tracker.teardown();
        self.showcase.archive_mut().dispose();
        for strip in &mut self.skills {
            strip.carousel.dispose();
        }
        self.contact.dispose();
        self.copy.dispose();
        self.torn_down = true;
        log::info!("page torn down");
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn tracker(&self) -> &ScrollTracker {
        &self.tracker
    }

    pub fn nav(&self) -> &NavBar {
        &self.nav
    }

    pub fn showcase(&self) -> &ProjectShowcase {
        &self.showcase
    }

    pub fn skill_carousel(&self, index: usize) -> Option<&Carousel<Skill>> {
        self.skills.get(index).map(|s| &s.carousel)
    }

    pub fn contact(&self) -> &ContactGateway<R> {
        &self.contact
    }

    pub fn contact_mut(&mut self) -> &mut ContactGateway<R> {
        &mut self.contact
    }

    pub fn snapshot(&self) -> PageSnapshot {
        let scroll = self.tracker.state();
        let archive = self.showcase.archive();
        PageSnapshot {
            owner: self.owner.clone(),
            scroll,
            active_section: self.tracker.active_section().anchor_id.clone(),
            menu_open: self.nav.is_menu_open(),
            solid_nav: self.nav.solid_background(scroll.scrolled),
            featured_project: self.showcase.featured().title.clone(),
            archive: archive.state(),
            archive_selected: archive.selected().map(|p| p.title.clone()),
            skills: self
                .skills
                .iter()
                .map(|s| SkillStripSnapshot {
                    name: s.name.clone(),
                    carousel: s.carousel.state(),
                    selected: s.carousel.selected().map(|k| k.id.clone()),
                })
                .collect(),
            contact_status: self.contact.status(),
            contact_error: self.contact.last_error().map(str::to_string),
            form: self.contact.form().clone(),
            copied: self.copy.copied().map(str::to_string),
            torn_down: self.torn_down,
        }
    }
}
