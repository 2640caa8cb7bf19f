//! Scripted sessions: a viewport, a simulated relay and a list of steps.

use std::collections::{BTreeMap, HashMap};

use anyhow::Result;
use serde::Deserialize;

use folio_core::config::FolioConfig;
use folio_core::contact::{
    ClipboardWriter, FieldName, MailRelay, RelayPoll, RelayRequest, RelayTicket,
};
use folio_core::error::{FolioError, Result as FolioResult};
use folio_core::input::{Button, InputEvent};
use folio_core::ui::ViewportReader;
use folio_core::{PageController, PageSnapshot, Portfolio, WidgetId};

const DEMO: &str = r#"
name = "demo"

[viewport]
height = 900.0

[viewport.anchors]
home = 0.0
about = 900.0
skills = 1800.0
projects = 2700.0
contact = 3600.0

[relay]
polls_until_done = 2

[[steps]]
kind = "scroll"
y = 1000.0

[[steps]]
kind = "tick"
ms = 5000

[[steps]]
kind = "pointer"
widget = "projects"
enter = true

[[steps]]
kind = "tick"
ms = 12000

[[steps]]
kind = "pointer"
widget = "projects"
enter = false

[[steps]]
kind = "swipe"
widget = { skill_category = 0 }
from = 320.0
to = 200.0

[[steps]]
kind = "menu"

[[steps]]
kind = "nav"
index = 4

[[steps]]
kind = "scroll"
y = 3400.0

[[steps]]
kind = "copy"
label = "Email"

[[steps]]
kind = "field"
field = "name"
value = "Ada"

[[steps]]
kind = "field"
field = "email"
value = "ada@example.com"

[[steps]]
kind = "field"
field = "message"
value = "Loved the VR project."

[[steps]]
kind = "submit"

[[steps]]
kind = "submit"

[[steps]]
kind = "poll"

[[steps]]
kind = "poll"

[[steps]]
kind = "poll"

[[steps]]
kind = "tick"
ms = 1000
"#;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ViewportScript {
    pub height: f32,
    pub anchors: BTreeMap<String, f32>,
}

impl Default for ViewportScript {
    fn default() -> Self {
        Self {
            height: 900.0,
            anchors: BTreeMap::new(),
        }
    }
}

/// How the simulated relay answers.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RelayScript {
    /// Polls answered `Pending` before the outcome.
    pub polls_until_done: u32,
    /// Fail every delivery with this reason.
    pub fail: Option<String>,
    /// Refuse `send` outright with this reason.
    pub refuse: Option<String>,
}

impl Default for RelayScript {
    fn default() -> Self {
        Self {
            polls_until_done: 1,
            fail: None,
            refuse: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    Scroll {
        y: f32,
    },
    Resize {
        height: f32,
        #[serde(default)]
        anchors: BTreeMap<String, f32>,
    },
    Swipe {
        widget: WidgetId,
        from: f32,
        to: f32,
    },
    Pointer {
        widget: WidgetId,
        enter: bool,
    },
    Tab {
        widget: WidgetId,
        index: usize,
    },
    Button {
        widget: WidgetId,
        button: Button,
    },
    Tick {
        ms: u32,
    },
    Field {
        field: FieldName,
        value: String,
    },
    Submit,
    Poll,
    Copy {
        label: String,
    },
    Nav {
        index: usize,
    },
    Menu,
    ImageError {
        title: String,
    },
    Teardown,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub viewport: ViewportScript,
    #[serde(default)]
    pub relay: RelayScript,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// Viewport whose geometry is moved by the script.
pub struct ScriptedViewport {
    scroll_y: f32,
    height: f32,
    anchors: HashMap<String, f32>,
}

impl ScriptedViewport {
    fn new(script: &ViewportScript) -> Self {
        Self {
            scroll_y: 0.0,
            height: script.height,
            anchors: script.anchors.iter().map(|(k, v)| (k.clone(), *v)).collect(),
        }
    }
}

impl ViewportReader for ScriptedViewport {
    fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    fn viewport_height(&self) -> f32 {
        self.height
    }

    fn anchor_offset(&self, anchor_id: &str) -> Option<f32> {
        self.anchors.get(anchor_id).copied()
    }
}

/// Relay that settles each delivery after a fixed number of polls.
pub struct SimulatedRelay {
    script: RelayScript,
    pending: HashMap<RelayTicket, u32>,
    next_ticket: u64,
    sent: usize,
}

impl SimulatedRelay {
    pub fn new(script: RelayScript) -> Self {
        Self {
            script,
            pending: HashMap::new(),
            next_ticket: 1,
            sent: 0,
        }
    }

    pub fn sent(&self) -> usize {
        self.sent
    }
}

impl MailRelay for SimulatedRelay {
    fn send(&mut self, request: &RelayRequest) -> FolioResult<RelayTicket> {
        if let Some(reason) = &self.script.refuse {
            return Err(FolioError::Relay(reason.clone()));
        }
        log::debug!("relay body: {}", request.to_json()?);
        let ticket = RelayTicket(self.next_ticket);
        self.next_ticket += 1;
        self.sent += 1;
        self.pending.insert(ticket, self.script.polls_until_done);
        Ok(ticket)
    }

    fn poll(&mut self, ticket: RelayTicket) -> RelayPoll {
        let Some(remaining) = self.pending.get_mut(&ticket) else {
            return RelayPoll::Failed(format!("unknown ticket {}", ticket.0));
        };
        if *remaining > 0 {
            *remaining -= 1;
            return RelayPoll::Pending;
        }
        self.pending.remove(&ticket);
        match &self.script.fail {
            Some(reason) => RelayPoll::Failed(reason.clone()),
            None => RelayPoll::Delivered,
        }
    }
}

/// Clipboard that only remembers the last write.
#[derive(Default)]
struct LogClipboard {
    last: Option<String>,
}

impl ClipboardWriter for LogClipboard {
    fn write_text(&mut self, text: &str) -> FolioResult<()> {
        log::info!("clipboard <- {text}");
        self.last = Some(text.to_string());
        Ok(())
    }
}

impl Scenario {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// The session run when no file is given.
    pub fn demo() -> Result<Self> {
        Self::from_toml_str(DEMO)
    }

    /// Replay every step and return the final snapshot.
    ///
    /// A step the page rejects is logged and the session goes on, the way
    /// a user keeps clicking after a validation message.
    pub fn run(&self, portfolio: Portfolio, config: &FolioConfig) -> Result<PageSnapshot> {
        let (page, clipboard) = self.run_with_relay(portfolio, config)?;
        log::info!(
            "session '{}' done: {} message(s) handed to the relay",
            self.name,
            page.contact().relay().sent()
        );
        if let Some(text) = clipboard.last {
            log::debug!("clipboard holds {text}");
        }
        Ok(page.snapshot())
    }

    fn run_with_relay(
        &self,
        portfolio: Portfolio,
        config: &FolioConfig,
    ) -> Result<(PageController<SimulatedRelay>, LogClipboard)> {
        let relay = SimulatedRelay::new(self.relay.clone());
        let mut page = PageController::new(portfolio, config, relay)?;
        let mut viewport = ScriptedViewport::new(&self.viewport);
        let mut clipboard = LogClipboard::default();

        page.init(&viewport);
        for (n, step) in self.steps.iter().enumerate() {
            if let Err(e) = apply(&mut page, &mut viewport, &mut clipboard, step) {
                log::warn!("step {n} ({step:?}) rejected: {e}");
            }
        }
        Ok((page, clipboard))
    }
}

fn apply(
    page: &mut PageController<SimulatedRelay>,
    viewport: &mut ScriptedViewport,
    clipboard: &mut LogClipboard,
    step: &Step,
) -> FolioResult<()> {
    match step {
        Step::Scroll { y } => {
            viewport.scroll_y = *y;
            if let Some(index) = page.on_scroll(viewport) {
                log::info!("active section -> {index}");
            }
        },
        Step::Resize { height, anchors } => {
            viewport.height = *height;
            viewport
                .anchors
                .extend(anchors.iter().map(|(k, v)| (k.clone(), *v)));
            if let Some(index) = page.on_resize(viewport) {
                log::info!("active section -> {index}");
            }
        },
        Step::Swipe { widget, from, to } => {
            page.dispatch(*widget, InputEvent::TouchStart { x: *from })?;
            page.dispatch(*widget, InputEvent::TouchMove { x: *to })?;
            page.dispatch(*widget, InputEvent::TouchEnd)?;
        },
        Step::Pointer { widget, enter } => {
            let event = if *enter {
                InputEvent::PointerEnter
            } else {
                InputEvent::PointerLeave
            };
            page.dispatch(*widget, event)?;
        },
        Step::Tab { widget, index } => {
            page.dispatch(*widget, InputEvent::Select { index: *index })?;
        },
        Step::Button { widget, button } => {
            page.dispatch(*widget, InputEvent::Button { button: *button })?;
        },
        Step::Tick { ms } => page.tick(*ms),
        Step::Field { field, value } => page.update_field(*field, value),
        Step::Submit => {
            page.submit()?;
        },
        Step::Poll => {
            let status = page.poll();
            log::info!("contact status {status:?}");
        },
        Step::Copy { label } => page.copy_detail(clipboard, label)?,
        Step::Nav { index } => {
            let href = page.nav_click(*index)?;
            log::info!("scroll to {href}");
        },
        Step::Menu => {
            page.toggle_menu();
        },
        Step::ImageError { title } => page.image_failed(title),
        Step::Teardown => page.teardown(),
    }
    Ok(())
}
