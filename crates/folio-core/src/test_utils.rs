//! Test doubles for page controller tests.

use std::collections::{HashMap, VecDeque};

use crate::contact::{ClipboardWriter, MailRelay, RelayPoll, RelayRequest, RelayTicket};
use crate::error::{FolioError, Result};
use crate::ui::ViewportReader;

pub struct MockViewport {
    pub scroll_y: f32,
    pub viewport_height: f32,
    anchors: HashMap<String, f32>,
}

impl MockViewport {
    pub fn new(viewport_height: f32) -> Self {
        Self {
            scroll_y: 0.0,
            viewport_height,
            anchors: HashMap::new(),
        }
    }

    pub fn with_anchor(mut self, anchor_id: &str, top: f32) -> Self {
        self.anchors.insert(anchor_id.to_string(), top);
        self
    }

    pub fn scroll_to(&mut self, y: f32) {
        self.scroll_y = y;
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
        self.anchors.get(anchor_id).copied()
    }
}

/// Relay answering polls from a script, `Pending` once it runs out.
#[derive(Default)]
pub struct MockRelay {
    pub sent: Vec<RelayRequest>,
    polls: VecDeque<RelayPoll>,
}

impl MockRelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_polls(mut self, polls: impl IntoIterator<Item = RelayPoll>) -> Self {
        self.polls.extend(polls);
        self
    }
}

impl MailRelay for MockRelay {
    fn send(&mut self, request: &RelayRequest) -> Result<RelayTicket> {
        self.sent.push(request.clone());
        Ok(RelayTicket(self.sent.len() as u64))
    }

    fn poll(&mut self, _ticket: RelayTicket) -> RelayPoll {
        self.polls.pop_front().unwrap_or(RelayPoll::Pending)
    }
}

#[derive(Default)]
pub struct MockClipboard {
    pub written: Vec<String>,
}

impl ClipboardWriter for MockClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            return Err(FolioError::Content("nothing to copy".into()));
        }
        self.written.push(text.to_string());
        Ok(())
    }
}
