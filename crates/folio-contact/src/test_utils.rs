//! Shared test utilities for folio-contact tests.

use std::collections::VecDeque;

use folio_types::error::{FolioError, Result};

use crate::clipboard::ClipboardWriter;
use crate::relay::{MailRelay, RelayPoll, RelayRequest, RelayTicket};

/// A relay that records requests and answers polls from a script.
///
/// Once the script runs out every poll reports `Pending`.
pub struct MockRelay {
    pub sent: Vec<RelayRequest>,
    polls: VecDeque<RelayPoll>,
    refuse: Option<String>,
    poll_count: usize,
    next_ticket: u64,
}

impl MockRelay {
    pub fn new() -> Self {
        Self {
            sent: Vec::new(),
            polls: VecDeque::new(),
            refuse: None,
            poll_count: 0,
            next_ticket: 1,
        }
    }

    /// A relay whose `send` always fails with `reason`.
    pub fn refusing(reason: &str) -> Self {
        Self {
            refuse: Some(reason.to_string()),
            ..Self::new()
        }
    }

    pub fn with_polls(mut self, polls: impl IntoIterator<Item = RelayPoll>) -> Self {
        self.polls.extend(polls);
        self
    }

    pub fn send_count(&self) -> usize {
        self.sent.len()
    }

    pub fn poll_count(&self) -> usize {
        self.poll_count
    }
}

impl MailRelay for MockRelay {
    fn send(&mut self, request: &RelayRequest) -> Result<RelayTicket> {
        if let Some(reason) = &self.refuse {
            return Err(FolioError::Relay(reason.clone()));
        }
        self.sent.push(request.clone());
        let ticket = RelayTicket(self.next_ticket);
        self.next_ticket += 1;
        Ok(ticket)
    }

    fn poll(&mut self, _ticket: RelayTicket) -> RelayPoll {
        self.poll_count += 1;
        self.polls.pop_front().unwrap_or(RelayPoll::Pending)
    }
}

/// A clipboard that keeps everything written to it.
#[derive(Default)]
pub struct MockClipboard {
    pub written: Vec<String>,
    pub fail: bool,
}

impl ClipboardWriter for MockClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        if self.fail {
            return Err(FolioError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "clipboard denied",
            )));
        }
        self.written.push(text.to_string());
        Ok(())
    }
}
