//! Copy-to-clipboard buttons next to the contact details.

use folio_types::error::Result;

/// Host clipboard.
pub trait ClipboardWriter {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// Tracks which contact detail was copied last, for the "Copied!" hint.
#[derive(Debug, Clone)]
pub struct CopyFeedback {
    copied: Option<String>,
    elapsed_ms: u32,
    duration_ms: u32,
    disposed: bool,
}

impl CopyFeedback {
    pub fn new(duration_ms: u32) -> Self {
        Self {
            copied: None,
            elapsed_ms: 0,
            duration_ms,
            disposed: false,
        }
    }

    /// Write `value` to the clipboard and show the hint on `label`.
    ///
    /// A failed write leaves the current hint alone.
    pub fn copy(&mut self, writer: &mut dyn ClipboardWriter, label: &str, value: &str) -> Result<()> {
        if self.disposed {
            return Ok(());
        }
        writer.write_text(value)?;
        log::debug!("copied {label} to clipboard");
        self.copied = Some(label.to_string());
        self.elapsed_ms = 0;
        Ok(())
    }

    pub fn tick(&mut self, dt_ms: u32) {
        if self.disposed || self.copied.is_none() {
            return;
        }
        self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms);
        if self.elapsed_ms >= self.duration_ms {
            self.copied = None;
            self.elapsed_ms = 0;
        }
    }

    /// Label currently showing the hint.
    pub fn copied(&self) -> Option<&str> {
        self.copied.as_deref()
    }

    pub fn dispose(&mut self) {
        self.copied = None;
        self.disposed = true;
    }
}
