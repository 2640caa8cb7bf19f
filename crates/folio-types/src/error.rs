//! Error types for folio.

use std::io;

/// Errors produced by the folio widgets and controllers.
#[derive(Debug, thiserror::Error)]
pub enum FolioError {
    /// A contact field failed validation; the submission was not attempted.
    #[error("validation error: {field} {reason}")]
    Validation { field: &'static str, reason: String },

    /// The mail relay rejected or failed a delivery.
    #[error("relay error: {0}")]
    Relay(String),

    /// A selection index outside `[0, len)`.
    #[error("index {index} out of range for {len} items")]
    OutOfRange { index: usize, len: usize },

    #[error("unknown skill kind: {0}")]
    UnknownSkillKind(String),

    /// A submission is already in flight.
    #[error("submission already in flight")]
    Busy,

    #[error("content error: {0}")]
    Content(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, FolioError>;
