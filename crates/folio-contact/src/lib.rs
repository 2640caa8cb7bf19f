//! Contact section: form fields, mail relay seam, submission gateway and
//! copy-to-clipboard feedback.
//!
//! Delivery is delegated to a [`MailRelay`]. The gateway only tracks the
//! tri-state banner and guarantees a single delivery in flight.

pub mod clipboard;
pub mod form;
pub mod gateway;
pub mod relay;

#[cfg(test)]
pub(crate) mod test_utils;

pub use clipboard::{ClipboardWriter, CopyFeedback};
pub use form::{ContactForm, FieldName};
pub use gateway::{ContactGateway, SubmissionStatus};
pub use relay::{MailRelay, RelayPoll, RelayRequest, RelayTicket};
