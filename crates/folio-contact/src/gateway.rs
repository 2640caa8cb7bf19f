//! Contact submission gateway.
//!
//! Status moves `Idle -> Submitting -> Success | Error -> Idle`. The last
//! step happens `status_reset_ms` after the outcome, driven by `tick`.
//! Only one delivery may be in flight; a second `submit` is refused.

use folio_types::config::{ContactConfig, RelayConfig};
use folio_types::error::{FolioError, Result};
use serde::Serialize;

use crate::form::{ContactForm, FieldName};
use crate::relay::{MailRelay, RelayPoll, RelayRequest, RelayTicket};

/// Banner state shown next to the submit button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Idle,
    Submitting,
    Success,
    Error,
}

/// Owns the form values and drives deliveries through a [`MailRelay`].
pub struct ContactGateway<R> {
    relay: R,
    relay_config: RelayConfig,
    form: ContactForm,
    status: SubmissionStatus,
    in_flight: Option<RelayTicket>,
    require_subject: bool,
    reset_after_ms: u32,
    /// Armed once an outcome is known.
    reset_elapsed_ms: Option<u32>,
    last_error: Option<String>,
    disposed: bool,
}

impl<R: MailRelay> ContactGateway<R> {
    pub fn new(relay: R, config: &ContactConfig) -> Self {
        Self {
            relay,
            relay_config: config.relay.clone(),
            form: ContactForm::new(),
            status: SubmissionStatus::Idle,
            in_flight: None,
            require_subject: config.require_subject,
            reset_after_ms: config.status_reset_ms,
            reset_elapsed_ms: None,
            last_error: None,
            disposed: false,
        }
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn update_field(&mut self, field: FieldName, value: &str) {
        self.form.set(field, value);
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    /// Reason for the last failed delivery, until the next submit.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Whether the submit button is enabled.
    pub fn can_submit(&self) -> bool {
        !self.disposed && self.status != SubmissionStatus::Submitting
    }

    pub fn relay(&self) -> &R {
        &self.relay
    }

    pub fn relay_mut(&mut self) -> &mut R {
        &mut self.relay
    }

    /// Validate the form and hand it to the relay.
    ///
    /// Validation failures leave the status untouched. A relay that
    /// refuses the request outright is reported like a failed delivery.
    pub fn submit(&mut self) -> Result<RelayTicket> {
        if self.disposed {
            return Err(FolioError::Relay("contact form is no longer mounted".into()));
        }
        if self.status == SubmissionStatus::Submitting {
            log::warn!("submit ignored: a submission is already in flight");
            return Err(FolioError::Busy);
        }
        self.form.validate(self.require_subject)?;

        let request = RelayRequest::new(&self.relay_config, self.form.to_params());
        self.reset_elapsed_ms = None;
        self.last_error = None;
        self.status = SubmissionStatus::Submitting;

        match self.relay.send(&request) {
            Ok(ticket) => {
                log::debug!("contact submission started ({ticket:?})");
                self.in_flight = Some(ticket);
                Ok(ticket)
            },
            Err(e) => {
                let reason = match e {
                    FolioError::Relay(reason) => reason,
                    other => other.to_string(),
                };
                self.fail(reason.clone());
                Err(FolioError::Relay(reason))
            },
        }
    }

    /// Check on the delivery in flight, if any.
    pub fn poll(&mut self) -> SubmissionStatus {
        if self.disposed {
            return self.status;
        }
        let Some(ticket) = self.in_flight else {
            return self.status;
        };
        match self.relay.poll(ticket) {
            RelayPoll::Pending => {},
            RelayPoll::Delivered => {
                self.in_flight = None;
                self.status = SubmissionStatus::Success;
                self.form.clear();
                self.reset_elapsed_ms = Some(0);
                log::info!("contact message delivered");
            },
            RelayPoll::Failed(reason) => {
                self.in_flight = None;
                self.fail(reason);
            },
        }
        self.status
    }

    /// Advance the banner countdown. Returns `true` when the status
    /// returned to `Idle` during this tick.
    pub fn tick(&mut self, dt_ms: u32) -> bool {
        if self.disposed {
            return false;
        }
        let Some(elapsed) = self.reset_elapsed_ms.as_mut() else {
            return false;
        };
        *elapsed = elapsed.saturating_add(dt_ms);
        if *elapsed < self.reset_after_ms {
            return false;
        }
        self.reset_elapsed_ms = None;
        self.status = SubmissionStatus::Idle;
        true
    }

    /// Stop tracking. A delivery still in flight is no longer observed.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        if self.in_flight.take().is_some() {
            log::debug!("contact form disposed with a delivery in flight");
        }
        self.reset_elapsed_ms = None;
        self.disposed = true;
    }

    fn fail(&mut self, reason: String) {
        log::warn!("contact delivery failed: {reason}");
        self.status = SubmissionStatus::Error;
        self.last_error = Some(reason);
        self.reset_elapsed_ms = Some(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockRelay;

    fn config() -> ContactConfig {
        let mut config = ContactConfig::default();
        config.relay.service_id = "service_abc".into();
        config.relay.template_id = "template_xyz".into();
        config.relay.public_key = "pk".into();
        config
    }

    fn gateway(relay: MockRelay) -> ContactGateway<MockRelay> {
        let mut g = ContactGateway::new(relay, &config());
        g.update_field(FieldName::Name, "Ada");
        g.update_field(FieldName::Email, "ada@example.com");
        g.update_field(FieldName::Message, "Hello");
        g
    }

    #[test]
    fn success_clears_fields_then_resets() {
        let mut g = gateway(MockRelay::new().with_polls([RelayPoll::Delivered]));
        g.submit().unwrap();
        assert_eq!(g.status(), SubmissionStatus::Submitting);
        assert!(!g.can_submit());

        assert_eq!(g.poll(), SubmissionStatus::Success);
        assert_eq!(g.form(), &ContactForm::default());
        assert!(g.can_submit());

        assert!(!g.tick(4999));
        assert_eq!(g.status(), SubmissionStatus::Success);
        assert!(g.tick(1));
        assert_eq!(g.status(), SubmissionStatus::Idle);
    }

    #[test]
    fn second_submit_while_in_flight_is_refused() {
        let mut g = gateway(MockRelay::new());
        g.submit().unwrap();
        let err = g.submit().unwrap_err();
        assert!(matches!(err, FolioError::Busy));
        assert_eq!(g.relay().send_count(), 1);
        assert_eq!(g.poll(), SubmissionStatus::Submitting);
    }

    #[test]
    fn request_carries_config_and_fields() {
        let mut g = gateway(MockRelay::new());
        g.submit().unwrap();
        let sent = &g.relay().sent[0];
        assert_eq!(sent.service_id, "service_abc");
        assert_eq!(sent.template_id, "template_xyz");
        assert_eq!(sent.params["email"], "ada@example.com");
    }

    #[test]
    fn failure_keeps_fields() {
        let mut g = gateway(
            MockRelay::new().with_polls([RelayPoll::Pending, RelayPoll::Failed("status 500".into())]),
        );
        g.submit().unwrap();
        assert_eq!(g.poll(), SubmissionStatus::Submitting);
        assert_eq!(g.poll(), SubmissionStatus::Error);
        assert_eq!(g.last_error(), Some("status 500"));
        assert_eq!(g.form().name, "Ada");
        assert!(g.tick(5000));
        assert_eq!(g.status(), SubmissionStatus::Idle);
    }

    #[test]
    fn retry_after_failure() {
        let mut g = gateway(
            MockRelay::new().with_polls([RelayPoll::Failed("down".into()), RelayPoll::Delivered]),
        );
        g.submit().unwrap();
        g.poll();
        assert_eq!(g.status(), SubmissionStatus::Error);
        g.submit().unwrap();
        assert!(g.last_error().is_none());
        assert_eq!(g.poll(), SubmissionStatus::Success);
        assert_eq!(g.relay().send_count(), 2);
    }

    #[test]
    fn refused_send_is_an_error_banner() {
        let mut g = gateway(MockRelay::refusing("bad public key"));
        let err = g.submit().unwrap_err();
        assert!(matches!(err, FolioError::Relay(ref m) if m == "bad public key"));
        assert_eq!(g.status(), SubmissionStatus::Error);
        assert_eq!(g.form().message, "Hello");
        assert!(g.can_submit());
    }

    #[test]
    fn validation_failure_skips_relay() {
        let mut g = gateway(MockRelay::new());
        g.update_field(FieldName::Message, "  ");
        let err = g.submit().unwrap_err();
        assert!(matches!(err, FolioError::Validation { field: "message", .. }));
        assert_eq!(g.status(), SubmissionStatus::Idle);
        assert_eq!(g.relay().send_count(), 0);
    }

    #[test]
    fn new_submit_cancels_pending_reset() {
        let mut g = gateway(
            MockRelay::new().with_polls([RelayPoll::Failed("x".into()), RelayPoll::Pending]),
        );
        g.submit().unwrap();
        g.poll();
        g.tick(4000);
        g.submit().unwrap();
        // The earlier countdown must not knock the new submission to Idle.
        assert!(!g.tick(2000));
        assert_eq!(g.status(), SubmissionStatus::Submitting);
    }

    #[test]
    fn tick_without_outcome_does_nothing() {
        let mut g = gateway(MockRelay::new());
        assert!(!g.tick(10_000));
        g.submit().unwrap();
        assert!(!g.tick(10_000));
        assert_eq!(g.status(), SubmissionStatus::Submitting);
    }

    #[test]
    fn poll_without_submission_is_idle() {
        let mut g = gateway(MockRelay::new());
        assert_eq!(g.poll(), SubmissionStatus::Idle);
        assert_eq!(g.relay().poll_count(), 0);
    }

    #[test]
    fn disposed_gateway_is_inert() {
        let mut g = gateway(MockRelay::new().with_polls([RelayPoll::Delivered]));
        g.submit().unwrap();
        g.dispose();
        g.dispose();
        assert_eq!(g.poll(), SubmissionStatus::Submitting);
        assert_eq!(g.relay().poll_count(), 0);
        assert!(!g.tick(10_000));
        assert!(!g.can_submit());
        assert!(g.submit().is_err());
    }
}
