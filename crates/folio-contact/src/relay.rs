//! Mail relay seam.
//!
//! The relay is an external service that turns a template id plus
//! parameters into an email. It is driven by non-blocking polling: `send`
//! starts a delivery and hands back a ticket, `poll` reports how that
//! delivery is going.

use std::collections::BTreeMap;

use folio_types::config::RelayConfig;
use folio_types::error::Result;
use serde::Serialize;

/// Handle for one delivery started with [`MailRelay::send`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RelayTicket(pub u64);

/// Progress of a delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayPoll {
    Pending,
    Delivered,
    Failed(String),
}

/// Everything the relay needs for one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayRequest {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub params: BTreeMap<String, String>,
}

/// REST body accepted by the EmailJS `send` endpoint.
#[derive(Serialize)]
struct SendBody<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a BTreeMap<String, String>,
}

impl RelayRequest {
    pub fn new(config: &RelayConfig, params: BTreeMap<String, String>) -> Self {
        Self {
            service_id: config.service_id.clone(),
            template_id: config.template_id.clone(),
            public_key: config.public_key.clone(),
            params,
        }
    }

    /// Render the request as the relay's JSON body.
    pub fn to_json(&self) -> Result<String> {
        let body = SendBody {
            service_id: &self.service_id,
            template_id: &self.template_id,
            user_id: &self.public_key,
            template_params: &self.params,
        };
        Ok(serde_json::to_string(&body)?)
    }
}

/// An asynchronous mail relay.
pub trait MailRelay {
    /// Start delivering `request`. Must not block on the delivery itself.
    fn send(&mut self, request: &RelayRequest) -> Result<RelayTicket>;

    /// Check on a delivery. Once `Delivered` or `Failed` is returned the
    /// ticket is finished and later polls are unspecified.
    fn poll(&mut self, ticket: RelayTicket) -> RelayPoll;
}

impl<R: MailRelay + ?Sized> MailRelay for Box<R> {
    fn send(&mut self, request: &RelayRequest) -> Result<RelayTicket> {
        (**self).send(request)
    }

    fn poll(&mut self, ticket: RelayTicket) -> RelayPoll {
        (**self).poll(ticket)
    }
}
