//! Provider webhook intake.
//!
//! Events are opaque JSON. They are logged and counted, never parsed into a
//! typed entity and never matched against the call registry.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::metrics::WEBHOOK_EVENTS;

/// Which provider callback an event arrived on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WebhookKind {
    /// Inbound-call events (`incoming_call_url`).
    Inbound,
    /// Outbound-call events (`outgoing_call_url`).
    Outbound,
}

impl WebhookKind {
    /// Route this kind is served on.
    pub fn path(self) -> &'static str {
        match self {
            WebhookKind::Inbound => "/frejun-flow",
            WebhookKind::Outbound => "/frejun-handler",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WebhookKind::Inbound => "inbound",
            WebhookKind::Outbound => "outbound",
        }
    }
}

/// One provider-pushed event.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookEvent {
    pub kind: WebhookKind,
    pub received_at: DateTime<Utc>,
    pub payload: Value,
}

impl WebhookEvent {
    pub fn new(kind: WebhookKind, payload: Value) -> Self {
        Self {
            kind,
            received_at: Utc::now(),
            payload,
        }
    }

    /// Log and count the event.
    pub fn record(&self) {
        WEBHOOK_EVENTS.with_label_values(&[self.kind.as_str()]).inc();
        info!(
            kind = self.kind.as_str(),
            received_at = %self.received_at.to_rfc3339(),
            payload = %self.payload,
            "Received FreJun webhook"
        );
    }
}
