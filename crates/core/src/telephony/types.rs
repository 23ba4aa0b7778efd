//! Wire types for the call-initiation API.

use serde::{Deserialize, Serialize};

use crate::webhook::WebhookKind;

/// Body of an outgoing call request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutgoingCallRequest {
    pub from_number: String,
    pub to_number: String,
    /// Callback for inbound-call events.
    pub incoming_call_url: String,
    /// Callback for outbound-call events.
    pub outgoing_call_url: String,
    pub metadata: CallMetadata,
}

/// Metadata echoed back by the provider in its webhooks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CallMetadata {
    pub lead_id: String,
    pub call_id: String,
}

/// Webhook URLs registered with the provider for one call.
#[derive(Debug, Clone, PartialEq)]
pub struct CallbackUrls {
    pub incoming: String,
    pub outgoing: String,
}

impl CallbackUrls {
    /// Build callback URLs pointing at this service's webhook endpoints.
    pub fn for_domain(backend_domain: &str) -> Self {
        let domain = backend_domain.trim_end_matches('/');
        Self {
            incoming: format!("https://{}{}", domain, WebhookKind::Inbound.path()),
            outgoing: format!("https://{}{}", domain, WebhookKind::Outbound.path()),
        }
    }
}

/// What the provider answered, whatever the status.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResponse {
    pub status: u16,
    pub body: String,
}

impl ProviderResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
