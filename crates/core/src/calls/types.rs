use chrono::{DateTime, Utc};
use serde::Serialize;

/// One outbound call initiation, as recorded in the registry.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CallAttempt {
    /// Internal identifier (UUIDv4), also sent to the provider as metadata.
    pub call_id: String,
    pub lead_id: String,
    /// Source number after normalization (always starts with `+`).
    pub from_number: String,
    /// Destination number exactly as the CRM returned it.
    pub to_number: String,
    pub created_at: DateTime<Utc>,
}

/// Result of a successful initiation.
#[derive(Debug, Clone, PartialEq)]
pub struct InitiatedCall {
    pub call_id: String,
    pub to_number: String,
    /// HTTP status the provider answered with. Non-2xx is still "initiated".
    pub provider_status: u16,
}
