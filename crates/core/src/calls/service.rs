//! Call initiation flow: resolve lead phone, submit to provider, register.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::registry::CallRegistry;
use super::types::{CallAttempt, InitiatedCall};
use crate::crm::CrmClient;
use crate::metrics::CALLS_INITIATED;
use crate::telephony::{CallMetadata, CallbackUrls, OutgoingCallRequest, TelephonyProvider};

/// Why a call could not be initiated.
#[derive(Debug, Error, PartialEq)]
pub enum CallError {
    /// Caller input missing, or the lead has nothing to dial.
    #[error("{0}")]
    Validation(String),

    /// CRM or telephony provider unreachable or failing.
    #[error("{0}")]
    Upstream(String),
}

impl CallError {
    fn metric_label(&self) -> &'static str {
        match self {
            CallError::Validation(_) => "validation_error",
            CallError::Upstream(_) => "upstream_error",
        }
    }
}

/// Trim the source number and make sure it carries a leading `+`.
pub fn normalize_source_number(number: &str) -> String {
    let trimmed = number.trim();
    if trimmed.starts_with('+') {
        trimmed.to_string()
    } else {
        format!("+{}", trimmed)
    }
}

/// Places outbound calls for CRM leads.
pub struct CallService {
    crm: Arc<dyn CrmClient>,
    telephony: Arc<dyn TelephonyProvider>,
    registry: Arc<CallRegistry>,
    callbacks: CallbackUrls,
}

impl CallService {
    pub fn new(
        crm: Arc<dyn CrmClient>,
        telephony: Arc<dyn TelephonyProvider>,
        registry: Arc<CallRegistry>,
        backend_domain: &str,
    ) -> Self {
        Self {
            crm,
            telephony,
            registry,
            callbacks: CallbackUrls::for_domain(backend_domain),
        }
    }

    pub fn registry(&self) -> &Arc<CallRegistry> {
        &self.registry
    }

    /// Look up the lead and return the number to dial.
    pub async fn resolve_phone(&self, lead_id: &str) -> Result<String, CallError> {
        if lead_id.trim().is_empty() {
            return Err(CallError::Validation("Missing parameters".to_string()));
        }

        let lead = self.crm.get_lead(lead_id).await.map_err(|e| {
            warn!("CRM lookup for lead {} failed: {}", lead_id, e);
            CallError::Upstream(format!("CRM lookup failed: {}", e))
        })?;

        debug!("Lead {} has {} phone(s) on file", lead_id, lead.phones.len());

        lead.primary_phone()
            .map(str::to_string)
            .ok_or_else(|| CallError::Validation("Lead has no phone number".to_string()))
    }

    /// Resolve the lead, submit the call and record the attempt.
    ///
    /// Any answer from the provider counts as initiated, whatever its status.
    pub async fn initiate(
        &self,
        lead_id: &str,
        from_number: &str,
    ) -> Result<InitiatedCall, CallError> {
        let result = self.run_initiation(lead_id, from_number).await;

        let label = match &result {
            Ok(_) => "initiated",
            Err(e) => e.metric_label(),
        };
        CALLS_INITIATED.with_label_values(&[label]).inc();

        result
    }

    async fn run_initiation(
        &self,
        lead_id: &str,
        from_number: &str,
    ) -> Result<InitiatedCall, CallError> {
        if lead_id.trim().is_empty() || from_number.trim().is_empty() {
            return Err(CallError::Validation("Missing parameters".to_string()));
        }

        let to_number = self.resolve_phone(lead_id).await?;
        let from_number = normalize_source_number(from_number);
        let call_id = Uuid::new_v4().to_string();

        info!(
            "Initiating call {} from {} to {} for lead {}",
            call_id, from_number, to_number, lead_id
        );

        let request = OutgoingCallRequest {
            from_number: from_number.clone(),
            to_number: to_number.clone(),
            incoming_call_url: self.callbacks.incoming.clone(),
            outgoing_call_url: self.callbacks.outgoing.clone(),
            metadata: CallMetadata {
                lead_id: lead_id.to_string(),
                call_id: call_id.clone(),
            },
        };

        let response = self
            .telephony
            .place_call(&request)
            .await
            .map_err(|e| CallError::Upstream(format!("Call initiation failed: {}", e)))?;

        self.registry
            .insert(CallAttempt {
                call_id: call_id.clone(),
                lead_id: lead_id.to_string(),
                from_number,
                to_number: to_number.clone(),
                created_at: Utc::now(),
            })
            .await;

        Ok(InitiatedCall {
            call_id,
            to_number,
            provider_status: response.status,
        })
    }
}
