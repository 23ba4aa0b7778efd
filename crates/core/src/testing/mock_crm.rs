//! Mock CRM client for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::crm::{CrmClient, CrmError, Lead};

/// Mock implementation of the CrmClient trait.
///
/// Provides controllable behavior for testing:
/// - Serve configurable leads
/// - Track lookups for assertions
/// - Simulate failures
///
/// # Example
///
/// ```rust,ignore
/// use dialbridge_core::testing::{MockCrmClient, fixtures};
///
/// let crm = MockCrmClient::new();
/// crm.add_lead(fixtures::lead_with_phone("42", "919876543210")).await;
///
/// let lead = crm.get_lead("42").await?;
/// assert_eq!(lead.primary_phone(), Some("919876543210"));
/// ```
#[derive(Debug)]
pub struct MockCrmClient {
    /// Leads by id.
    leads: Arc<RwLock<HashMap<String, Lead>>>,
    /// Lead ids looked up, in order.
    lookups: Arc<RwLock<Vec<String>>>,
    /// If set, the next lookup will fail with this error.
    next_error: Arc<RwLock<Option<CrmError>>>,
}

impl Default for MockCrmClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCrmClient {
    pub fn new() -> Self {
        Self {
            leads: Arc::new(RwLock::new(HashMap::new())),
            lookups: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Add or replace a lead.
    pub async fn add_lead(&self, lead: Lead) {
        self.leads.write().await.insert(lead.id.clone(), lead);
    }

    /// Get all recorded lookups.
    pub async fn recorded_lookups(&self) -> Vec<String> {
        self.lookups.read().await.clone()
    }

    /// Number of lookups made so far.
    pub async fn lookup_count(&self) -> usize {
        self.lookups.read().await.len()
    }

    /// Make the next lookup fail with the given error.
    pub async fn set_next_error(&self, error: CrmError) {
        *self.next_error.write().await = Some(error);
    }

    pub async fn clear_next_error(&self) {
        *self.next_error.write().await = None;
    }
}

#[async_trait]
impl CrmClient for MockCrmClient {
    async fn get_lead(&self, lead_id: &str) -> Result<Lead, CrmError> {
        self.lookups.write().await.push(lead_id.to_string());

        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }

        self.leads
            .read()
            .await
            .get(lead_id)
            .cloned()
            .ok_or_else(|| CrmError::Status {
                status: 400,
                message: r#"{"error":"NOT_FOUND","error_description":"Not found"}"#.to_string(),
            })
    }
}
