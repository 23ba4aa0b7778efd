//! Mock telephony provider for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::telephony::{OutgoingCallRequest, ProviderResponse, TelephonyError, TelephonyProvider};

/// Mock implementation of the TelephonyProvider trait.
///
/// Records every submitted request and answers with a configurable status.
#[derive(Debug)]
pub struct MockTelephonyProvider {
    requests: Arc<RwLock<Vec<OutgoingCallRequest>>>,
    response: Arc<RwLock<ProviderResponse>>,
    next_error: Arc<RwLock<Option<TelephonyError>>>,
}

impl Default for MockTelephonyProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTelephonyProvider {
    /// Create a mock that accepts every call with `200 {"success":true}`.
    pub fn new() -> Self {
        Self {
            requests: Arc::new(RwLock::new(Vec::new())),
            response: Arc::new(RwLock::new(ProviderResponse {
                status: 200,
                body: r#"{"success":true}"#.to_string(),
            })),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Answer subsequent calls with this status and body.
    pub async fn set_response(&self, status: u16, body: &str) {
        *self.response.write().await = ProviderResponse {
            status,
            body: body.to_string(),
        };
    }

    /// Get all submitted requests.
    pub async fn recorded_requests(&self) -> Vec<OutgoingCallRequest> {
        self.requests.read().await.clone()
    }

    pub async fn request_count(&self) -> usize {
        self.requests.read().await.len()
    }

    /// Make the next submission fail with the given error.
    pub async fn set_next_error(&self, error: TelephonyError) {
        *self.next_error.write().await = Some(error);
    }
}

#[async_trait]
impl TelephonyProvider for MockTelephonyProvider {
    async fn place_call(
        &self,
        request: &OutgoingCallRequest,
    ) -> Result<ProviderResponse, TelephonyError> {
        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }

        self.requests.write().await.push(request.clone());
        Ok(self.response.read().await.clone())
    }
}
