//! FreJun call-initiation client.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use tracing::{info, warn};

use super::types::{OutgoingCallRequest, ProviderResponse};
use super::{TelephonyError, TelephonyProvider};
use crate::config::TelephonyConfig;
use crate::metrics::observe_external_call;

/// FreJun API client.
pub struct FrejunClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl FrejunClient {
    /// Create a new FreJun client.
    pub fn new(config: TelephonyConfig) -> Result<Self, TelephonyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url,
            api_key: config.api_key,
        })
    }

    async fn submit(
        &self,
        request: &OutgoingCallRequest,
    ) -> Result<ProviderResponse, TelephonyError> {
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        Ok(ProviderResponse { status, body })
    }
}

#[async_trait]
impl TelephonyProvider for FrejunClient {
    async fn place_call(
        &self,
        request: &OutgoingCallRequest,
    ) -> Result<ProviderResponse, TelephonyError> {
        let started = Instant::now();
        let result = self.submit(request).await;
        let elapsed = started.elapsed().as_secs_f64();

        match &result {
            Ok(response) if response.is_success() => {
                info!(
                    call_id = %request.metadata.call_id,
                    "FreJun API response: {}, {}", response.status, response.body
                );
                observe_external_call("telephony", "place_call", "success", elapsed);
            }
            Ok(response) => {
                // Still a completed attempt; the caller reports it as initiated.
                warn!(
                    call_id = %request.metadata.call_id,
                    "FreJun API rejected call: {}, {}", response.status, response.body
                );
                observe_external_call("telephony", "place_call", "http_error", elapsed);
            }
            Err(e) => {
                warn!(call_id = %request.metadata.call_id, "FreJun API unreachable: {}", e);
                observe_external_call("telephony", "place_call", "error", elapsed);
            }
        }

        result
    }
}
