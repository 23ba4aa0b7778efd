//! Telephony provider integration for placing outbound calls.

mod frejun;
mod types;

pub use frejun::FrejunClient;
pub use types::{CallMetadata, CallbackUrls, OutgoingCallRequest, ProviderResponse};

use async_trait::async_trait;
use thiserror::Error;

/// Transport-level failures talking to the telephony provider.
///
/// An HTTP error status is not a `TelephonyError`: the provider was reached
/// and its answer is returned as a [`ProviderResponse`].
#[derive(Debug, Error)]
pub enum TelephonyError {
    #[error("Telephony request timed out")]
    Timeout,

    #[error("Telephony request failed: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for TelephonyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TelephonyError::Timeout
        } else {
            TelephonyError::Transport(err.to_string())
        }
    }
}

/// Call-initiation API of a telephony provider.
#[async_trait]
pub trait TelephonyProvider: Send + Sync {
    /// Submit one outgoing call request.
    async fn place_call(
        &self,
        request: &OutgoingCallRequest,
    ) -> Result<ProviderResponse, TelephonyError>;
}
