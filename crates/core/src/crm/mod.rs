//! CRM integration used to resolve a lead's phone number.
//!
//! The production backend is a Bitrix24 inbound REST webhook; anything that
//! can answer "which phone numbers does this lead have" can implement
//! [`CrmClient`].

mod bitrix;
mod types;

pub use bitrix::BitrixClient;
pub use types::{Lead, LeadPhone};

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when talking to the CRM.
#[derive(Debug, Error)]
pub enum CrmError {
    /// The request did not complete within the configured timeout.
    #[error("CRM request timed out")]
    Timeout,

    /// Connection or protocol failure before a response was received.
    #[error("CRM request failed: {0}")]
    Transport(String),

    /// The CRM answered with a non-success status.
    #[error("CRM returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body was not the expected JSON shape.
    #[error("Failed to parse CRM response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for CrmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CrmError::Timeout
        } else {
            CrmError::Transport(err.to_string())
        }
    }
}

/// Lead lookup against a CRM.
#[async_trait]
pub trait CrmClient: Send + Sync {
    /// Fetch a lead and its phone numbers.
    async fn get_lead(&self, lead_id: &str) -> Result<Lead, CrmError>;
}
