//! Testing utilities and mock implementations.
//!
//! Mocks for both upstream seams let the call flow and the HTTP surface be
//! exercised without a CRM or telephony account.
//!
//! # Example
//!
//! ```rust,ignore
//! use dialbridge_core::testing::{fixtures, MockCrmClient, MockTelephonyProvider};
//!
//! let crm = MockCrmClient::new();
//! let telephony = MockTelephonyProvider::new();
//!
//! crm.add_lead(fixtures::lead_with_phone("42", "919876543210")).await;
//! telephony.set_response(422, "invalid number").await;
//! ```

mod mock_crm;
mod mock_telephony;

pub use mock_crm::MockCrmClient;
pub use mock_telephony::MockTelephonyProvider;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::config::{
        Config, CrmConfig, ServerConfig, TelephonyConfig, DEFAULT_TELEPHONY_API_URL,
    };
    use crate::crm::{Lead, LeadPhone};

    /// A lead with a single work phone.
    pub fn lead_with_phone(id: &str, phone: &str) -> Lead {
        lead_with_phones(id, &[phone])
    }

    /// A lead with the given phones, in order.
    pub fn lead_with_phones(id: &str, phones: &[&str]) -> Lead {
        Lead {
            id: id.to_string(),
            phones: phones
                .iter()
                .map(|value| LeadPhone {
                    value: Some(value.to_string()),
                    value_type: Some("WORK".to_string()),
                })
                .collect(),
        }
    }

    /// A lead with no phone on file.
    pub fn lead_without_phone(id: &str) -> Lead {
        Lead {
            id: id.to_string(),
            phones: vec![],
        }
    }

    /// A complete config pointing at the given upstream URLs.
    pub fn config(crm_base_url: &str, telephony_api_url: &str) -> Config {
        Config {
            server: ServerConfig::default(),
            crm: CrmConfig {
                base_url: crm_base_url.to_string(),
                timeout_secs: 30,
            },
            telephony: TelephonyConfig {
                api_key: "test-api-key".to_string(),
                backend_domain: "calls.example.com".to_string(),
                api_url: telephony_api_url.to_string(),
                timeout_secs: 30,
            },
        }
    }

    /// A complete config with placeholder upstreams.
    pub fn default_config() -> Config {
        config(
            "https://crm.example.com/rest/1/token",
            DEFAULT_TELEPHONY_API_URL,
        )
    }
}
