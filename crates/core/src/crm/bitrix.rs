//! Bitrix24 REST webhook client.
//!
//! Leads are fetched with `crm.lead.get`; phone numbers live in the
//! `PHONE` multi-field of the result.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::types::{Lead, LeadPhone};
use super::{CrmClient, CrmError};
use crate::config::CrmConfig;
use crate::metrics::observe_external_call;

/// Bitrix24 CRM client.
pub struct BitrixClient {
    client: Client,
    base_url: String,
}

impl BitrixClient {
    /// Create a new Bitrix client.
    pub fn new(config: CrmConfig) -> Result<Self, CrmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn fetch_lead(&self, lead_id: &str) -> Result<Lead, CrmError> {
        let url = format!("{}/crm.lead.get.json", self.base_url);

        debug!("Bitrix get lead: id={}", lead_id);

        let response = self
            .client
            .get(&url)
            .query(&[("id", lead_id)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CrmError::Status {
                status: status.as_u16(),
                message: body,
            });
        }

        let lead: BitrixLeadResponse = response
            .json()
            .await
            .map_err(|e| CrmError::Parse(format!("Failed to parse lead response: {}", e)))?;

        Ok(lead.into_lead(lead_id))
    }
}

#[async_trait]
impl CrmClient for BitrixClient {
    async fn get_lead(&self, lead_id: &str) -> Result<Lead, CrmError> {
        let started = Instant::now();
        let result = self.fetch_lead(lead_id).await;

        let status = match &result {
            Ok(_) => "success",
            Err(CrmError::Status { .. }) => "http_error",
            Err(_) => "error",
        };
        observe_external_call("crm", "get_lead", status, started.elapsed().as_secs_f64());

        result
    }
}

// ============================================================================
// Bitrix API Response Types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct BitrixLeadResponse {
    #[serde(default)]
    result: Option<BitrixLead>,
}

#[derive(Debug, Deserialize)]
struct BitrixLead {
    #[serde(rename = "PHONE", default)]
    phone: Option<Vec<BitrixMultiField>>,
}

#[derive(Debug, Deserialize)]
struct BitrixMultiField {
    #[serde(rename = "VALUE", default)]
    value: Option<String>,
    #[serde(rename = "VALUE_TYPE", default)]
    value_type: Option<String>,
}

// ============================================================================
// Conversions
// ============================================================================

impl BitrixLeadResponse {
    fn into_lead(self, lead_id: &str) -> Lead {
        let phones = self
            .result
            .and_then(|lead| lead.phone)
            .unwrap_or_default()
            .into_iter()
            .map(|field| field.into())
            .collect();

        Lead {
            id: lead_id.to_string(),
            phones,
        }
    }
}

impl From<BitrixMultiField> for LeadPhone {
    fn from(field: BitrixMultiField) -> Self {
        Self {
            value: field.value,
            value_type: field.value_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Lead {
        let response: BitrixLeadResponse = serde_json::from_str(json).unwrap();
        response.into_lead("42")
    }

    #[test]
    fn test_lead_with_phones() {
        let lead = parse(
            r#"{
                "result": {
                    "ID": "42",
                    "TITLE": "Inbound enquiry",
                    "PHONE": [
                        {"ID": "7", "VALUE_TYPE": "WORK", "VALUE": "919876543210", "TYPE_ID": "PHONE"},
                        {"ID": "8", "VALUE_TYPE": "MOBILE", "VALUE": "911234567890", "TYPE_ID": "PHONE"}
                    ]
                },
                "time": {"start": 1700000000.1}
            }"#,
        );

        assert_eq!(lead.id, "42");
        assert_eq!(lead.phones.len(), 2);
        assert_eq!(lead.phones[0].value_type.as_deref(), Some("WORK"));
        assert_eq!(lead.primary_phone(), Some("919876543210"));
    }

    #[test]
    fn test_lead_without_phone_field() {
        let lead = parse(r#"{"result": {"ID": "42", "TITLE": "No phone"}}"#);
        assert!(lead.phones.is_empty());
    }

    #[test]
    fn test_missing_result_is_empty_lead() {
        let lead = parse(r#"{"time": {}}"#);
        assert!(lead.phones.is_empty());
        assert_eq!(lead.primary_phone(), None);
    }

    #[test]
    fn test_null_phone_field() {
        let lead = parse(r#"{"result": {"PHONE": null}}"#);
        assert!(lead.phones.is_empty());
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let client = BitrixClient::new(CrmConfig {
            base_url: "https://crm.example.com/rest/1/token/".to_string(),
            timeout_secs: 5,
        })
        .unwrap();
        assert_eq!(client.base_url, "https://crm.example.com/rest/1/token");
    }
}
