use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub crm: CrmConfig,
    pub telephony: TelephonyConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    8000
}

/// CRM (Bitrix24 REST webhook) configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CrmConfig {
    /// Inbound webhook base URL, e.g. "https://example.bitrix24.com/rest/1/abc123"
    pub base_url: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// Telephony provider (FreJun) configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelephonyConfig {
    /// Bearer token sent with every call-initiation request
    pub api_key: String,
    /// Public domain of this service, used to build webhook callback URLs
    pub backend_domain: String,
    /// Call-initiation endpoint
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl CrmConfig {
    /// Host part of the webhook URL. The path carries the webhook secret.
    pub fn host(&self) -> Option<String> {
        reqwest::Url::parse(&self.base_url)
            .ok()
            .and_then(|url| url.host_str().map(str::to_string))
    }
}

pub const DEFAULT_TELEPHONY_API_URL: &str = "https://api.frejun.ai/v1/call/outgoing";

fn default_api_url() -> String {
    DEFAULT_TELEPHONY_API_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub crm: SanitizedCrmConfig,
    pub telephony: SanitizedTelephonyConfig,
}

/// Sanitized CRM config (webhook URL reduced to its host)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedCrmConfig {
    pub host: Option<String>,
    pub base_url_configured: bool,
    pub timeout_secs: u64,
}

/// Sanitized telephony config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedTelephonyConfig {
    pub api_key_configured: bool,
    pub backend_domain: String,
    pub api_url: String,
    pub timeout_secs: u64,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            crm: SanitizedCrmConfig {
                host: config.crm.host(),
                base_url_configured: !config.crm.base_url.is_empty(),
                timeout_secs: config.crm.timeout_secs,
            },
            telephony: SanitizedTelephonyConfig {
                api_key_configured: !config.telephony.api_key.is_empty(),
                backend_domain: config.telephony.backend_domain.clone(),
                api_url: config.telephony.api_url.clone(),
                timeout_secs: config.telephony.timeout_secs,
            },
        }
    }
}
