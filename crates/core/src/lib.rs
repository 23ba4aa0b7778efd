pub mod calls;
pub mod config;
pub mod crm;
pub mod metrics;
pub mod telephony;
pub mod testing;
pub mod webhook;

pub use calls::{
    normalize_source_number, CallAttempt, CallError, CallRegistry, CallService, InitiatedCall,
};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, CrmConfig,
    SanitizedConfig, ServerConfig, TelephonyConfig,
};
pub use crm::{BitrixClient, CrmClient, CrmError, Lead, LeadPhone};
pub use telephony::{
    CallMetadata, CallbackUrls, FrejunClient, OutgoingCallRequest, ProviderResponse,
    TelephonyError, TelephonyProvider,
};
pub use webhook::{WebhookEvent, WebhookKind};
