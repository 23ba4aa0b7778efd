use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - CRM base URL, telephony API key, backend domain and API URL are not blank
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    let required = [
        ("crm.base_url", &config.crm.base_url),
        ("telephony.api_key", &config.telephony.api_key),
        ("telephony.backend_domain", &config.telephony.backend_domain),
        ("telephony.api_url", &config.telephony.api_url),
    ];
    for (name, value) in required {
        if value.trim().is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "{} cannot be empty",
                name
            )));
        }
    }

    Ok(())
}
