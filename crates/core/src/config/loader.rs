use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Prefix for structured environment overrides, e.g. `DIALBRIDGE_TELEPHONY__API_KEY`.
pub const ENV_PREFIX: &str = "DIALBRIDGE_";

/// Load configuration from an optional TOML file with environment variable overrides.
///
/// Precedence (lowest to highest): file, legacy variables
/// (`TELER_API_KEY`, `BACKEND_DOMAIN`, `BITRIX_WEBHOOK_URL`), `DIALBRIDGE_*` variables.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut figment = Figment::new();

    if let Some(path) = path {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }
        figment = figment.merge(Toml::file(path));
    }

    let config: Config = figment
        .merge(legacy_env())
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

fn legacy_env() -> Env {
    Env::raw()
        .only(&["TELER_API_KEY", "BACKEND_DOMAIN", "BITRIX_WEBHOOK_URL"])
        .map(|key| {
            if key.as_str().eq_ignore_ascii_case("TELER_API_KEY") {
                "telephony.api_key".into()
            } else if key.as_str().eq_ignore_ascii_case("BACKEND_DOMAIN") {
                "telephony.backend_domain".into()
            } else {
                "crm.base_url".into()
            }
        })
}
