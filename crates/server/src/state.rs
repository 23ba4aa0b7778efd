use std::sync::Arc;
use dialbridge_core::{CallRegistry, CallService, Config, SanitizedConfig};

/// Shared application state
pub struct AppState {
    config: Config,
    calls: CallService,
}

impl AppState {
    pub fn new(config: Config, calls: CallService) -> Self {
        Self { config, calls }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn calls(&self) -> &CallService {
        &self.calls
    }

    pub fn registry(&self) -> &Arc<CallRegistry> {
        self.calls.registry()
    }
}
