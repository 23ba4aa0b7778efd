use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dialbridge_core::{
    load_config, validate_config, BitrixClient, CallRegistry, CallService, CrmClient,
    FrejunClient, TelephonyProvider,
};
use dialbridge_server::{api::create_router, state::AppState};

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Config file used when `DIALBRIDGE_CONFIG` is not set and the file exists
const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("dialbridge {} starting", VERSION);

    // Load configuration
    let config_path = config_path();
    match &config_path {
        Some(path) => info!("Loading configuration from {:?} and environment", path),
        None => info!("No config file, loading configuration from environment"),
    }
    let config = load_config(config_path.as_deref()).context("Failed to load configuration")?;

    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!(
        "CRM host: {}",
        config.crm.host().as_deref().unwrap_or("<unparseable>")
    );
    info!("Telephony API: {}", config.telephony.api_url);
    info!("Callback domain: {}", config.telephony.backend_domain);

    // Upstream clients
    let crm: Arc<dyn CrmClient> = Arc::new(
        BitrixClient::new(config.crm.clone()).context("Failed to create CRM client")?,
    );
    let telephony: Arc<dyn TelephonyProvider> = Arc::new(
        FrejunClient::new(config.telephony.clone())
            .context("Failed to create telephony client")?,
    );

    let registry = Arc::new(CallRegistry::new());
    let calls = CallService::new(
        crm,
        telephony,
        Arc::clone(&registry),
        &config.telephony.backend_domain,
    );

    // Create app state
    let state = Arc::new(AppState::new(config.clone(), calls));

    // Create router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!(
        "Server shutting down, {} call attempt(s) recorded this run",
        registry.len().await
    );

    Ok(())
}

/// Explicit `DIALBRIDGE_CONFIG` (must exist), else `config.toml` if present.
fn config_path() -> Option<PathBuf> {
    match std::env::var("DIALBRIDGE_CONFIG") {
        Ok(path) => Some(PathBuf::from(path)),
        Err(_) => {
            let default = PathBuf::from(DEFAULT_CONFIG_PATH);
            default.exists().then_some(default)
        }
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
