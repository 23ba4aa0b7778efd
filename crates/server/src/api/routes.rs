use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use dialbridge_core::WebhookKind;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::{calls, handlers, middleware::metrics_middleware, webhooks};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // Operational routes
    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config));

    // Paths below are registered with the telephony provider, keep them at the root.
    Router::new()
        .route("/initiate-call", post(calls::initiate_call))
        .route(WebhookKind::Inbound.path(), post(webhooks::frejun_flow))
        .route(WebhookKind::Outbound.path(), post(webhooks::frejun_handler))
        .route("/metrics", get(handlers::metrics))
        .nest("/api/v1", api_routes)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
