//! Provider webhook endpoints.
//!
//! Both endpoints acknowledge any JSON payload. The body is parsed regardless
//! of the declared content type; an empty body is acknowledged as `null`.

use axum::{body::Bytes, http::StatusCode, Json};
use dialbridge_core::{WebhookEvent, WebhookKind};
use serde::Serialize;
use serde_json::Value;

use super::calls::ErrorResponse;

#[derive(Debug, Serialize)]
pub struct AckResponse {
    pub status: &'static str,
}

/// POST /frejun-flow
pub async fn frejun_flow(body: Bytes) -> Result<Json<AckResponse>, (StatusCode, Json<ErrorResponse>)> {
    acknowledge(WebhookKind::Inbound, &body)
}

/// POST /frejun-handler
pub async fn frejun_handler(
    body: Bytes,
) -> Result<Json<AckResponse>, (StatusCode, Json<ErrorResponse>)> {
    acknowledge(WebhookKind::Outbound, &body)
}

fn acknowledge(
    kind: WebhookKind,
    body: &[u8],
) -> Result<Json<AckResponse>, (StatusCode, Json<ErrorResponse>)> {
    let payload = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        serde_json::from_slice(body).map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    detail: format!("Invalid JSON payload: {}", e),
                }),
            )
        })?
    };

    WebhookEvent::new(kind, payload).record();

    Ok(Json(AckResponse { status: "ok" }))
}
