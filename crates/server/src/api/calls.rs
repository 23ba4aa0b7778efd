//! Call initiation API handler.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    Json,
};
use dialbridge_core::CallError;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

/// Parameters accepted from the query string.
#[derive(Debug, Default, Deserialize)]
pub struct InitiateCallParams {
    pub lead_id: Option<String>,
    pub from_number: Option<String>,
}

/// Parameters accepted from a JSON body. CRM ids and phone numbers may
/// arrive as JSON numbers.
#[derive(Debug, Default, Deserialize)]
pub struct InitiateCallBody {
    #[serde(default, deserialize_with = "string_or_number")]
    pub lead_id: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub from_number: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<StringOrNumber>::deserialize(deserializer)?.map(|value| match value {
            StringOrNumber::String(s) => s,
            StringOrNumber::Number(n) => n.to_string(),
        }),
    )
}

#[derive(Debug, Serialize)]
pub struct InitiateCallResponse {
    pub call_id: String,
    pub to_number: String,
    pub status: &'static str,
}

/// Error body, `{"detail": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, detail: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            detail: detail.into(),
        }),
    )
}

impl From<CallError> for ErrorResponse {
    fn from(err: CallError) -> Self {
        Self {
            detail: err.to_string(),
        }
    }
}

fn status_for(err: &CallError) -> StatusCode {
    match err {
        CallError::Validation(_) => StatusCode::BAD_REQUEST,
        CallError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /initiate-call
///
/// Resolve the lead's phone in the CRM and ask the provider to place the call.
/// Query parameters take precedence over body fields.
pub async fn initiate_call(
    State(state): State<Arc<AppState>>,
    query: Result<Query<InitiateCallParams>, QueryRejection>,
    body: Bytes,
) -> Result<Json<InitiateCallResponse>, ApiError> {
    let Query(query) = query.map_err(|rejection| {
        api_error(
            StatusCode::BAD_REQUEST,
            format!("Invalid query string: {}", rejection.body_text()),
        )
    })?;
    let body_params = parse_body(&body)?;

    let lead_id = pick(query.lead_id, body_params.lead_id);
    let from_number = pick(query.from_number, body_params.from_number);

    match state.calls().initiate(&lead_id, &from_number).await {
        Ok(call) => Ok(Json(InitiateCallResponse {
            call_id: call.call_id,
            to_number: call.to_number,
            status: "initiated",
        })),
        Err(e) => {
            warn!("Call initiation for lead '{}' failed: {}", lead_id, e);
            Err((status_for(&e), Json(e.into())))
        }
    }
}

fn parse_body(body: &[u8]) -> Result<InitiateCallBody, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(InitiateCallBody::default());
    }

    serde_json::from_slice(body).map_err(|e| {
        api_error(
            StatusCode::BAD_REQUEST,
            format!("Invalid request body: {}", e),
        )
    })
}

fn pick(query: Option<String>, body: Option<String>) -> String {
    query
        .filter(|value| !value.is_empty())
        .or(body)
        .unwrap_or_default()
}
