//! Common test utilities for E2E testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! with mock upstreams injected, so the HTTP surface can be exercised without
//! a CRM or telephony account.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use dialbridge_core::{
    testing::{fixtures, MockCrmClient, MockTelephonyProvider},
    CallRegistry, CallService, CrmClient, TelephonyProvider,
};
use dialbridge_server::{api::create_router, state::AppState};

/// Test fixture for E2E testing with mock dependencies.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_initiate() {
///     let fixture = TestFixture::new().await;
///     fixture.crm.add_lead(fixtures::lead_with_phone("42", "919876543210")).await;
///
///     let response = fixture.post_empty("/initiate-call?lead_id=42&from_number=99").await;
///     assert_eq!(response.status, StatusCode::OK);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock CRM - configure leads
    pub crm: Arc<MockCrmClient>,
    /// Mock telephony provider - inspect submitted calls
    pub telephony: Arc<MockTelephonyProvider>,
    /// Registry shared with the app state
    pub registry: Arc<CallRegistry>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    pub text: String,
}

impl TestFixture {
    /// Create a new test fixture with empty mocks.
    pub async fn new() -> Self {
        let crm = Arc::new(MockCrmClient::new());
        let telephony = Arc::new(MockTelephonyProvider::new());
        let registry = Arc::new(CallRegistry::new());

        let config = fixtures::default_config();
        let calls = CallService::new(
            Arc::clone(&crm) as Arc<dyn CrmClient>,
            Arc::clone(&telephony) as Arc<dyn TelephonyProvider>,
            Arc::clone(&registry),
            &config.telephony.backend_domain,
        );

        let state = Arc::new(AppState::new(config, calls));
        let router = create_router(state);

        Self {
            router,
            crm,
            telephony,
            registry,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        let body = serde_json::to_string(&body).unwrap();
        self.request("POST", path, Some(body), Some("application/json"))
            .await
    }

    /// Send a POST request without a body (parameters in the query string).
    pub async fn post_empty(&self, path: &str) -> TestResponse {
        self.request("POST", path, None, None).await
    }

    /// Send a POST request with raw string body and custom content type.
    pub async fn post_raw(&self, path: &str, body: &str, content_type: &str) -> TestResponse {
        self.request("POST", path, Some(body.to_string()), Some(content_type))
            .await
    }

    async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<String>,
        content_type: Option<&str>,
    ) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);
        if let Some(content_type) = content_type {
            request_builder = request_builder.header("Content-Type", content_type);
        }

        let body = body.map(Body::from).unwrap_or_else(Body::empty);
        let request = request_builder.body(body).unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let text = String::from_utf8_lossy(&body_bytes).into_owned();
        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body, text }
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status, $response.status, $response.text
        );
    };
}
