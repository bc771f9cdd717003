//! Shared test helpers for integration tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use pixelbadger_core::config::{AppConfig, DriveProviderKind};
use pixelbadger_core::result::AppResult;
use pixelbadger_core::traits::CompletionClient;
use pixelbadger_core::types::ChatMessage;
use pixelbadger_remote::MemoryDriveProvider;
use pixelbadger_service::{OcrService, SharePointService};

/// Bearer token used by authenticated requests.
pub const TOKEN: &str = "test-token";

/// Completion client that records the conversation and answers with a fixed reply.
#[derive(Debug)]
pub struct StubCompletion {
    pub reply: String,
    pub seen: Mutex<Vec<ChatMessage>>,
}

#[async_trait]
impl CompletionClient for StubCompletion {
    fn model(&self) -> &str {
        "stub"
    }

    async fn complete(&self, messages: Vec<ChatMessage>) -> AppResult<String> {
        *self.seen.lock().unwrap() = messages;
        Ok(self.reply.clone())
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Drive behind the SharePoint endpoints
    pub drive: MemoryDriveProvider,
    /// Completion client behind the OCR endpoint
    pub completion: Arc<StubCompletion>,
}

impl TestApp {
    /// Create a test application over `drive`
    pub fn new(drive: MemoryDriveProvider) -> Self {
        let mut config = AppConfig::default();
        config.sharepoint.provider = DriveProviderKind::Memory;
        config.openai.api_key = "sk-test".to_string();
        config.validate().expect("test config is valid");

        let completion = Arc::new(StubCompletion {
            reply: "Arr, 'tis a treasure map".to_string(),
            seen: Mutex::new(Vec::new()),
        });

        let state = pixelbadger_api::AppState::new(
            config,
            SharePointService::new(Arc::new(drive.clone())),
            OcrService::new(completion.clone()),
        );

        Self {
            router: pixelbadger_api::build_router(state),
            drive,
            completion,
        }
    }

    /// Create a test application over the sample drive fixture
    pub async fn with_fixture() -> Self {
        let drive = MemoryDriveProvider::from_fixture("fixtures/drive.json")
            .await
            .expect("Failed to load drive fixture");
        Self::new(drive)
    }

    /// Make a request to the test server
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let text = String::from_utf8_lossy(&body_bytes).into_owned();
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            content_type,
            text,
            body,
        }
    }

    /// Authenticated GET
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None, Some(TOKEN)).await
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Content-Type header
    pub content_type: String,
    /// Raw body text
    pub text: String,
    /// Body parsed as JSON (Null when not JSON)
    pub body: Value,
}
