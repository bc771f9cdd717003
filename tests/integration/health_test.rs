//! Integration tests for the health probe.

use axum::http::StatusCode;
use pixelbadger_remote::MemoryDriveProvider;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_health_needs_no_token() {
    let app = TestApp::new(MemoryDriveProvider::new());

    let response = app.request("GET", "/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "Healthy");
    let timestamp = response.body["timestamp"].as_str().expect("timestamp");
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = TestApp::new(MemoryDriveProvider::new());
    let response = app.get("/api/nothing-here").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
