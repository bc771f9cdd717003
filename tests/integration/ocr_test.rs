//! Integration tests for the OCR endpoint.

use axum::http::StatusCode;
use serde_json::json;

use pixelbadger_api::dto::request::MAX_OCR_FILES;
use pixelbadger_core::types::{ChatContent, ChatMessage};
use pixelbadger_remote::MemoryDriveProvider;
use pixelbadger_service::ocr::{DEFAULT_USER_MESSAGE, SYSTEM_PROMPT};

use crate::helpers::{TOKEN, TestApp};

#[tokio::test]
async fn test_extract_with_defaults() {
    let app = TestApp::new(MemoryDriveProvider::new());

    let response = app
        .request("POST", "/ocrrrr/extract", Some(json!({})), Some(TOKEN))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({"extractedText": "Arr, 'tis a treasure map"})
    );

    let seen = app.completion.seen.lock().unwrap();
    assert_eq!(seen[0], ChatMessage::system(SYSTEM_PROMPT));
    assert_eq!(seen[1], ChatMessage::user(DEFAULT_USER_MESSAGE));
}

#[tokio::test]
async fn test_extract_attaches_existing_images() {
    let app = TestApp::new(MemoryDriveProvider::new());
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("sign.webp");
    std::fs::write(&image, b"RIFF").unwrap();

    let response = app
        .request(
            "POST",
            "/ocrrrr/extract",
            Some(json!({
                "userMessage": "Read the sign",
                "filePaths": [
                    image.to_string_lossy(),
                    dir.path().join("missing.png").to_string_lossy(),
                ],
            })),
            Some(TOKEN),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);

    let seen = app.completion.seen.lock().unwrap();
    let parts = &seen[1].parts;
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0], ChatContent::Text("Read the sign".to_string()));
    assert!(matches!(
        &parts[1],
        ChatContent::Image { mime_type, .. } if mime_type == "image/webp"
    ));
}

#[tokio::test]
async fn test_extract_requires_token() {
    let app = TestApp::new(MemoryDriveProvider::new());

    let response = app
        .request("POST", "/ocrrrr/extract", Some(json!({})), None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_extract_rejects_too_many_files() {
    let app = TestApp::new(MemoryDriveProvider::new());
    let paths: Vec<String> = (0..=MAX_OCR_FILES).map(|i| format!("/tmp/{i}.png")).collect();

    let response = app
        .request(
            "POST",
            "/ocrrrr/extract",
            Some(json!({"filePaths": paths})),
            Some(TOKEN),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}
