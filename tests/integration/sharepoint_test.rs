//! Integration tests for the SharePoint endpoints.

use axum::http::StatusCode;

use pixelbadger_core::error::AppError;
use pixelbadger_core::types::DriveItem;
use pixelbadger_remote::MemoryDriveProvider;

use crate::helpers::TestApp;

const FIXTURE_TREE: &str = "\
/ [d:root] 3 items
  Contracts/ [d:folder_001] 1 items 03-05 14:07
    MSA-Contoso.pdf [f:doc_001] 1.5M pdf 03-04 16:45
  Reports/ [d:folder_002] 2 items 02-11 08:15
    2024/ [d:folder_003] 1 items 02-11 08:15
      q1.xlsx [f:doc_002] 20K xlsx 04-01 09:00
    summary.DOCX [f:doc_003] 2K docx 02-10 12:30
  README [f:doc_004] 512B file 01-02 10:00
";

#[tokio::test]
async fn test_items_renders_full_tree_as_text() {
    let app = TestApp::with_fixture().await;

    let response = app.get("/mcp/sharepoint/sites/contoso/items").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.content_type.starts_with("text/plain"));
    assert_eq!(response.text, FIXTURE_TREE);
    // root, Contracts, Reports, Reports/2024
    assert_eq!(app.drive.list_calls(), 4);
}

#[tokio::test]
async fn test_items_is_repeatable() {
    let app = TestApp::with_fixture().await;

    let first = app.get("/mcp/sharepoint/sites/contoso/items").await;
    let second = app.get("/mcp/sharepoint/sites/contoso/items").await;

    assert_eq!(first.text, second.text);
}

#[tokio::test]
async fn test_items_under_subfolder() {
    let app = TestApp::with_fixture().await;

    let response = app
        .get("/mcp/sharepoint/sites/contoso/items?path=Reports%2F2024")
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.text,
        "/ [d:root] 1 items\n  q1.xlsx [f:doc_001] 20K xlsx 04-01 09:00\n"
    );
}

#[tokio::test]
async fn test_items_requires_bearer_token() {
    let app = TestApp::with_fixture().await;

    let response = app
        .request("GET", "/mcp/sharepoint/sites/contoso/items", None, None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");
    assert_eq!(app.drive.list_calls(), 0);
}

#[tokio::test]
async fn test_missing_folder_is_404() {
    let app = TestApp::with_fixture().await;

    let response = app
        .get("/mcp/sharepoint/sites/contoso/items?path=Archive")
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_nested_failure_fails_whole_request() {
    let app = TestApp::with_fixture().await;
    app.drive.fail_path(
        "Reports/2024",
        AppError::service_unavailable("Graph returned HTTP 503"),
    );

    let response = app.get("/mcp/sharepoint/sites/contoso/items").await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.body["message"], "Graph returned HTTP 503");
    assert!(!response.text.contains("[d:root]"));
}

#[tokio::test]
async fn test_permission_denied_maps_to_403() {
    let app = TestApp::new(MemoryDriveProvider::new());
    app.drive
        .fail_path("", AppError::authorization("Access denied"));

    let response = app.get("/mcp/sharepoint/sites/contoso/items").await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_empty_drive() {
    let app = TestApp::new(MemoryDriveProvider::new());

    let response = app.get("/mcp/sharepoint/sites/contoso/items").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.text, "/ [d:root] 0 items\n");
}

#[tokio::test]
async fn test_search_returns_camel_case_items() {
    let app = TestApp::with_fixture().await;

    let response = app.get("/mcp/sharepoint/sites/contoso/search?q=q1").await;

    assert_eq!(response.status, StatusCode::OK);
    let items = response.body.as_array().expect("array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "q1.xlsx");
    assert_eq!(items[0]["parentPath"], "Reports/2024");
    assert_eq!(items[0]["isFolder"], false);
    assert_eq!(items[0]["size"], 20480);
}

#[tokio::test]
async fn test_blank_search_is_400() {
    let app = TestApp::with_fixture().await;

    for path in [
        "/mcp/sharepoint/sites/contoso/search",
        "/mcp/sharepoint/sites/contoso/search?q=",
        "/mcp/sharepoint/sites/contoso/search?q=%20%20",
    ] {
        let response = app.get(path).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{path}");
        assert_eq!(response.body["message"], "Search query 'q' is required");
    }
}

#[tokio::test]
async fn test_item_metadata() {
    let app = TestApp::with_fixture().await;

    let response = app
        .get("/mcp/sharepoint/sites/contoso/items/d-msa/metadata")
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["name"], "MSA-Contoso.pdf");
    assert_eq!(response.body["contentType"], "application/pdf");
    assert_eq!(response.body["size"], 1572864);
    assert_eq!(response.body["parentPath"], "Contracts");
}

#[tokio::test]
async fn test_unknown_item_metadata_is_404() {
    let app = TestApp::with_fixture().await;

    let response = app
        .get("/mcp/sharepoint/sites/contoso/items/missing/metadata")
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_site_info() {
    let app = TestApp::new(
        MemoryDriveProvider::new().with_children("", vec![DriveItem::folder("A", "")]),
    );

    let response = app.get("/mcp/sharepoint/sites/contoso").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["id"], "contoso");
    assert!(response.body.get("webUrl").is_some());
}
