//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use pixelbadger_core::config::AppConfig;
use pixelbadger_service::{OcrService, SharePointService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// SharePoint queries and tree rendering
    pub sharepoint: Arc<SharePointService>,
    /// Image text extraction
    pub ocr: Arc<OcrService>,
}

impl AppState {
    /// Bundles the configuration and services.
    pub fn new(config: AppConfig, sharepoint: SharePointService, ocr: OcrService) -> Self {
        Self {
            config: Arc::new(config),
            sharepoint: Arc::new(sharepoint),
            ocr: Arc::new(ocr),
        }
    }
}
