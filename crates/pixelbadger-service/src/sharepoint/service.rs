//! SharePoint document operations.

use std::sync::Arc;

use bytes::Bytes;
use tokio_util::sync::CancellationToken;
use tracing::info;

use pixelbadger_core::error::AppError;
use pixelbadger_core::result::AppResult;
use pixelbadger_core::traits::{DriveListing, DriveProvider};
use pixelbadger_core::types::{CredentialContext, Document, DriveItem, Site};

use super::tree::TreeFormatter;

/// SharePoint site and document queries.
#[derive(Debug, Clone)]
pub struct SharePointService {
    /// Remote document store.
    provider: Arc<dyn DriveProvider>,
    /// Tree renderer sharing the same provider.
    formatter: TreeFormatter,
}

impl SharePointService {
    /// Creates a new SharePoint service.
    pub fn new<P: DriveProvider>(provider: Arc<P>) -> Self {
        let listing: Arc<dyn DriveListing> = provider.clone();
        Self {
            formatter: TreeFormatter::new(listing),
            provider,
        }
    }

    /// Name of the backing provider.
    pub fn provider_type(&self) -> &str {
        self.provider.provider_type()
    }

    /// Site details.
    pub async fn get_site_info(
        &self,
        site_id: &str,
        credentials: &CredentialContext,
    ) -> AppResult<Site> {
        self.provider.get_site(site_id, credentials).await
    }

    /// Renders the drive tree under `path` (empty for the drive root).
    pub async fn list_drive_items(
        &self,
        site_id: &str,
        path: &str,
        credentials: &CredentialContext,
        cancel: &CancellationToken,
    ) -> AppResult<String> {
        self.formatter
            .format_tree(site_id, path, credentials, cancel)
            .await
    }

    /// Metadata of a single item.
    pub async fn get_document_metadata(
        &self,
        site_id: &str,
        item_id: &str,
        credentials: &CredentialContext,
    ) -> AppResult<Document> {
        self.provider
            .get_document_metadata(site_id, item_id, credentials)
            .await
    }

    /// Searches the site's default drive.
    pub async fn search_documents(
        &self,
        site_id: &str,
        query: &str,
        credentials: &CredentialContext,
    ) -> AppResult<Vec<DriveItem>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::validation("Search query 'q' is required"));
        }

        let results = self
            .provider
            .search_documents(site_id, query, credentials)
            .await?;
        info!(site_id, query, hits = results.len(), "Searched documents");
        Ok(results)
    }

    /// Raw content of a document.
    pub async fn get_document_content(
        &self,
        site_id: &str,
        item_id: &str,
        credentials: &CredentialContext,
    ) -> AppResult<Bytes> {
        self.provider
            .get_document_content(site_id, item_id, credentials)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixelbadger_core::error::ErrorKind;
    use pixelbadger_remote::MemoryDriveProvider;

    fn service() -> (SharePointService, MemoryDriveProvider) {
        let drive = MemoryDriveProvider::new().with_children(
            "",
            vec![
                DriveItem::folder("Budget", ""),
                DriveItem::file("budget-2024.xlsx", "", 2048).with_id("b24"),
            ],
        );
        (SharePointService::new(Arc::new(drive.clone())), drive)
    }

    #[tokio::test]
    async fn test_blank_search_is_rejected_without_remote_call() {
        let (svc, _) = service();
        let err = svc
            .search_documents("site", "   ", &CredentialContext::app())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.message, "Search query 'q' is required");
    }

    #[tokio::test]
    async fn test_search_returns_matches() {
        let (svc, _) = service();
        let hits = svc
            .search_documents("site", "budget", &CredentialContext::app())
            .await
            .unwrap();
        assert_eq!(hits.len(), 2);
    }

    #[tokio::test]
    async fn test_list_drive_items_renders_tree() {
        let (svc, drive) = service();
        let out = svc
            .list_drive_items("site", "", &CredentialContext::app(), &CancellationToken::new())
            .await
            .unwrap();
        assert!(out.starts_with("/ [d:root] 2 items\n"));
        assert!(out.contains("Budget/ [d:folder_001] 0 items"));
        assert!(out.contains("budget-2024.xlsx [f:doc_001] 2K xlsx"));
        assert_eq!(drive.list_calls(), 2);
        assert_eq!(svc.provider_type(), "memory");
    }

    #[tokio::test]
    async fn test_metadata_passes_through() {
        let (svc, _) = service();
        let doc = svc
            .get_document_metadata("site", "b24", &CredentialContext::app())
            .await
            .unwrap();
        assert_eq!(doc.name, "budget-2024.xlsx");
    }
}
