//! Remote document store traits.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;
use crate::types::{CredentialContext, Document, DriveItem, Site};

/// Lists the children of a folder in a site's default drive.
///
/// This is the only capability the tree formatter needs, kept separate so
/// it can be satisfied by a small fake in tests.
#[async_trait]
pub trait DriveListing: Send + Sync + std::fmt::Debug + 'static {
    /// List the direct children of `path` (empty for the drive root).
    ///
    /// Every returned item has `parent_path == path`. Order is unspecified.
    async fn list_children(
        &self,
        site_id: &str,
        path: &str,
        credentials: &CredentialContext,
    ) -> AppResult<Vec<DriveItem>>;
}

/// Full remote document store.
///
/// Implementations exist for Microsoft Graph and an in-memory tree.
#[async_trait]
pub trait DriveProvider: DriveListing {
    /// Return the provider type name (e.g., "graph", "memory").
    fn provider_type(&self) -> &str;

    /// Fetch site information.
    async fn get_site(&self, site_id: &str, credentials: &CredentialContext) -> AppResult<Site>;

    /// Fetch detailed metadata for a single item.
    async fn get_document_metadata(
        &self,
        site_id: &str,
        item_id: &str,
        credentials: &CredentialContext,
    ) -> AppResult<Document>;

    /// Search the site's default drive by name and content.
    async fn search_documents(
        &self,
        site_id: &str,
        query: &str,
        credentials: &CredentialContext,
    ) -> AppResult<Vec<DriveItem>>;

    /// Download a document's content.
    async fn get_document_content(
        &self,
        site_id: &str,
        item_id: &str,
        credentials: &CredentialContext,
    ) -> AppResult<Bytes>;
}
