//! In-memory drive provider.
//!
//! Serves a single drive tree from memory for local development and tests.
//! The site ID is accepted but not used to select a drive.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use tracing::debug;

use pixelbadger_core::error::{AppError, ErrorKind};
use pixelbadger_core::result::AppResult;
use pixelbadger_core::traits::{DriveListing, DriveProvider};
use pixelbadger_core::types::drive::epoch;
use pixelbadger_core::types::{CredentialContext, Document, DriveItem, ItemKind, Site};

/// In-memory drive keyed by folder path.
#[derive(Debug, Clone)]
pub struct MemoryDriveProvider {
    /// Folder path (no leading or trailing `/`) to its children.
    folders: Arc<DashMap<String, Vec<DriveItem>>>,
    /// File content by item ID.
    contents: Arc<DashMap<String, Bytes>>,
    /// Paths whose listing fails with the stored error.
    failures: Arc<DashMap<String, AppError>>,
    /// Number of `list_children` calls served or failed.
    list_calls: Arc<AtomicUsize>,
}

impl Default for MemoryDriveProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize(path: &str) -> String {
    path.trim_matches('/').to_string()
}

impl MemoryDriveProvider {
    /// Create a provider holding an empty drive root.
    pub fn new() -> Self {
        let folders = DashMap::new();
        folders.insert(String::new(), Vec::new());
        Self {
            folders: Arc::new(folders),
            contents: Arc::new(DashMap::new()),
            failures: Arc::new(DashMap::new()),
            list_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Load a drive from a JSON fixture mapping folder paths to their children.
    ///
    /// ```json
    /// { "": [{"name": "Reports", "kind": {"type": "folder"}}],
    ///   "Reports": [{"name": "q1.pdf", "kind": {"type": "file", "size": 2048}}] }
    /// ```
    pub async fn from_fixture(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Failed to read drive fixture: {}", path.display()),
                e,
            )
        })?;
        let tree: HashMap<String, Vec<DriveItem>> = serde_json::from_str(&raw)?;

        let provider = Self::new();
        for (folder, children) in tree {
            provider.insert_children(&folder, children);
        }

        debug!(
            fixture = %path.display(),
            folders = provider.folders.len(),
            "Loaded in-memory drive fixture"
        );
        Ok(provider)
    }

    /// Builder form of [`insert_children`](Self::insert_children).
    pub fn with_children(self, path: &str, children: Vec<DriveItem>) -> Self {
        self.insert_children(path, children);
        self
    }

    /// Replace the children of `path`.
    ///
    /// Each child's parent path is set to `path`. Child folders that have no
    /// listing yet are registered as empty so they can be listed.
    pub fn insert_children(&self, path: &str, children: Vec<DriveItem>) {
        let folder = normalize(path);
        let mut assigned = Vec::with_capacity(children.len());

        for (index, mut child) in children.into_iter().enumerate() {
            child.parent_path = folder.clone();
            if child.id.is_empty() {
                child.id = if folder.is_empty() {
                    format!("item-{index}-{}", child.name)
                } else {
                    format!("item-{folder}/{index}-{}", child.name)
                };
            }
            if child.is_folder() {
                self.folders.entry(child.child_path()).or_default();
            }
            assigned.push(child);
        }

        self.folders.insert(folder, assigned);
    }

    /// Store downloadable content for an item.
    pub fn insert_content(&self, item_id: impl Into<String>, data: impl Into<Bytes>) {
        self.contents.insert(item_id.into(), data.into());
    }

    /// Make every listing of `path` fail with `error` until cleared.
    pub fn fail_path(&self, path: &str, error: AppError) {
        self.failures.insert(normalize(path), error);
    }

    /// Remove an injected failure.
    pub fn clear_failure(&self, path: &str) {
        self.failures.remove(&normalize(path));
    }

    /// Number of listing calls made so far.
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    fn find_item(&self, item_id: &str) -> Option<DriveItem> {
        self.folders.iter().find_map(|entry| {
            entry
                .value()
                .iter()
                .find(|item| item.id == item_id)
                .cloned()
        })
    }
}

#[async_trait]
impl DriveListing for MemoryDriveProvider {
    async fn list_children(
        &self,
        site_id: &str,
        path: &str,
        _credentials: &CredentialContext,
    ) -> AppResult<Vec<DriveItem>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let folder = normalize(path);

        if let Some(error) = self.failures.get(&folder) {
            return Err(error.value().clone());
        }

        let children = self
            .folders
            .get(&folder)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::not_found(format!("Folder not found: {path}")))?;

        debug!(site_id, path = %folder, count = children.len(), "Listed in-memory folder");
        Ok(children)
    }
}

#[async_trait]
impl DriveProvider for MemoryDriveProvider {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn get_site(&self, site_id: &str, _credentials: &CredentialContext) -> AppResult<Site> {
        Ok(Site {
            id: site_id.to_string(),
            name: site_id.to_string(),
            display_name: site_id.to_string(),
            web_url: format!("memory://sites/{site_id}"),
            description: "In-memory drive".to_string(),
            created_at: epoch(),
            last_modified_at: epoch(),
        })
    }

    async fn get_document_metadata(
        &self,
        _site_id: &str,
        item_id: &str,
        _credentials: &CredentialContext,
    ) -> AppResult<Document> {
        let item = self
            .find_item(item_id)
            .ok_or_else(|| AppError::not_found(format!("Item not found: {item_id}")))?;

        let content_type = match &item.kind {
            ItemKind::File { mime_type, .. } => mime_type.clone().unwrap_or_default(),
            ItemKind::Folder { .. } => String::new(),
        };

        Ok(Document {
            size: item.size(),
            id: item.id,
            name: item.name,
            web_url: item.web_url,
            parent_path: item.parent_path,
            content_type,
            created_at: item.created_at,
            last_modified_at: item.last_modified_at,
            created_by: item.created_by,
            last_modified_by: item.last_modified_by,
            metadata: serde_json::Map::new(),
        })
    }

    async fn search_documents(
        &self,
        _site_id: &str,
        query: &str,
        _credentials: &CredentialContext,
    ) -> AppResult<Vec<DriveItem>> {
        let needle = query.to_lowercase();
        let mut hits: Vec<DriveItem> = self
            .folders
            .iter()
            .flat_map(|entry| entry.value().clone())
            .filter(|item| item.name.to_lowercase().contains(&needle))
            .collect();
        hits.sort_by_key(|item| item.child_path());
        Ok(hits)
    }

    async fn get_document_content(
        &self,
        _site_id: &str,
        item_id: &str,
        _credentials: &CredentialContext,
    ) -> AppResult<Bytes> {
        self.contents
            .get(item_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::not_found(format!("No content for item: {item_id}")))
    }
}
