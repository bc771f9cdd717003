//! Microsoft Graph drive provider.
//!
//! Every operation targets the first drive of the site (the default
//! "Documents" library), matching how SharePoint exposes a site to users.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use reqwest::Url;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use pixelbadger_core::config::SharePointConfig;
use pixelbadger_core::error::AppError;
use pixelbadger_core::result::AppResult;
use pixelbadger_core::traits::{DriveListing, DriveProvider};
use pixelbadger_core::types::drive::epoch;
use pixelbadger_core::types::{CredentialContext, Document, DriveItem, ItemKind, Site};

use crate::http::{check_status, map_reqwest_error};
use crate::token::TokenProvider;

// ─── API Response Types ──────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct GraphCollection<T> {
    #[serde(default = "Vec::new")]
    value: Vec<T>,
    #[serde(rename = "@odata.nextLink", default)]
    next_link: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GraphDrive {
    id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphSite {
    id: Option<String>,
    name: Option<String>,
    display_name: Option<String>,
    web_url: Option<String>,
    description: Option<String>,
    created_date_time: Option<DateTime<Utc>>,
    last_modified_date_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphFolderFacet {
    child_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphFileFacet {
    mime_type: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphIdentity {
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GraphIdentitySet {
    user: Option<GraphIdentity>,
}

impl GraphIdentitySet {
    fn display_name(set: Option<&GraphIdentitySet>) -> String {
        set.and_then(|s| s.user.as_ref())
            .and_then(|u| u.display_name.clone())
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct GraphItemReference {
    path: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphDriveItem {
    id: Option<String>,
    name: Option<String>,
    web_url: Option<String>,
    size: Option<u64>,
    folder: Option<GraphFolderFacet>,
    file: Option<GraphFileFacet>,
    created_date_time: Option<DateTime<Utc>>,
    last_modified_date_time: Option<DateTime<Utc>>,
    created_by: Option<GraphIdentitySet>,
    last_modified_by: Option<GraphIdentitySet>,
    parent_reference: Option<GraphItemReference>,
}

/// Properties mapped onto [`Document`] fields; everything else lands in its metadata.
const DOCUMENT_FIELDS: &[&str] = &[
    "id",
    "name",
    "webUrl",
    "size",
    "file",
    "createdDateTime",
    "lastModifiedDateTime",
    "createdBy",
    "lastModifiedBy",
    "parentReference",
];

impl GraphDriveItem {
    fn into_drive_item(self, parent_path: String) -> DriveItem {
        let kind = match self.folder {
            Some(folder) => ItemKind::Folder {
                child_count: folder.child_count,
            },
            None => ItemKind::File {
                size: self.size.unwrap_or(0),
                mime_type: self.file.and_then(|f| f.mime_type),
            },
        };

        DriveItem {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            web_url: self.web_url.unwrap_or_default(),
            parent_path,
            kind,
            created_at: self.created_date_time.unwrap_or_else(epoch),
            last_modified_at: self.last_modified_date_time.unwrap_or_else(epoch),
            created_by: GraphIdentitySet::display_name(self.created_by.as_ref()),
            last_modified_by: GraphIdentitySet::display_name(self.last_modified_by.as_ref()),
        }
    }

    fn reference_path(&self) -> String {
        self.parent_reference
            .as_ref()
            .and_then(|r| r.path.clone())
            .unwrap_or_default()
    }
}

// ─── Provider ────────────────────────────────────────────────────────────

/// Drive provider backed by the Microsoft Graph REST API.
#[derive(Debug, Clone)]
pub struct GraphDriveProvider {
    http: reqwest::Client,
    base_url: Url,
    tokens: Arc<TokenProvider>,
}

impl GraphDriveProvider {
    /// Create a Graph provider from configuration.
    pub fn new(config: &SharePointConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("pixelbadger/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build HTTP client: {e}")))?;

        let base_url = Url::parse(&config.graph_base_url).map_err(|e| {
            AppError::configuration(format!(
                "Invalid graph_base_url '{}': {e}",
                config.graph_base_url
            ))
        })?;

        let tokens = Arc::new(TokenProvider::new(http.clone(), config));

        Ok(Self {
            http,
            base_url,
            tokens,
        })
    }

    /// Build an endpoint URL below the base URL; each segment is percent-encoded.
    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::configuration("graph_base_url cannot be a base URL"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(
        &self,
        url: Url,
        credentials: &CredentialContext,
        what: &str,
    ) -> AppResult<reqwest::Response> {
        let bearer = self.tokens.bearer_for(credentials).await?;
        debug!(url = %url, "Graph request");

        let response = self
            .http
            .get(url)
            .bearer_auth(bearer)
            .send()
            .await
            .map_err(|e| map_reqwest_error(e, what))?;

        check_status(response, what).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        credentials: &CredentialContext,
        what: &str,
    ) -> AppResult<T> {
        self.send(url, credentials, what)
            .await?
            .json()
            .await
            .map_err(|e| map_reqwest_error(e, what))
    }

    /// Fetch every page of a collection, following `@odata.nextLink`.
    async fn get_all<T: DeserializeOwned>(
        &self,
        url: Url,
        credentials: &CredentialContext,
        what: &str,
    ) -> AppResult<Vec<T>> {
        let mut items = Vec::new();
        let mut next = Some(url);

        while let Some(url) = next.take() {
            let page: GraphCollection<T> = self.get_json(url, credentials, what).await?;
            items.extend(page.value);
            next = match page.next_link {
                Some(link) => Some(Url::parse(&link).map_err(|e| {
                    AppError::external_service(format!("{what} returned an invalid nextLink: {e}"))
                })?),
                None => None,
            };
        }

        Ok(items)
    }

    /// The site's default drive, or `None` when the site has no drives.
    async fn default_drive_id(
        &self,
        site_id: &str,
        credentials: &CredentialContext,
    ) -> AppResult<Option<String>> {
        let url = self.endpoint(site_segments(site_id, &["drives"]))?;
        let drives: GraphCollection<GraphDrive> =
            self.get_json(url, credentials, "List drives").await?;
        Ok(drives.value.into_iter().next().map(|d| d.id))
    }

    async fn require_drive_id(
        &self,
        site_id: &str,
        credentials: &CredentialContext,
    ) -> AppResult<String> {
        self.default_drive_id(site_id, credentials)
            .await?
            .ok_or_else(|| AppError::not_found(format!("No drives found for site {site_id}")))
    }
}

/// Path segments for `/sites/{site_id}/...`. Site IDs such as
/// `contoso.sharepoint.com:/sites/team` keep their slashes.
fn site_segments<'a>(site_id: &'a str, rest: &[&'a str]) -> Vec<&'a str> {
    let mut segments = vec!["sites"];
    segments.extend(site_id.split('/').filter(|s| !s.is_empty()));
    segments.extend_from_slice(rest);
    segments
}

/// Path segments for listing the children of `path` in a drive.
fn children_segments(drive_id: &str, path: &str) -> Vec<String> {
    let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let mut segments = vec!["drives".to_string(), drive_id.to_string()];

    match parts.split_last() {
        None => segments.extend(["items", "root", "children"].map(String::from)),
        Some((last, leading)) => {
            segments.push("root:".to_string());
            segments.extend(leading.iter().map(|s| s.to_string()));
            segments.push(format!("{last}:"));
            segments.push("children".to_string());
        }
    }

    segments
}

/// Search function segment with the query quoted the OData way.
fn search_segment(query: &str) -> String {
    format!("search(q='{}')", query.replace('\'', "''"))
}

#[async_trait]
impl DriveListing for GraphDriveProvider {
    async fn list_children(
        &self,
        site_id: &str,
        path: &str,
        credentials: &CredentialContext,
    ) -> AppResult<Vec<DriveItem>> {
        let Some(drive_id) = self.default_drive_id(site_id, credentials).await? else {
            return Ok(Vec::new());
        };

        let segments = children_segments(&drive_id, path);
        let url = self.endpoint(segments.iter().map(String::as_str))?;
        let items: Vec<GraphDriveItem> = self.get_all(url, credentials, "List children").await?;

        debug!(site_id, path, count = items.len(), "Listed drive children");

        Ok(items
            .into_iter()
            .map(|item| item.into_drive_item(path.to_string()))
            .collect())
    }
}

#[async_trait]
impl DriveProvider for GraphDriveProvider {
    fn provider_type(&self) -> &str {
        "graph"
    }

    async fn get_site(&self, site_id: &str, credentials: &CredentialContext) -> AppResult<Site> {
        let url = self.endpoint(site_segments(site_id, &[]))?;
        let site: GraphSite = self.get_json(url, credentials, "Get site").await?;

        Ok(Site {
            id: site.id.unwrap_or_default(),
            name: site.name.unwrap_or_default(),
            display_name: site.display_name.unwrap_or_default(),
            web_url: site.web_url.unwrap_or_default(),
            description: site.description.unwrap_or_default(),
            created_at: site.created_date_time.unwrap_or_else(epoch),
            last_modified_at: site.last_modified_date_time.unwrap_or_else(epoch),
        })
    }

    async fn get_document_metadata(
        &self,
        site_id: &str,
        item_id: &str,
        credentials: &CredentialContext,
    ) -> AppResult<Document> {
        let drive_id = self.require_drive_id(site_id, credentials).await?;
        let url = self.endpoint(["drives", drive_id.as_str(), "items", item_id])?;
        let raw: serde_json::Value = self.get_json(url, credentials, "Get item").await?;
        document_from_json(raw)
    }

    async fn search_documents(
        &self,
        site_id: &str,
        query: &str,
        credentials: &CredentialContext,
    ) -> AppResult<Vec<DriveItem>> {
        let Some(drive_id) = self.default_drive_id(site_id, credentials).await? else {
            return Ok(Vec::new());
        };

        let search = search_segment(query);
        let url = self.endpoint(["drives", drive_id.as_str(), "root", search.as_str()])?;
        let items: Vec<GraphDriveItem> = self.get_all(url, credentials, "Search").await?;

        Ok(items
            .into_iter()
            .map(|item| {
                let parent = item.reference_path();
                item.into_drive_item(parent)
            })
            .collect())
    }

    async fn get_document_content(
        &self,
        site_id: &str,
        item_id: &str,
        credentials: &CredentialContext,
    ) -> AppResult<Bytes> {
        let drive_id = self.require_drive_id(site_id, credentials).await?;
        let url = self.endpoint(["drives", drive_id.as_str(), "items", item_id, "content"])?;
        self.send(url, credentials, "Download content")
            .await?
            .bytes()
            .await
            .map_err(|e| map_reqwest_error(e, "Download content"))
    }
}

fn document_from_json(raw: serde_json::Value) -> AppResult<Document> {
    let item: GraphDriveItem = serde_json::from_value(raw.clone())?;

    let metadata = match raw {
        serde_json::Value::Object(map) => map
            .into_iter()
            .filter(|(key, _)| !DOCUMENT_FIELDS.contains(&key.as_str()))
            .collect(),
        _ => serde_json::Map::new(),
    };

    let parent_path = item.reference_path();
    let content_type = item
        .file
        .as_ref()
        .and_then(|f| f.mime_type.clone())
        .unwrap_or_default();

    Ok(Document {
        id: item.id.unwrap_or_default(),
        name: item.name.unwrap_or_default(),
        web_url: item.web_url.unwrap_or_default(),
        parent_path,
        size: item.size.unwrap_or(0),
        content_type,
        created_at: item.created_date_time.unwrap_or_else(epoch),
        last_modified_at: item.last_modified_date_time.unwrap_or_else(epoch),
        created_by: GraphIdentitySet::display_name(item.created_by.as_ref()),
        last_modified_by: GraphIdentitySet::display_name(item.last_modified_by.as_ref()),
        metadata,
    })
}
