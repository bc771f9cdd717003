//! Site and document metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A SharePoint site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub id: String,
    pub name: String,
    pub display_name: String,
    pub web_url: String,
    pub description: String,
    #[serde(rename = "createdDateTime")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "lastModifiedDateTime")]
    pub last_modified_at: DateTime<Utc>,
}

/// Detailed metadata for a single document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub name: String,
    pub web_url: String,
    pub parent_path: String,
    pub size: u64,
    /// MIME type reported by the remote, empty for folders.
    pub content_type: String,
    #[serde(rename = "createdDateTime")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "lastModifiedDateTime")]
    pub last_modified_at: DateTime<Utc>,
    pub created_by: String,
    pub last_modified_by: String,
    /// Any additional properties the remote returned for the item.
    pub metadata: serde_json::Map<String, serde_json::Value>,
}
