//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pixelbadger_core::types::{DriveItem, ItemKind};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `Healthy` while the process serves requests.
    pub status: String,
    /// Server time.
    pub timestamp: DateTime<Utc>,
}

/// OCR extraction response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractTextResponse {
    /// Text returned by the model.
    pub extracted_text: String,
}

/// A drive item as returned by search.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveItemResponse {
    pub id: String,
    pub name: String,
    pub web_url: String,
    pub parent_path: String,
    pub is_folder: bool,
    pub size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub child_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(rename = "createdDateTime")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "lastModifiedDateTime")]
    pub last_modified_at: DateTime<Utc>,
    pub created_by: String,
    pub last_modified_by: String,
}

impl From<DriveItem> for DriveItemResponse {
    fn from(item: DriveItem) -> Self {
        let is_folder = item.is_folder();
        let size = item.size();
        let (child_count, mime_type) = match item.kind {
            ItemKind::Folder { child_count } => (child_count, None),
            ItemKind::File { mime_type, .. } => (None, mime_type),
        };

        Self {
            id: item.id,
            name: item.name,
            web_url: item.web_url,
            parent_path: item.parent_path,
            is_folder,
            size,
            child_count,
            mime_type,
            created_at: item.created_at,
            last_modified_at: item.last_modified_at,
            created_by: item.created_by,
            last_modified_by: item.last_modified_by,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drive_item_json_shape() {
        let json = serde_json::to_value(DriveItemResponse::from(
            DriveItem::file("a.pdf", "Docs", 9).with_id("1"),
        ))
        .unwrap();

        assert_eq!(json["isFolder"], false);
        assert_eq!(json["size"], 9);
        assert_eq!(json["parentPath"], "Docs");
        assert!(json.get("childCount").is_none());
        assert!(json.get("lastModifiedDateTime").is_some());
    }

    #[test]
    fn test_extract_response_field_name() {
        let json = serde_json::to_value(ExtractTextResponse {
            extracted_text: "Ahoy".to_string(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"extractedText": "Ahoy"}));
    }
}
