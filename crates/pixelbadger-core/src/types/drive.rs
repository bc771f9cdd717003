//! Drive items as returned by the remote document store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a drive item is, with the fields that only make sense for that kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemKind {
    /// A folder. The child count is whatever the remote reported alongside
    /// the listing, if anything.
    Folder {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        child_count: Option<u64>,
    },
    /// A file with its byte size.
    File {
        #[serde(default)]
        size: u64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mime_type: Option<String>,
    },
}

/// A single entry of a remote folder listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriveItem {
    /// Remote item identifier.
    #[serde(default)]
    pub id: String,
    /// Display name (never empty for real remote items).
    pub name: String,
    /// Browser URL of the item.
    #[serde(default)]
    pub web_url: String,
    /// Path of the folder this item was listed from; empty for the drive root.
    #[serde(default)]
    pub parent_path: String,
    /// Folder or file.
    pub kind: ItemKind,
    /// Creation time.
    #[serde(default = "epoch")]
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    #[serde(default = "epoch")]
    pub last_modified_at: DateTime<Utc>,
    /// Display name of the creator.
    #[serde(default)]
    pub created_by: String,
    /// Display name of the last modifier.
    #[serde(default)]
    pub last_modified_by: String,
}

impl DriveItem {
    /// Creates a folder item with empty metadata.
    pub fn folder(name: impl Into<String>, parent_path: impl Into<String>) -> Self {
        Self::with_kind(name, parent_path, ItemKind::Folder { child_count: None })
    }

    /// Creates a file item with empty metadata.
    pub fn file(name: impl Into<String>, parent_path: impl Into<String>, size: u64) -> Self {
        Self::with_kind(
            name,
            parent_path,
            ItemKind::File {
                size,
                mime_type: None,
            },
        )
    }

    fn with_kind(name: impl Into<String>, parent_path: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            web_url: String::new(),
            parent_path: parent_path.into(),
            kind,
            created_at: epoch(),
            last_modified_at: epoch(),
            created_by: String::new(),
            last_modified_by: String::new(),
        }
    }

    /// Sets the remote identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the last modification time.
    pub fn modified_at(mut self, at: DateTime<Utc>) -> Self {
        self.last_modified_at = at;
        self
    }

    /// Returns whether this item is a folder.
    pub fn is_folder(&self) -> bool {
        matches!(self.kind, ItemKind::Folder { .. })
    }

    /// Returns whether this item is a file.
    pub fn is_file(&self) -> bool {
        !self.is_folder()
    }

    /// Byte size; folders report 0.
    pub fn size(&self) -> u64 {
        match self.kind {
            ItemKind::File { size, .. } => size,
            ItemKind::Folder { .. } => 0,
        }
    }

    /// Path of this item within the drive, suitable for listing its children.
    pub fn child_path(&self) -> String {
        if self.parent_path.is_empty() {
            self.name.clone()
        } else {
            format!("{}/{}", self.parent_path, self.name)
        }
    }
}

/// Timestamp used when the remote omits one.
pub fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_path_at_root_is_bare_name() {
        let item = DriveItem::folder("Reports", "");
        assert_eq!(item.child_path(), "Reports");
    }

    #[test]
    fn test_child_path_joins_parent() {
        let item = DriveItem::folder("2024", "Shared Documents/Reports");
        assert_eq!(item.child_path(), "Shared Documents/Reports/2024");
    }

    #[test]
    fn test_folder_size_is_zero() {
        assert_eq!(DriveItem::folder("a", "").size(), 0);
        assert_eq!(DriveItem::file("a.txt", "", 42).size(), 42);
        assert!(DriveItem::file("a.txt", "", 42).is_file());
    }

    #[test]
    fn test_kind_is_tagged_in_json() {
        let item = DriveItem::file("a.txt", "", 7);
        let json = serde_json::to_value(&item).expect("serialize");
        assert_eq!(json["kind"]["type"], "file");
        assert_eq!(json["kind"]["size"], 7);
    }
}
