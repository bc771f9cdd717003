//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Most images attached to one OCR request.
pub const MAX_OCR_FILES: usize = 10;
const MAX_OCR_FILES_U64: u64 = MAX_OCR_FILES as u64;

/// Query for `GET .../items`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemsQuery {
    /// Folder path within the drive; empty or absent for the root.
    #[serde(default)]
    pub path: String,
}

/// Query for `GET .../search`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Search text.
    #[serde(default)]
    pub q: String,
}

/// OCR extraction request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExtractTextRequest {
    /// Instruction sent with the images; a default is used when absent.
    pub user_message: Option<String>,
    /// Local image paths to attach.
    #[validate(length(max = MAX_OCR_FILES_U64, message = "Too many files attached"))]
    pub file_paths: Option<Vec<String>>,
}
