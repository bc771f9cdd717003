//! Image text extraction through a chat completion model.

use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, info, warn};

use pixelbadger_core::error::{AppError, ErrorKind};
use pixelbadger_core::result::AppResult;
use pixelbadger_core::traits::CompletionClient;
use pixelbadger_core::types::{ChatContent, ChatMessage};

/// Instructions given to the model for every extraction.
pub const SYSTEM_PROMPT: &str = "Ye be a salty sea dog, a buccaneering soul with a privateers knowledge of english. The user will slop on an image, and ye are te extract the text- OCR style savvy? Then ye be te translating that text into ye own salty sociolect, then return that to the user without commentary or embellishment.";

/// User message sent when the caller supplies none.
pub const DEFAULT_USER_MESSAGE: &str = "Extract and translate the text from this image";

/// Extracts text from images and returns it translated by the model.
#[derive(Debug, Clone)]
pub struct OcrService {
    /// Chat completion backend.
    client: Arc<dyn CompletionClient>,
}

impl OcrService {
    /// Creates a new OCR service.
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    /// Runs one extraction over the given image files.
    ///
    /// Paths that do not exist are skipped.
    pub async fn extract_text(
        &self,
        user_message: Option<&str>,
        file_paths: &[String],
    ) -> AppResult<String> {
        let messages = build_messages(user_message, file_paths).await?;
        let text = self.client.complete(messages).await?;
        info!(
            model = self.client.model(),
            files = file_paths.len(),
            "OCR extraction completed"
        );
        Ok(text)
    }
}

/// `[system prompt, user message]`; the user message carries one image part
/// per readable file when file paths are given.
pub async fn build_messages(
    user_message: Option<&str>,
    file_paths: &[String],
) -> AppResult<Vec<ChatMessage>> {
    let text = user_message.unwrap_or(DEFAULT_USER_MESSAGE).to_string();

    let user = if file_paths.is_empty() {
        ChatMessage::user(text)
    } else {
        let mut parts = vec![ChatContent::Text(text)];
        for path in file_paths {
            if let Some(image) = read_image(path).await? {
                parts.push(image);
            }
        }
        ChatMessage::user_parts(parts)
    };

    Ok(vec![ChatMessage::system(SYSTEM_PROMPT), user])
}

async fn read_image(path: &str) -> AppResult<Option<ChatContent>> {
    match tokio::fs::read(path).await {
        Ok(data) => {
            debug!(path, bytes = data.len(), "Attached image");
            Ok(Some(ChatContent::Image {
                mime_type: mime_type_for(path).to_string(),
                data: Bytes::from(data),
            }))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(path, "Image file not found, skipping");
            Ok(None)
        }
        Err(e) => Err(AppError::with_source(
            ErrorKind::Internal,
            format!("Failed to read image: {path}"),
            e,
        )),
    }
}

/// MIME type from the file extension.
pub fn mime_type_for(path: &str) -> &'static str {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}
