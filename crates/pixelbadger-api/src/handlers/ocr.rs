//! OCR extraction handler.

use axum::Json;
use axum::extract::State;
use validator::Validate;

use pixelbadger_core::error::AppError;

use crate::dto::request::ExtractTextRequest;
use crate::dto::response::ExtractTextResponse;
use crate::error::ApiError;
use crate::extractors::BearerCredentials;
use crate::state::AppState;

/// POST /ocrrrr/extract
pub async fn extract_text(
    State(state): State<AppState>,
    _creds: BearerCredentials,
    Json(req): Json<ExtractTextRequest>,
) -> Result<Json<ExtractTextResponse>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let file_paths = req.file_paths.unwrap_or_default();
    let extracted_text = state
        .ocr
        .extract_text(req.user_message.as_deref(), &file_paths)
        .await?;

    Ok(Json(ExtractTextResponse { extracted_text }))
}
