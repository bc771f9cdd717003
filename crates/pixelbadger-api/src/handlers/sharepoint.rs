//! SharePoint site, tree, metadata and search handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use tokio_util::sync::CancellationToken;

use pixelbadger_core::types::{Document, Site};

use crate::dto::request::{ItemsQuery, SearchQuery};
use crate::dto::response::DriveItemResponse;
use crate::error::ApiError;
use crate::extractors::BearerCredentials;
use crate::state::AppState;

/// GET /mcp/sharepoint/sites/{site_id}
pub async fn get_site(
    State(state): State<AppState>,
    creds: BearerCredentials,
    Path(site_id): Path<String>,
) -> Result<Json<Site>, ApiError> {
    let site = state.sharepoint.get_site_info(&site_id, &creds).await?;
    Ok(Json(site))
}

/// GET /mcp/sharepoint/sites/{site_id}/items?path=
///
/// Returns the rendered tree as `text/plain`.
pub async fn list_items(
    State(state): State<AppState>,
    creds: BearerCredentials,
    Path(site_id): Path<String>,
    Query(query): Query<ItemsQuery>,
) -> Result<String, ApiError> {
    // Dropping the handler future (disconnect or timeout) cancels the walk.
    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();

    let tree = state
        .sharepoint
        .list_drive_items(&site_id, &query.path, &creds, &cancel)
        .await?;
    Ok(tree)
}

/// GET /mcp/sharepoint/sites/{site_id}/items/{item_id}/metadata
pub async fn get_item_metadata(
    State(state): State<AppState>,
    creds: BearerCredentials,
    Path((site_id, item_id)): Path<(String, String)>,
) -> Result<Json<Document>, ApiError> {
    let document = state
        .sharepoint
        .get_document_metadata(&site_id, &item_id, &creds)
        .await?;
    Ok(Json(document))
}

/// GET /mcp/sharepoint/sites/{site_id}/search?q=
pub async fn search(
    State(state): State<AppState>,
    creds: BearerCredentials,
    Path(site_id): Path<String>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<DriveItemResponse>>, ApiError> {
    let items = state
        .sharepoint
        .search_documents(&site_id, &query.q, &creds)
        .await?;
    Ok(Json(items.into_iter().map(DriveItemResponse::from).collect()))
}
