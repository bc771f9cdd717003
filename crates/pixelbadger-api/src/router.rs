//! Route definitions for the Pixelbadger HTTP API.
//!
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use std::time::Duration;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::middleware::cors::build_cors_layer;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);
    let cors = build_cors_layer(&state.config.server.cors);

    Router::new()
        .merge(health_routes())
        .merge(sharepoint_routes())
        .merge(ocr_routes())
        .layer(TimeoutLayer::new(timeout))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Liveness probe (no auth)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// SharePoint proxy endpoints
fn sharepoint_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/mcp/sharepoint/sites/{site_id}",
            get(handlers::sharepoint::get_site),
        )
        .route(
            "/mcp/sharepoint/sites/{site_id}/items",
            get(handlers::sharepoint::list_items),
        )
        .route(
            "/mcp/sharepoint/sites/{site_id}/items/{item_id}/metadata",
            get(handlers::sharepoint::get_item_metadata),
        )
        .route(
            "/mcp/sharepoint/sites/{site_id}/search",
            get(handlers::sharepoint::search),
        )
}

/// Image OCR
fn ocr_routes() -> Router<AppState> {
    Router::new().route("/ocrrrr/extract", post(handlers::ocr::extract_text))
}
