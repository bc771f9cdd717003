//! # pixelbadger-api
//!
//! HTTP API layer for Pixelbadger built on Axum.
//!
//! Provides the SharePoint and OCR endpoints, the health probe, request
//! middleware (logging, CORS, compression, timeout), the bearer-token
//! extractor, DTOs, and error mapping.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
