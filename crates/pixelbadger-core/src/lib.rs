//! # pixelbadger-core
//!
//! Core crate for Pixelbadger. Contains the collaborator traits for the
//! remote document store and the completion provider, configuration
//! schemas, drive/site/document domain types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Pixelbadger crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
