//! # pixelbadger-service
//!
//! Business logic for Pixelbadger: the SharePoint directory-tree formatter,
//! the SharePoint document operations built around it, and image OCR via
//! a chat completion model.
//!
//! Services follow constructor injection: remote collaborators are passed
//! in at construction time as `Arc` trait objects.

pub mod ocr;
pub mod sharepoint;

pub use ocr::OcrService;
pub use sharepoint::{SharePointService, TreeFormatter};
