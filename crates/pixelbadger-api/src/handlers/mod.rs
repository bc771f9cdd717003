//! Route handlers organized by domain.

pub mod health;
pub mod ocr;
pub mod sharepoint;
