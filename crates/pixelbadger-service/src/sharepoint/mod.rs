//! SharePoint document services and the directory-tree formatter.

pub mod format;
pub mod service;
pub mod tree;

pub use service::SharePointService;
pub use tree::TreeFormatter;
