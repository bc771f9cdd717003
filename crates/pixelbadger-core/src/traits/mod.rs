//! Core traits defined in `pixelbadger-core` and implemented by other crates.

pub mod completion;
pub mod drive;

pub use completion::CompletionClient;
pub use drive::{DriveListing, DriveProvider};
