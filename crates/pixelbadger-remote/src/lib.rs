//! # pixelbadger-remote
//!
//! Clients for the remote services Pixelbadger proxies: SharePoint drives
//! through Microsoft Graph (plus an in-memory drive for development and
//! tests) and OpenAI-compatible chat completions.

pub mod completion;
pub mod http;
pub mod providers;
pub mod token;

#[cfg(test)]
mod stub_server;

pub use completion::OpenAiCompletionClient;
pub use providers::{GraphDriveProvider, MemoryDriveProvider};
pub use token::TokenProvider;
