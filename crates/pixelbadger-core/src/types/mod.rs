//! Core type definitions used across the Pixelbadger workspace.

pub mod chat;
pub mod credentials;
pub mod drive;
pub mod site;

pub use chat::{ChatContent, ChatMessage, ChatRole};
pub use credentials::CredentialContext;
pub use drive::{DriveItem, ItemKind};
pub use site::{Document, Site};
