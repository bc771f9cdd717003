//! Chat messages sent to the completion provider.

use bytes::Bytes;

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    System,
    User,
}

impl ChatRole {
    /// Wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
        }
    }
}

/// One part of a multimodal message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatContent {
    Text(String),
    Image { mime_type: String, data: Bytes },
}

/// A message with one or more content parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub parts: Vec<ChatContent>,
}

impl ChatMessage {
    /// A plain-text system message.
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            parts: vec![ChatContent::Text(text.into())],
        }
    }

    /// A plain-text user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            parts: vec![ChatContent::Text(text.into())],
        }
    }

    /// A user message built from explicit parts.
    pub fn user_parts(parts: Vec<ChatContent>) -> Self {
        Self {
            role: ChatRole::User,
            parts,
        }
    }

    /// Whether every part is text.
    pub fn is_text_only(&self) -> bool {
        self.parts.iter().all(|p| matches!(p, ChatContent::Text(_)))
    }
}
