//! OpenAI-compatible chat completion client.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use pixelbadger_core::config::OpenAiConfig;
use pixelbadger_core::error::AppError;
use pixelbadger_core::result::AppResult;
use pixelbadger_core::traits::CompletionClient;
use pixelbadger_core::types::{ChatContent, ChatMessage};

use crate::http::{check_status, map_reqwest_error};

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage>,
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: &'static str,
    content: WireContent,
}

/// Text-only messages go out as a plain string, multimodal ones as parts.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum WireContent {
    Text(String),
    Parts(Vec<WirePart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WirePart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl From<ChatMessage> for WireMessage {
    fn from(message: ChatMessage) -> Self {
        let role = message.role.as_str();
        let content = if message.is_text_only() {
            let text = message
                .parts
                .into_iter()
                .filter_map(|part| match part {
                    ChatContent::Text(text) => Some(text),
                    ChatContent::Image { .. } => None,
                })
                .collect::<Vec<_>>()
                .join("\n");
            WireContent::Text(text)
        } else {
            WireContent::Parts(message.parts.into_iter().map(WirePart::from).collect())
        };
        Self { role, content }
    }
}

impl From<ChatContent> for WirePart {
    fn from(part: ChatContent) -> Self {
        match part {
            ChatContent::Text(text) => Self::Text { text },
            ChatContent::Image { mime_type, data } => Self::ImageUrl {
                image_url: ImageUrl {
                    url: format!("data:{mime_type};base64,{}", STANDARD.encode(&data)),
                },
            },
        }
    }
}

/// Chat completion client for the OpenAI API (or any compatible endpoint).
#[derive(Debug, Clone)]
pub struct OpenAiCompletionClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl OpenAiCompletionClient {
    /// Create a client from configuration.
    pub fn new(config: &OpenAiConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl CompletionClient for OpenAiCompletionClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, messages: Vec<ChatMessage>) -> AppResult<String> {
        let request = CompletionRequest {
            model: &self.model,
            messages: messages.into_iter().map(WireMessage::from).collect(),
        };

        debug!(model = %self.model, messages = request.messages.len(), "Sending chat completion");

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| map_reqwest_error(e, "Chat completion"))?;
        let response = check_status(response, "Chat completion").await?;

        let body: CompletionResponse = response
            .json()
            .await
            .map_err(|e| map_reqwest_error(e, "Chat completion decode"))?;

        let choice = body.choices.into_iter().next().ok_or_else(|| {
            AppError::external_service("Chat completion returned no choices")
        })?;

        let text = choice.message.content.unwrap_or_default();
        info!(model = %self.model, chars = text.len(), "Chat completion finished");
        Ok(text)
    }
}
