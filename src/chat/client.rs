//! Transport to the remote chat endpoint.
//!
//! The endpoint accepts `POST {"message": "..."}` and answers with
//! `{"response": {"text": "...", "data": [...], "suggestions": [...]}}`.
//! Anything else is a failure.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::chat::message::ChatMessage;

/// Request body sent to the chat endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatRequest {
    pub message: String,
}

/// The assistant's structured reply.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BotReply {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
}

impl BotReply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            data: None,
            suggestions: None,
        }
    }
}

impl From<BotReply> for ChatMessage {
    fn from(reply: BotReply) -> Self {
        ChatMessage::bot(reply.text)
            .with_data(reply.data.unwrap_or_default())
            .with_suggestions(reply.suggestions.unwrap_or_default())
    }
}

/// Success body of the chat endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatEnvelope {
    pub response: BotReply,
}

/// Whether a failed send reached the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The server answered with a non-success status.
    Application,
    /// No usable answer: network failure or an unreadable body.
    Transport,
}

/// Chat transport error.
#[derive(Error, Debug)]
pub enum ChatError {
    /// The endpoint returned a non-success status.
    #[error("chat endpoint returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, for logs.
        body: String,
    },

    /// The request could not be completed.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The reply body was not a chat envelope.
    #[error("invalid chat reply: {0}")]
    Decode(#[from] serde_json::Error),

    /// The configured endpoint is not a valid URL.
    #[error("invalid chat endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    /// No chat endpoint is configured.
    #[error("no chat endpoint configured")]
    NotConfigured,
}

impl ChatError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Status { .. } => FailureKind::Application,
            Self::Transport(_)
            | Self::Decode(_)
            | Self::InvalidEndpoint(_)
            | Self::NotConfigured => FailureKind::Transport,
        }
    }
}

/// Sends one chat message and waits for the reply.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, request: &ChatRequest) -> Result<BotReply, ChatError>;
}

/// [`ChatTransport`] over HTTP.
///
/// No timeout is applied; a request that never completes is awaited forever.
#[derive(Debug, Clone)]
pub struct HttpChatTransport {
    endpoint: Url,
    http: reqwest::Client,
}

impl HttpChatTransport {
    /// Create a transport posting to `endpoint` (e.g. `http://localhost:3000/api/chat`).
    pub fn new(endpoint: impl AsRef<str>) -> Result<Self, ChatError> {
        Self::with_client(endpoint, reqwest::Client::new())
    }

    /// Create a transport with a custom reqwest client.
    pub fn with_client(endpoint: impl AsRef<str>, http: reqwest::Client) -> Result<Self, ChatError> {
        let endpoint = Url::parse(endpoint.as_ref())?;
        Ok(Self { endpoint, http })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ChatTransport for HttpChatTransport {
    async fn send(&self, request: &ChatRequest) -> Result<BotReply, ChatError> {
        debug!(
            name: "chat.request.sent",
            endpoint = %self.endpoint,
            chars = request.message.chars().count(),
            "Sending chat message"
        );

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(ChatError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        let envelope: ChatEnvelope = serde_json::from_slice(&body)?;
        debug!(name: "chat.reply.received", status = status.as_u16(), "Chat reply received");
        Ok(envelope.response)
    }
}
