//! Chat log entries.

use serde::{Deserialize, Serialize};

/// Apology shown when a reply could not be obtained.
pub const FALLBACK_TEXT: &str = "Sorry, I encountered an error. Please try again.";

/// Generic suggestions attached to the fallback message.
pub const FALLBACK_SUGGESTIONS: [&str; 2] = ["Tell me about projects", "What are your skills?"];

/// Greeting appended when the widget mounts.
pub const DEFAULT_WELCOME_TEXT: &str = "Hello! I'm the portfolio assistant. I can help you learn about projects, skills, and experience. What would you like to know?";

/// Starter suggestions attached to the greeting.
pub const DEFAULT_WELCOME_SUGGESTIONS: [&str; 4] = [
    "Tell me about projects",
    "What skills do you have?",
    "Show me your timeline",
    "How can I contact you?",
];

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Bot => "bot",
        }
    }
}

/// One entry in the chat log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(rename = "type")]
    pub sender: Sender,
    pub text: String,
    /// Supplementary blocks rendered beneath the text.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<String>,
    /// Labels rendered as suggestion chips.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Sender::Bot, text)
    }

    fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
            data: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_data<I, S>(mut self, data: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.data = data.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_suggestions<I, S>(mut self, suggestions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suggestions = suggestions.into_iter().map(Into::into).collect();
        self
    }

    /// The bot message shown when a send fails for any reason.
    pub fn fallback() -> Self {
        Self::bot(FALLBACK_TEXT).with_suggestions(FALLBACK_SUGGESTIONS)
    }

    /// The default greeting.
    pub fn welcome() -> Self {
        Self::bot(DEFAULT_WELCOME_TEXT).with_suggestions(DEFAULT_WELCOME_SUGGESTIONS)
    }

    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }

    pub fn is_bot(&self) -> bool {
        self.sender == Sender::Bot
    }
}
