//! Floating chatbot widget.
//!
//! The widget posts user messages to a remote chat endpoint and renders the
//! structured replies, including supplementary data blocks and clickable
//! suggestion chips.
//!
//! # Structure
//!
//! - [`message`]: chat log entries and the fixed greeting/fallback messages
//! - [`format`]: the inline markdown-subset formatter
//! - [`render`]: structured message views and their renderers
//! - [`client`]: the [`ChatTransport`] seam and its HTTP implementation
//! - [`widget`]: the widget state machine and its [`ChatView`] seam
//! - [`html`], [`console`]: views for the page and for the terminal

pub mod client;
pub mod console;
pub mod format;
pub mod html;
pub mod message;
pub mod render;
pub mod widget;

pub use client::{BotReply, ChatError, ChatRequest, ChatTransport, FailureKind, HttpChatTransport};
pub use console::ConsoleChatView;
pub use html::HtmlChatView;
pub use message::{ChatMessage, Sender};
pub use render::MessageView;
pub use widget::{ChatView, ChatWidget, ClickTarget, PendingSend};
