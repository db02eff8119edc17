//! The floating chat widget.
//!
//! The widget owns the conversation log and two small state machines:
//!
//! - panel visibility, `Closed ⇄ Open`, driven by the toggle and by clicks
//!   outside the widget;
//! - sending, `Idle → AwaitingReply → Idle`, gated by the typing flag so at
//!   most one request is ever outstanding.
//!
//! Everything visible goes through a [`ChatView`], the fragment the widget
//! owns. The widget never looks anything up on its own.

use tracing::{debug, warn};

use crate::chat::client::{BotReply, ChatError, ChatRequest, ChatTransport};
use crate::chat::message::ChatMessage;
use crate::chat::render::MessageView;

/// Longest input the widget accepts, in characters.
pub const MAX_INPUT_CHARS: usize = 500;

/// The fragment a [`ChatWidget`] renders into.
pub trait ChatView {
    /// Show or hide the message panel.
    fn set_open(&mut self, open: bool);
    /// Move focus to the input field.
    fn focus_input(&mut self);
    /// Replace the input field's contents.
    fn set_input(&mut self, text: &str);
    /// Append a rendered message to the list.
    fn append_message(&mut self, message: &MessageView);
    /// Show the typing placeholder at the end of the list.
    fn show_typing(&mut self);
    /// Remove the typing placeholder.
    fn hide_typing(&mut self);
    /// Scroll the message list to its latest entry.
    fn scroll_to_latest(&mut self);
}

/// Where a click landed, relative to the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The floating toggle button.
    Toggle,
    /// Anywhere else inside the widget.
    Inside,
    /// Anywhere on the page outside the widget.
    Outside,
}

/// A send that has been accepted and is awaiting its reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSend {
    request: ChatRequest,
}

impl PendingSend {
    pub fn request(&self) -> &ChatRequest {
        &self.request
    }
}

/// Chat widget bound to a transport and a view.
#[derive(Debug)]
pub struct ChatWidget<T, V> {
    transport: T,
    view: V,
    log: Vec<ChatMessage>,
    input: String,
    is_open: bool,
    is_typing: bool,
}

impl<T, V: ChatView> ChatWidget<T, V> {
    /// Mount the widget closed, with `welcome` as the first message.
    pub fn mount(transport: T, mut view: V, welcome: ChatMessage) -> Self {
        view.set_open(false);
        let mut widget = Self {
            transport,
            view,
            log: Vec::new(),
            input: String::new(),
            is_open: false,
            is_typing: false,
        };
        widget.append(welcome);
        widget
    }

    /// Bind to an open panel whose earlier messages are already shown.
    ///
    /// The log starts empty; the view receives only new messages.
    pub fn attach(transport: T, view: V) -> Self {
        Self {
            transport,
            view,
            log: Vec::new(),
            input: String::new(),
            is_open: true,
            is_typing: false,
        }
    }

    pub fn log(&self) -> &[ChatMessage] {
        &self.log
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_typing(&self) -> bool {
        self.is_typing
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    /// Suggestions on the most recent bot message.
    pub fn latest_suggestions(&self) -> &[String] {
        self.log
            .iter()
            .rev()
            .find(|m| m.is_bot())
            .map(|m| m.suggestions.as_slice())
            .unwrap_or_default()
    }

    /// Open a closed panel, close an open one. Opening focuses the input.
    pub fn toggle(&mut self) {
        self.is_open = !self.is_open;
        self.view.set_open(self.is_open);
        if self.is_open {
            self.view.focus_input();
        }
        debug!(name: "chat.toggled", open = self.is_open, "Chat panel toggled");
    }

    /// Route a page click. Clicks outside close an open panel.
    pub fn handle_click(&mut self, target: ClickTarget) {
        match target {
            ClickTarget::Toggle => self.toggle(),
            ClickTarget::Outside if self.is_open => self.toggle(),
            ClickTarget::Inside | ClickTarget::Outside => {}
        }
    }

    /// Replace the input, truncated to [`MAX_INPUT_CHARS`].
    pub fn set_input(&mut self, text: &str) {
        self.input = text.chars().take(MAX_INPUT_CHARS).collect();
        self.view.set_input(&self.input);
    }

    /// Accept the current input for sending.
    ///
    /// Returns `None`, changing nothing, when the trimmed input is empty or a
    /// send is already outstanding. Otherwise logs the user message, clears
    /// the input, shows the typing placeholder and returns the request.
    pub fn begin_send(&mut self) -> Option<PendingSend> {
        let message = self.input.trim().to_string();
        if message.is_empty() {
            return None;
        }
        if self.is_typing {
            debug!(name: "chat.send.rejected", "Send rejected while awaiting reply");
            return None;
        }

        self.append(ChatMessage::user(message.as_str()));
        self.input.clear();
        self.view.set_input("");

        self.is_typing = true;
        self.view.show_typing();
        self.view.scroll_to_latest();

        Some(PendingSend {
            request: ChatRequest { message },
        })
    }

    /// Finish the outstanding send with its outcome.
    ///
    /// The placeholder is removed before the reply, or the fallback on any
    /// failure, is appended. Returns `false` if no send was outstanding.
    pub fn complete_send(&mut self, outcome: Result<BotReply, ChatError>) -> bool {
        if !self.is_typing {
            return false;
        }
        self.is_typing = false;
        self.view.hide_typing();

        let reply = match outcome {
            Ok(reply) => ChatMessage::from(reply),
            Err(e) => {
                warn!(
                    name: "chat.send.failed",
                    kind = ?e.kind(),
                    error = %e,
                    "Chat send failed"
                );
                ChatMessage::fallback()
            }
        };
        self.append(reply);
        true
    }

    fn append(&mut self, message: ChatMessage) {
        let view = MessageView::from(&message);
        self.view.append_message(&view);
        self.view.scroll_to_latest();
        self.log.push(message);
    }
}

impl<T: ChatTransport, V: ChatView> ChatWidget<T, V> {
    /// Send the current input and wait for the reply.
    ///
    /// Returns whether a request was issued.
    pub async fn send_message(&mut self) -> bool {
        let Some(pending) = self.begin_send() else {
            return false;
        };
        let outcome = self.transport.send(pending.request()).await;
        self.complete_send(outcome);
        true
    }

    /// A suggestion chip was activated: fill the input with its label and send.
    pub async fn send_suggestion(&mut self, label: &str) -> bool {
        self.set_input(label);
        self.send_message().await
    }
}
