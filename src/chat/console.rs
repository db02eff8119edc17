//! Chat widget rendered to a terminal.

use std::io::{self, Write};

use crate::chat::message::Sender;
use crate::chat::render::MessageView;
use crate::chat::widget::ChatView;

/// Writes the conversation to a writer as plain text.
///
/// Suggestions are listed as numbered chips (`[1] ...`). The typing
/// placeholder is a single line that is erased when the reply arrives.
#[derive(Debug)]
pub struct ConsoleChatView<W: Write> {
    out: W,
    title: String,
    error: Option<io::Error>,
}

impl<W: Write> ConsoleChatView<W> {
    pub fn new(out: W, title: impl Into<String>) -> Self {
        Self {
            out,
            title: title.into(),
            error: None,
        }
    }

    fn write(&mut self, text: &str) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|()| self.out.flush()) {
            self.error = Some(e);
        }
    }

    /// Return the writer, or the first write error.
    pub fn into_inner(self) -> io::Result<W> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.out),
        }
    }
}

impl<W: Write> ChatView for ConsoleChatView<W> {
    fn set_open(&mut self, open: bool) {
        if open {
            let header = format!("── {} ──\n", self.title);
            self.write(&header);
        }
    }

    fn focus_input(&mut self) {}

    fn set_input(&mut self, _text: &str) {}

    fn append_message(&mut self, message: &MessageView) {
        let prefix = match message.sender {
            Sender::User => "you",
            Sender::Bot => "bot",
        };
        let plain = message.to_plain();
        let mut lines = plain.lines();

        // The prefix line is written even for an empty body
        let mut text = format!("{prefix}>");
        if let Some(first) = lines.next().filter(|l| !l.is_empty()) {
            text.push(' ');
            text.push_str(first);
        }
        text.push('\n');
        for line in lines {
            text.push_str(&format!("     {line}\n"));
        }
        if !message.suggestions.is_empty() {
            let chips: Vec<String> = message
                .suggestions
                .iter()
                .enumerate()
                .map(|(i, s)| format!("[{}] {s}", i + 1))
                .collect();
            text.push_str(&format!("     {}\n", chips.join("  ")));
        }
        self.write(&text);
    }

    fn show_typing(&mut self) {
        self.write("Assistant is typing...");
    }

    fn hide_typing(&mut self) {
        self.write("\r\x1b[2K");
    }

    fn scroll_to_latest(&mut self) {}
}
