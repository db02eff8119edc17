//! Structured message views and their renderers.

use crate::chat::format::{Inline, format_text, to_plain};
use crate::chat::message::{ChatMessage, Sender};
use crate::markup::{escape_html, is_safe_href};

/// A chat message prepared for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageView {
    pub sender: Sender,
    pub body: Vec<Inline>,
    /// One formatted block per supplementary data entry.
    pub data: Vec<Vec<Inline>>,
    pub suggestions: Vec<String>,
}

impl From<&ChatMessage> for MessageView {
    fn from(message: &ChatMessage) -> Self {
        Self {
            sender: message.sender,
            body: format_text(&message.text),
            data: message.data.iter().map(|item| format_text(item)).collect(),
            suggestions: message.suggestions.clone(),
        }
    }
}

impl MessageView {
    /// Render as a `.message` element. All text is escaped and unsafe link
    /// targets are rendered as plain labels.
    pub fn to_html(&self) -> String {
        let mut html = format!(r#"<div class="message {}">"#, self.sender.as_str());

        html.push_str(r#"<div class="message-content">"#);
        push_inlines_html(&self.body, &mut html);
        html.push_str("</div>");

        if !self.data.is_empty() {
            html.push_str(r#"<div class="message-data">"#);
            for block in &self.data {
                html.push_str(r#"<div class="message-data-item">"#);
                push_inlines_html(block, &mut html);
                html.push_str("</div>");
            }
            html.push_str("</div>");
        }

        if !self.suggestions.is_empty() {
            html.push_str(r#"<div class="suggestions">"#);
            for suggestion in &self.suggestions {
                let label = escape_html(suggestion);
                html.push_str(&format!(
                    r#"<button type="button" class="suggestion-chip" data-suggestion="{label}">{label}</button>"#
                ));
            }
            html.push_str("</div>");
        }

        html.push_str("</div>");
        html
    }

    /// Render as plain text: the body, then data blocks on their own lines.
    pub fn to_plain(&self) -> String {
        let mut text = to_plain(&self.body);
        for block in &self.data {
            text.push('\n');
            text.push_str(&to_plain(block));
        }
        text
    }
}

fn push_inlines_html(nodes: &[Inline], html: &mut String) {
    for node in nodes {
        match node {
            Inline::Text(text) => html.push_str(&escape_html(text)),
            Inline::Strong(children) => {
                html.push_str("<strong>");
                push_inlines_html(children, html);
                html.push_str("</strong>");
            }
            Inline::Emphasis(children) => {
                html.push_str("<em>");
                push_inlines_html(children, html);
                html.push_str("</em>");
            }
            Inline::Link { label, href } if is_safe_href(href) => {
                html.push_str(&format!(
                    r#"<a href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
                    escape_html(href),
                    escape_html(label)
                ));
            }
            Inline::Link { label, .. } => html.push_str(&escape_html(label)),
            Inline::LineBreak => html.push_str("<br>"),
        }
    }
}
