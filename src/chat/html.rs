//! Server-rendered chat widget fragment.

use crate::chat::render::MessageView;
use crate::chat::widget::{ChatView, MAX_INPUT_CHARS};
use crate::markup::escape_html;

/// Route the page posts the chat form to.
pub const SEND_PATH: &str = "/chat/send";

const TYPING_INDICATOR: &str = concat!(
    r#"<div class="message bot" id="typing-indicator"><div class="message-content">"#,
    r#"<div class="typing-indicator"><span>Assistant is typing</span>"#,
    r#"<div class="typing-dots"><div class="typing-dot"></div><div class="typing-dot"></div><div class="typing-dot"></div></div>"#,
    "</div></div></div>"
);

/// Records the widget's state and renders it as the chatbot container.
#[derive(Debug, Clone)]
pub struct HtmlChatView {
    title: String,
    placeholder: String,
    open: bool,
    focused: bool,
    input: String,
    messages: Vec<String>,
    typing: bool,
    scrolled_to: usize,
}

impl HtmlChatView {
    pub fn new(title: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            placeholder: placeholder.into(),
            open: false,
            focused: false,
            input: String::new(),
            messages: Vec::new(),
            typing: false,
            scrolled_to: 0,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_typing(&self) -> bool {
        self.typing
    }

    /// Rendered messages, oldest first.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Whether the list is scrolled to its last entry, placeholder included.
    pub fn is_scrolled_to_latest(&self) -> bool {
        self.scrolled_to == self.entry_count()
    }

    fn entry_count(&self) -> usize {
        self.messages.len() + usize::from(self.typing)
    }

    /// Render the whole widget.
    pub fn render(&self) -> String {
        let active = if self.open { " active" } else { "" };
        let mut list = self.messages.concat();
        if self.typing {
            list.push_str(TYPING_INDICATOR);
        }

        format!(
            concat!(
                r#"<div class="chatbot-container">"#,
                r#"<button class="chatbot-toggle" id="chatbot-toggle" type="button" aria-label="Toggle chat">💬</button>"#,
                r#"<div class="chatbot-window{active}" id="chatbot-window">"#,
                r#"<div class="chatbot-header"><span>{title}</span></div>"#,
                r#"<div class="chatbot-messages" id="chatbot-messages">{list}</div>"#,
                r#"<form class="chatbot-input" id="chatbot-form" action="{send}" method="post">"#,
                r#"<input type="text" id="chatbot-input" name="message" placeholder="{placeholder}" maxlength="{max}" value="{input}" autocomplete="off"{autofocus}>"#,
                r#"<button id="chatbot-send" type="submit">Send</button>"#,
                "</form></div></div>"
            ),
            send = SEND_PATH,
            active = active,
            title = escape_html(&self.title),
            list = list,
            placeholder = escape_html(&self.placeholder),
            max = MAX_INPUT_CHARS,
            input = escape_html(&self.input),
            autofocus = if self.focused { " autofocus" } else { "" },
        )
    }
}

impl ChatView for HtmlChatView {
    fn set_open(&mut self, open: bool) {
        self.open = open;
        if !open {
            self.focused = false;
        }
    }

    fn focus_input(&mut self) {
        self.focused = true;
    }

    fn set_input(&mut self, text: &str) {
        self.input = text.to_string();
    }

    fn append_message(&mut self, message: &MessageView) {
        self.messages.push(message.to_html());
    }

    fn show_typing(&mut self) {
        self.typing = true;
    }

    fn hide_typing(&mut self) {
        self.typing = false;
        self.scrolled_to = self.scrolled_to.min(self.entry_count());
    }

    fn scroll_to_latest(&mut self) {
        self.scrolled_to = self.entry_count();
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::chat::client::{BotReply, ChatError, ChatRequest, ChatTransport};
    use crate::chat::message::ChatMessage;
    use crate::chat::widget::{ChatWidget, ClickTarget};

    struct Echo;

    #[async_trait]
    impl ChatTransport for Echo {
        async fn send(&self, request: &ChatRequest) -> Result<BotReply, ChatError> {
            Ok(BotReply {
                text: format!("You said **{}**", request.message),
                data: Some(vec!["extra".into()]),
                suggestions: Some(vec!["A".into(), "B".into()]),
            })
        }
    }

    fn mounted() -> ChatWidget<Echo, HtmlChatView> {
        ChatWidget::mount(
            Echo,
            HtmlChatView::new("Portfolio Assistant", "Ask me..."),
            ChatMessage::welcome(),
        )
    }

    #[test]
    fn test_initial_render() {
        let w = mounted();
        let html = w.view().render();

        assert!(html.contains(r#"id="chatbot-toggle""#));
        assert!(html.contains(r#"class="chatbot-window" id="chatbot-window""#));
        assert!(html.contains(r#"maxlength="500""#));
        assert!(html.contains(r#"<form class="chatbot-input" id="chatbot-form" action="/chat/send" method="post">"#));
        assert!(html.contains(r#"name="message""#));
        assert_eq!(w.view().messages().len(), 1);
        assert!(w.view().is_scrolled_to_latest());
        assert!(!html.contains("typing-indicator"));
    }

    #[test]
    fn test_open_marks_active_and_focuses() {
        let mut w = mounted();
        w.handle_click(ClickTarget::Toggle);
        assert!(w.view().is_open());
        assert!(w.view().is_focused());
        assert!(w.view().render().contains("chatbot-window active"));

        w.handle_click(ClickTarget::Outside);
        assert!(!w.view().render().contains("chatbot-window active"));
    }

    #[test]
    fn test_typing_indicator_visible_while_pending() {
        let mut w = mounted();
        w.set_input("hi");
        w.begin_send().unwrap();

        assert!(w.view().is_typing());
        assert!(w.view().is_scrolled_to_latest());
        assert!(w.view().render().contains(r#"id="typing-indicator""#));
        assert!(w.view().render().contains(r#"value="""#));

        w.complete_send(Ok(BotReply::text("ok")));
        assert!(!w.view().render().contains("typing-indicator"));
    }

    #[tokio::test]
    async fn test_reply_rendered_with_chips() {
        let mut w = mounted();
        w.set_input("<hello>");
        w.send_message().await;

        let view = w.view();
        assert_eq!(view.messages().len(), 3);
        assert!(view.messages()[1].contains("&lt;hello&gt;"));
        assert!(view.messages()[2].contains("<strong>&lt;hello&gt;</strong>"));
        assert_eq!(view.messages()[2].matches("suggestion-chip").count(), 2);
        assert!(view.is_scrolled_to_latest());
        assert!(!view.is_typing());
    }
}
