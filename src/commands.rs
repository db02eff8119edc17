//! Terminal front ends for the widgets.
//!
//! `terminal` plays the typewriter on a writer in real time. `chat` runs the
//! chat widget over line-based input: each line is sent as a message, a bare
//! number activates that suggestion chip from the latest reply, and `/quit`
//! ends the session.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::info;

use crate::chat::{ChatMessage, ChatTransport, ChatWidget, ConsoleChatView, HttpChatTransport};
use crate::config::AppConfig;
use crate::content::Portfolio;
use crate::terminal::{ConsoleTerminal, animate, build_lines};

/// Play the terminal animation into `out`.
pub async fn play_terminal<W: Write>(config: &AppConfig, out: W) -> anyhow::Result<W> {
    let portfolio = Portfolio::load(&config.content.data_file).await?;
    let lines = build_lines(
        &config.terminal.prompt,
        portfolio.skills(),
        &config.terminal.entries,
    );

    let mut terminal = ConsoleTerminal::new(out);
    animate(Some(&mut terminal), lines, config.terminal.timing()).await;
    Ok(terminal.into_inner()?)
}

/// Transport for the `chat` command. Fails when no endpoint is configured.
pub fn chat_transport(config: &AppConfig) -> anyhow::Result<HttpChatTransport> {
    match config.chat.transport()? {
        Some(transport) => Ok(transport),
        None => anyhow::bail!(
            "no chat endpoint configured (set --chat-endpoint, CHAT_ENDPOINT or chat.endpoint)"
        ),
    }
}

/// Run an interactive chat session until `/quit` or end of input.
pub async fn run_chat<T, R, W>(
    config: &AppConfig,
    transport: T,
    input: R,
    out: W,
) -> anyhow::Result<W>
where
    T: ChatTransport,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let welcome = ChatMessage::bot(config.chat.welcome_text.as_str())
        .with_suggestions(config.chat.welcome_suggestions.iter().cloned());
    let view = ConsoleChatView::new(out, &config.chat.title);
    let mut widget = ChatWidget::mount(transport, view, welcome);
    widget.toggle();

    info!(name: "chat.session.started", endpoint = ?config.chat.endpoint, "Chat session started");

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if matches!(line, "/quit" | "/exit") {
            break;
        }

        match chip_label(line, widget.latest_suggestions()) {
            Some(label) => {
                widget.send_suggestion(&label).await;
            }
            None => {
                widget.set_input(line);
                widget.send_message().await;
            }
        }
    }

    Ok(widget.into_view().into_inner()?)
}

/// The suggestion selected by a 1-based chip number, if `line` is one.
fn chip_label(line: &str, suggestions: &[String]) -> Option<String> {
    let index = line.parse::<usize>().ok()?.checked_sub(1)?;
    suggestions.get(index).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_transport_requires_endpoint() {
        let mut config = AppConfig::load_from_args(["portfolio-site"]).unwrap();
        config.chat.endpoint = None;
        let err = chat_transport(&config).unwrap_err();
        assert!(err.to_string().contains("no chat endpoint configured"));

        config.chat.endpoint = Some("http://127.0.0.1:5000/api/chat".into());
        assert_eq!(
            chat_transport(&config).unwrap().endpoint().path(),
            "/api/chat"
        );
    }

    #[test]
    fn test_chip_label() {
        let chips = vec!["A".to_string(), "B".to_string()];
        assert_eq!(chip_label("2", &chips).as_deref(), Some("B"));
        assert_eq!(chip_label("0", &chips), None);
        assert_eq!(chip_label("3", &chips), None);
        assert_eq!(chip_label("hello", &chips), None);
    }
}
