//! Output regions for the typewriter.

use std::io::{self, Write};

use crate::markup::escape_html;

/// The output region the typewriter types into.
///
/// Calls always arrive in the order `begin_line`, prompt characters,
/// `begin_content`, content characters, then the next `begin_line`.
pub trait TerminalSurface {
    /// Open a new output line.
    fn begin_line(&mut self);
    /// Append one character to the current line's prompt marker.
    fn push_prompt(&mut self, ch: char);
    /// Open the content span on the current line.
    fn begin_content(&mut self);
    /// Append one character to the current line's content.
    fn push_content(&mut self, ch: char);
}

/// A line of terminal output as typed so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TerminalRow {
    pub prompt: String,
    /// `None` until the content span has been opened.
    pub content: Option<String>,
}

/// Records typed rows and renders them as HTML.
#[derive(Debug, Clone, Default)]
pub struct HtmlTerminal {
    rows: Vec<TerminalRow>,
}

impl HtmlTerminal {
    pub fn rows(&self) -> &[TerminalRow] {
        &self.rows
    }

    fn current(&mut self) -> &mut TerminalRow {
        if self.rows.is_empty() {
            self.rows.push(TerminalRow::default());
        }
        let last = self.rows.len() - 1;
        &mut self.rows[last]
    }

    /// Render rows as `output-line` paragraphs.
    pub fn render(&self) -> String {
        let mut html = String::new();
        for row in &self.rows {
            html.push_str(r#"<p class="output-line"><span class="prompt-symbol">"#);
            html.push_str(&escape_html(&row.prompt));
            html.push_str("</span>");
            if let Some(content) = &row.content {
                html.push_str(r#"<span class="content-text">"#);
                html.push_str(&escape_html(content));
                html.push_str("</span>");
            }
            html.push_str("</p>");
        }
        html
    }
}

impl TerminalSurface for HtmlTerminal {
    fn begin_line(&mut self) {
        self.rows.push(TerminalRow::default());
    }

    fn push_prompt(&mut self, ch: char) {
        self.current().prompt.push(ch);
    }

    fn begin_content(&mut self) {
        self.current().content.get_or_insert_with(String::new);
    }

    fn push_content(&mut self, ch: char) {
        self.current()
            .content
            .get_or_insert_with(String::new)
            .push(ch);
    }
}

/// Types into a writer, flushing after every character.
///
/// The first write error is kept and reported by [`ConsoleTerminal::into_inner`];
/// later output is dropped.
#[derive(Debug)]
pub struct ConsoleTerminal<W: Write> {
    out: W,
    lines: usize,
    error: Option<io::Error>,
}

impl<W: Write> ConsoleTerminal<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            lines: 0,
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

    /// Terminate the last line and return the writer.
    pub fn into_inner(mut self) -> io::Result<W> {
        if self.lines > 0 {
            self.write("\n");
        }
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.out),
        }
    }
}

impl<W: Write> TerminalSurface for ConsoleTerminal<W> {
    fn begin_line(&mut self) {
        if self.lines > 0 {
            self.write("\n");
        }
        self.lines += 1;
    }

    fn push_prompt(&mut self, ch: char) {
        self.write(ch.encode_utf8(&mut [0; 4]));
    }

    fn begin_content(&mut self) {}

    fn push_content(&mut self, ch: char) {
        self.write(ch.encode_utf8(&mut [0; 4]));
    }
}
