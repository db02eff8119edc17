//! Inline formatter for chat text.
//!
//! Supports a small markdown subset, applied as ordered passes:
//!
//! 1. `**bold**` becomes [`Inline::Strong`]
//! 2. `*italic*` becomes [`Inline::Emphasis`]
//! 3. `[label](url)` becomes [`Inline::Link`]
//! 4. `\n` becomes [`Inline::LineBreak`]
//!
//! Bold runs before italic so `**` is never read as two italic markers.
//! Later passes descend into strong and emphasis children but never into
//! link labels. Markers do not span lines.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.*?)\*").unwrap());
static LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[(.*?)\]\((.*?)\)").unwrap());

/// A formatted span of chat text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Strong(Vec<Inline>),
    Emphasis(Vec<Inline>),
    /// A link that opens in a new browsing context.
    Link { label: String, href: String },
    LineBreak,
}

impl Inline {
    fn text(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// Format `text` into inline spans.
pub fn format_text(text: &str) -> Vec<Inline> {
    let nodes = vec![Inline::text(text)];
    let nodes = replace_pass(nodes, &BOLD, &|caps| {
        Inline::Strong(non_empty_text(&caps[1]))
    });
    let nodes = replace_pass(nodes, &ITALIC, &|caps| {
        Inline::Emphasis(non_empty_text(&caps[1]))
    });
    let nodes = replace_pass(nodes, &LINK, &|caps| Inline::Link {
        label: caps[1].to_string(),
        href: caps[2].to_string(),
    });
    split_line_breaks(nodes)
}

/// Flatten spans to plain text, rendering links as `label (href)`.
pub fn to_plain(nodes: &[Inline]) -> String {
    let mut out = String::new();
    push_plain(nodes, &mut out);
    out
}

fn push_plain(nodes: &[Inline], out: &mut String) {
    for node in nodes {
        match node {
            Inline::Text(text) => out.push_str(text),
            Inline::Strong(children) | Inline::Emphasis(children) => push_plain(children, out),
            Inline::Link { label, href } => {
                out.push_str(label);
                if label != href {
                    out.push_str(" (");
                    out.push_str(href);
                    out.push(')');
                }
            }
            Inline::LineBreak => out.push('\n'),
        }
    }
}

fn non_empty_text(s: &str) -> Vec<Inline> {
    if s.is_empty() {
        Vec::new()
    } else {
        vec![Inline::text(s)]
    }
}

fn replace_pass(
    nodes: Vec<Inline>,
    pattern: &Regex,
    make: &dyn Fn(&Captures<'_>) -> Inline,
) -> Vec<Inline> {
    let mut out = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            Inline::Text(text) => split_matches(&text, pattern, make, &mut out),
            Inline::Strong(children) => {
                out.push(Inline::Strong(replace_pass(children, pattern, make)));
            }
            Inline::Emphasis(children) => {
                out.push(Inline::Emphasis(replace_pass(children, pattern, make)));
            }
            other => out.push(other),
        }
    }
    out
}

fn split_matches(
    text: &str,
    pattern: &Regex,
    make: &dyn Fn(&Captures<'_>) -> Inline,
    out: &mut Vec<Inline>,
) {
    let mut last = 0;
    for caps in pattern.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > last {
            out.push(Inline::text(&text[last..whole.start()]));
        }
        out.push(make(&caps));
        last = whole.end();
    }
    if last < text.len() {
        out.push(Inline::text(&text[last..]));
    }
}

fn split_line_breaks(nodes: Vec<Inline>) -> Vec<Inline> {
    let mut out = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            Inline::Text(text) => {
                for (i, segment) in text.split('\n').enumerate() {
                    if i > 0 {
                        out.push(Inline::LineBreak);
                    }
                    if !segment.is_empty() {
                        out.push(Inline::text(segment));
                    }
                }
            }
            Inline::Strong(children) => out.push(Inline::Strong(split_line_breaks(children))),
            Inline::Emphasis(children) => out.push(Inline::Emphasis(split_line_breaks(children))),
            other => out.push(other),
        }
    }
    out
}
