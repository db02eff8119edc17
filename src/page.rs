//! Home page rendering.
//!
//! The page is rendered in full on the server. The terminal region arrives
//! already typed out, the top-up button starts hidden, and the chat widget is
//! mounted closed with its welcome message.

use crate::chat::{ChatMessage, ChatWidget, HtmlChatView};
use crate::config::{AppConfig, ChatConfig, TerminalConfig};
use crate::content::{Portfolio, Project};
use crate::markup::{escape_html, is_safe_href};
use crate::scroll::{HtmlScrollButton, ScrollToTop};
use crate::skills::SkillCategory;
use crate::terminal::{HtmlTerminal, Typewriter, build_lines};

/// Generate the HTML shell for a page.
fn html_shell(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title}</title>
    <link rel="stylesheet" href="/static/css/style.css">
    <script defer src="/static/js/main.js"></script>
</head>
<body id="top">
{content}
</body>
</html>"#,
        title = escape_html(title),
    )
}

/// Render the home page for `portfolio`.
pub fn render_home(config: &AppConfig, portfolio: &Portfolio) -> String {
    let content = format!(
        r#"<main class="container">
<section id="terminal" class="terminal">
<div id="terminal-output" class="terminal-output">{terminal}</div>
</section>
<section id="projects" class="projects">
<h2>Projects</h2>
{projects}
</section>
</main>
{top_up}
{chat}"#,
        terminal = render_terminal(&config.terminal, portfolio.skills()),
        projects = render_projects(&portfolio.projects),
        top_up = render_top_up(config.scroll.threshold),
        chat = render_chat(&config.chat),
    );

    html_shell(&config.content.site_title, &content)
}

/// The terminal region's rows, fully typed.
fn render_terminal(terminal: &TerminalConfig, skills: Option<&[SkillCategory]>) -> String {
    let lines = build_lines(&terminal.prompt, skills, &terminal.entries);
    let mut region = HtmlTerminal::default();
    Typewriter::new(lines, terminal.timing()).finish(&mut region);
    region.render()
}

fn render_projects(projects: &[Project]) -> String {
    if projects.is_empty() {
        return r#"<p class="empty">No projects yet.</p>"#.to_string();
    }

    let mut html = String::from(r#"<div class="project-grid">"#);
    for project in projects {
        html.push_str(r#"<article class="project-card">"#);
        html.push_str(&format!("<h3>{}</h3>", escape_html(&project.title)));
        if !project.description.is_empty() {
            html.push_str(&format!("<p>{}</p>", escape_html(&project.description)));
        }
        if !project.tags.is_empty() {
            html.push_str(r#"<ul class="tags">"#);
            for tag in &project.tags {
                html.push_str(&format!("<li>{}</li>", escape_html(tag)));
            }
            html.push_str("</ul>");
        }
        if let Some(link) = project.link.as_deref().filter(|l| is_safe_href(l)) {
            html.push_str(&format!(
                r#"<a href="{}" target="_blank" rel="noopener noreferrer">View project</a>"#,
                escape_html(link)
            ));
        }
        html.push_str("</article>");
    }
    html.push_str("</div>");
    html
}

/// The top-up button as seen at scroll offset 0.
fn render_top_up(threshold: f64) -> String {
    ScrollToTop::attach(Some(HtmlScrollButton::default()), threshold)
        .map(|mut control| {
            control.on_scroll(0.0);
            control.host().render("↑", control.threshold())
        })
        .unwrap_or_default()
}

fn render_chat(chat: &ChatConfig) -> String {
    let welcome =
        ChatMessage::bot(chat.welcome_text.as_str()).with_suggestions(chat.welcome_suggestions.iter().cloned());
    let widget = ChatWidget::mount((), HtmlChatView::new(&chat.title, &chat.placeholder), welcome);
    widget.view().render()
}
