//! Typewriter-animated terminal widget.
//!
//! The widget shows a short list of `key: value` lines, each typed out
//! character by character behind a prompt marker. The first line always
//! lists skills; its value comes from the external skills collection.
//!
//! # Structure
//!
//! - [`animator`]: the typewriter state machine and its async driver
//! - [`surface`]: output regions the animator types into

pub mod animator;
pub mod surface;

pub use animator::{Phase, Typewriter, TypingTiming, animate};
pub use surface::{ConsoleTerminal, HtmlTerminal, TerminalRow, TerminalSurface};

use serde::{Deserialize, Serialize};

use crate::skills::{SkillCategory, skills_summary};

/// Prompt marker typed before every line.
pub const DEFAULT_PROMPT: &str = ">$";

/// Key of the first line, whose value is derived from the skills collection.
pub const SKILLS_KEY: &str = "skills";

/// A static label/value pair shown on the terminal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TerminalEntry {
    pub key: String,
    #[serde(default)]
    pub value: String,
}

impl TerminalEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Entries shown after the skills line when none are configured.
pub fn default_entries() -> Vec<TerminalEntry> {
    vec![
        TerminalEntry::new("job", "AI Engineer"),
        TerminalEntry::new(
            "hobbies",
            "exploring AI, open-source, reading, audiobook story, and learning new things",
        ),
        TerminalEntry::new(
            "project",
            "real-time image processing, speech recognition, and chatbot",
        ),
    ]
}

/// One line of terminal output: a prompt marker followed by content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayLine {
    prompt: String,
    content: String,
}

impl DisplayLine {
    /// Build the line for an entry. Content reads `" {key}: {value}"`.
    pub fn new(prompt: impl Into<String>, key: &str, value: &str) -> Self {
        Self {
            prompt: prompt.into(),
            content: format!(" {key}: {value}"),
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Build the ordered terminal lines: the skills line, then `entries`.
pub fn build_lines(
    prompt: &str,
    skills: Option<&[SkillCategory]>,
    entries: &[TerminalEntry],
) -> Vec<DisplayLine> {
    let skills_value = skills_summary(skills);
    std::iter::once(DisplayLine::new(prompt, SKILLS_KEY, &skills_value))
        .chain(
            entries
                .iter()
                .map(|entry| DisplayLine::new(prompt, &entry.key, &entry.value)),
        )
        .collect()
}
