//! Typewriter state machine.
//!
//! The animator is driven one step at a time. Each step types at most one
//! character and reports how long to wait before the next step, so the same
//! machine can be paced by a timer ([`Typewriter::run`]) or drained at once
//! ([`Typewriter::finish`]).

use std::time::Duration;

use tracing::debug;

use super::DisplayLine;
use super::surface::TerminalSurface;

/// Which part of the current line is being typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    TypingPrompt,
    TypingContent,
}

/// Delays between animation steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingTiming {
    /// Delay after each character.
    pub char_delay: Duration,
    /// Pause after a line is complete.
    pub line_delay: Duration,
}

impl TypingTiming {
    pub fn from_millis(char_delay: u64, line_delay: u64) -> Self {
        Self {
            char_delay: Duration::from_millis(char_delay),
            line_delay: Duration::from_millis(line_delay),
        }
    }
}

impl Default for TypingTiming {
    fn default() -> Self {
        Self::from_millis(50, 500)
    }
}

/// A display line split into characters, so each step indexes directly.
#[derive(Debug, Clone)]
struct CharLine {
    prompt: Vec<char>,
    content: Vec<char>,
}

impl From<&DisplayLine> for CharLine {
    fn from(line: &DisplayLine) -> Self {
        Self {
            prompt: line.prompt().chars().collect(),
            content: line.content().chars().collect(),
        }
    }
}

/// Types a fixed set of lines into a [`TerminalSurface`].
///
/// State is the `(line, phase, char index)` triple. The animator runs once;
/// after the last line it stays finished.
#[derive(Debug, Clone)]
pub struct Typewriter {
    lines: Vec<CharLine>,
    timing: TypingTiming,
    line: usize,
    phase: Phase,
    char_index: usize,
}

impl Typewriter {
    pub fn new(lines: Vec<DisplayLine>, timing: TypingTiming) -> Self {
        Self {
            lines: lines.iter().map(CharLine::from).collect(),
            timing,
            line: 0,
            phase: Phase::TypingPrompt,
            char_index: 0,
        }
    }

    /// Current `(line, phase, char index)`.
    pub fn position(&self) -> (usize, Phase, usize) {
        (self.line, self.phase, self.char_index)
    }

    pub fn is_finished(&self) -> bool {
        self.line >= self.lines.len()
    }

    /// Advance by one step.
    ///
    /// Returns the delay to wait before the next step, or `None` once every
    /// line has been consumed.
    pub fn step<S: TerminalSurface + ?Sized>(&mut self, surface: &mut S) -> Option<Duration> {
        let line = self.lines.get(self.line)?;

        match self.phase {
            Phase::TypingPrompt => {
                if let Some(&ch) = line.prompt.get(self.char_index) {
                    if self.char_index == 0 {
                        surface.begin_line();
                    }
                    surface.push_prompt(ch);
                    self.char_index += 1;
                } else {
                    self.phase = Phase::TypingContent;
                    self.char_index = 0;
                }
                Some(self.timing.char_delay)
            }
            Phase::TypingContent => {
                if let Some(&ch) = line.content.get(self.char_index) {
                    if self.char_index == 0 {
                        // A line with an empty prompt has not been opened yet.
                        if line.prompt.is_empty() {
                            surface.begin_line();
                        }
                        surface.begin_content();
                    }
                    surface.push_content(ch);
                    self.char_index += 1;
                    Some(self.timing.char_delay)
                } else {
                    self.line += 1;
                    self.phase = Phase::TypingPrompt;
                    self.char_index = 0;
                    Some(self.timing.line_delay)
                }
            }
        }
    }

    /// Run every remaining step immediately, ignoring delays.
    pub fn finish<S: TerminalSurface + ?Sized>(&mut self, surface: &mut S) {
        while self.step(surface).is_some() {}
    }

    /// Run every remaining step, sleeping between steps.
    pub async fn run<S: TerminalSurface + ?Sized>(mut self, surface: &mut S) {
        debug!(name: "terminal.started", lines = self.lines.len(), "Typewriter started");
        while let Some(delay) = self.step(surface) {
            tokio::time::sleep(delay).await;
        }
        debug!(name: "terminal.finished", "Typewriter finished");
    }
}

/// Animate `lines` into `region`.
///
/// Does nothing when the region is absent or there is nothing to type.
/// Returns whether the animation ran.
pub async fn animate<S: TerminalSurface + ?Sized>(
    region: Option<&mut S>,
    lines: Vec<DisplayLine>,
    timing: TypingTiming,
) -> bool {
    let Some(region) = region else {
        debug!(name: "terminal.skipped", "No terminal output region");
        return false;
    };
    if lines.is_empty() {
        return false;
    }

    Typewriter::new(lines, timing).run(region).await;
    true
}
