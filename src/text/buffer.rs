//! Deck list line buffer
//!
//! Plain text view of the editor content with no knowledge of the DOM.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A deck list as an ordered sequence of lines
///
/// Unlike `str::lines`, splitting keeps every segment: empty lines and a
/// trailing empty line survive, so `from_text(t).to_string() == t`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckList {
    lines: Vec<String>,
}

impl DeckList {
    /// Create a list with a single blank line
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
        }
    }

    /// Split on `\n`; carriage returns are kept
    pub fn from_text(s: &str) -> Self {
        Self {
            lines: s.split('\n').map(|l| l.to_string()).collect(),
        }
    }

    /// Split clipboard text, dropping every `\r` first
    pub fn from_clipboard(s: &str) -> Self {
        Self::from_text(&s.replace('\r', ""))
    }

    /// Create a list from lines
    pub fn from_lines(lines: Vec<String>) -> Self {
        let lines = if lines.is_empty() {
            vec![String::new()]
        } else {
            lines
        };

        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn get_line(&self, line: usize) -> Option<&str> {
        self.lines.get(line).map(|s| s.as_str())
    }

    /// True when every line is empty
    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|l| l.is_empty())
    }
}

impl Default for DeckList {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DeckList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines.join("\n"))
    }
}

impl FromIterator<String> for DeckList {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self::from_lines(iter.into_iter().collect())
    }
}
