//! Multi-line text payloads.

use std::fmt;

use super::buffer::{split_lines, Line, NEWLINE};

/// A run of text that may span several lines.
///
/// Line breaks are stored as `'\n'`. A snippet copied from the middle of a
/// line has no trailing newline; one copied across whole lines ends with one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snippet {
    chars: Vec<char>,
}

impl Snippet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_chars(chars: Vec<char>) -> Self {
        Self { chars }
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Number of characters, line breaks included
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn push(&mut self, ch: char) {
        self.chars.push(ch);
    }

    pub fn pop(&mut self) -> Option<char> {
        self.chars.pop()
    }

    pub fn pop_front(&mut self) -> Option<char> {
        if self.chars.is_empty() {
            None
        } else {
            Some(self.chars.remove(0))
        }
    }

    pub fn prepend(&mut self, ch: char) {
        self.chars.insert(0, ch);
    }

    pub fn append(&mut self, other: &Snippet) {
        self.chars.extend_from_slice(&other.chars);
    }

    /// Number of line breaks contained
    pub fn line_breaks(&self) -> usize {
        self.chars.iter().filter(|&&c| c == NEWLINE).count()
    }

    /// Number of characters after the last line break
    pub fn tail_len(&self) -> usize {
        match self.chars.iter().rposition(|&c| c == NEWLINE) {
            Some(idx) => self.chars.len() - idx - 1,
            None => self.chars.len(),
        }
    }

    /// Whole lines laid end to end
    pub fn from_lines(lines: &[Line]) -> Self {
        Self::from_chars(lines.concat())
    }

    /// Newline-terminated lines; a trailing partial line gets a newline
    pub fn lines(&self) -> Vec<Line> {
        split_lines(self.chars.iter().copied())
    }

    /// The snippet repeated `times` times
    pub fn repeated(&self, times: usize) -> Snippet {
        Snippet {
            chars: self.chars.repeat(times),
        }
    }
}

impl From<&str> for Snippet {
    fn from(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
        }
    }
}

impl fmt::Display for Snippet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text: String = self.chars.iter().collect();
        f.write_str(&text)
    }
}
