//! Marks: positions bound to a buffer, with navigation arithmetic.
//!
//! A mark never holds a reference to its text. Every operation that needs the
//! text takes it as an argument, so marks stay `Copy` and can be stored in
//! undo patches and command contexts.

use std::fmt;

use super::buffer::TextModel;
use super::snippet::Snippet;
use super::Mode;
use crate::error::EditorError;

/// Identifies a buffer within an editor session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BufferId(pub usize);

impl fmt::Display for BufferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A (line, column) position in one buffer, both 0-indexed char offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mark {
    pub buffer: BufferId,
    pub line: usize,
    pub column: usize,
}

impl Mark {
    pub const fn new(buffer: BufferId, line: usize, column: usize) -> Self {
        Self {
            buffer,
            line,
            column,
        }
    }

    /// The first position of a buffer
    pub const fn first_text_char(buffer: BufferId) -> Self {
        Self::new(buffer, 0, 0)
    }

    /// Last visible character of the buffer (column 0 on an empty last line)
    pub fn last_text_char(text: &TextModel) -> Self {
        let line = text.last_line();
        Self::new(text.id(), line, text.line_len(line).saturating_sub(2))
    }

    pub fn check(&self, text: &TextModel) -> Result<(), EditorError> {
        text.check(*self)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn at_first_line(&self) -> bool {
        self.line == 0
    }

    pub fn at_last_line(&self, text: &TextModel) -> bool {
        self.line >= text.last_line()
    }

    pub fn at_line_start(&self) -> bool {
        self.column == 0
    }

    /// On the newline sentinel
    pub fn at_line_end(&self, text: &TextModel) -> bool {
        self.column + 1 >= text.line_len(self.line)
    }

    pub fn at_empty_line(&self, text: &TextModel) -> bool {
        text.line_len(self.line) <= 1
    }

    pub fn at_start_of_text(&self) -> bool {
        self.line == 0 && self.column == 0
    }

    pub fn at_end_of_text(&self, text: &TextModel) -> bool {
        self.at_last_line(text) && self.at_line_end(text)
    }

    pub fn at_last_text_char(&self, text: &TextModel) -> bool {
        let last = Mark::last_text_char(text);
        self.line == last.line && self.column >= last.column
    }

    /// Character under the mark (the sentinel at line end)
    pub fn char_at(&self, text: &TextModel) -> Option<char> {
        text.char_at(self.line, self.column)
    }

    /// Column of the last non-sentinel character, if the line has one
    pub fn last_char_column(&self, text: &TextModel) -> Option<usize> {
        text.line_len(self.line).checked_sub(2)
    }

    pub fn is_before(&self, other: &Mark) -> bool {
        (self.line, self.column) < (other.line, other.column)
    }

    /// Largest column the cursor may occupy on its line in `mode`
    pub fn max_cursor_column(&self, text: &TextModel, mode: Mode) -> usize {
        let len = text.line_len(self.line);
        if mode.allows_sentinel() {
            len.saturating_sub(1)
        } else {
            len.saturating_sub(2)
        }
    }

    // =========================================================================
    // Clamping
    // =========================================================================

    /// Clamp the column to the line (the line is assumed valid)
    pub fn fix_position(&mut self, text: &TextModel, mode: Mode) {
        self.column = self.column.min(self.max_cursor_column(text, mode));
    }

    /// Clamp the line to the buffer, then the column to the line
    pub fn fix_line_and_position(&mut self, text: &TextModel, mode: Mode) {
        self.line = self.line.min(text.last_line());
        self.fix_position(text, mode);
    }

    // =========================================================================
    // Movement
    // =========================================================================

    /// Move right, wrapping onto following lines. Crossing a line break
    /// costs one step.
    pub fn move_right(&mut self, text: &TextModel, mode: Mode, steps: usize) {
        let mut steps = steps;
        while steps > 0 {
            let max = self.max_cursor_column(text, mode);
            if self.column + steps <= max {
                self.column += steps;
                return;
            }
            if self.at_last_line(text) {
                self.column = max;
                return;
            }
            steps -= (max.saturating_sub(self.column) + 1).min(steps);
            self.line += 1;
            self.column = 0;
        }
    }

    /// Move left, wrapping onto the last character of previous lines
    pub fn move_left(&mut self, text: &TextModel, mode: Mode, steps: usize) {
        let mut steps = steps;
        while steps > 0 {
            if self.column >= steps {
                self.column -= steps;
                return;
            }
            if self.at_first_line() {
                self.column = 0;
                return;
            }
            steps -= self.column + 1;
            self.line -= 1;
            self.column = self.last_char_column(text).unwrap_or(0);
            self.fix_position(text, mode);
        }
    }

    pub fn move_up(&mut self, text: &TextModel, mode: Mode, steps: usize) {
        self.line = self.line.saturating_sub(steps);
        self.fix_position(text, mode);
    }

    pub fn move_down(&mut self, text: &TextModel, mode: Mode, steps: usize) {
        self.line = (self.line + steps).min(text.last_line());
        self.fix_position(text, mode);
    }

    /// The position just past `snippet` if it were inserted at this mark
    pub fn advance_over(&self, snippet: &Snippet) -> Mark {
        match snippet.line_breaks() {
            0 => Mark::new(self.buffer, self.line, self.column + snippet.len()),
            breaks => Mark::new(self.buffer, self.line + breaks, snippet.tail_len()),
        }
    }
}
