//! Line storage for a single buffer.
//!
//! The text is a vector of lines, each a vector of chars terminated by the
//! newline sentinel. Columns are char indices, so a mark may rest on the
//! sentinel (column == last index) in insert mode.

use std::fmt;

use super::cursor::{BufferId, Mark};
use super::selection::Region;
use super::snippet::Snippet;
use crate::error::EditorError;

/// Line terminator stored at the end of every line
pub const NEWLINE: char = '\n';

/// One line of text, always ending in [`NEWLINE`]
pub type Line = Vec<char>;

/// Mutable line-oriented text of one buffer.
///
/// Invariant: at least one line exists and every line ends in `'\n'`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextModel {
    id: BufferId,
    lines: Vec<Line>,
}

impl TextModel {
    /// An empty buffer holding a single empty line
    pub fn new(id: BufferId) -> Self {
        Self {
            id,
            lines: vec![vec![NEWLINE]],
        }
    }

    /// Build a model from file content, terminating the last line if needed
    pub fn from_text(id: BufferId, content: &str) -> Self {
        let mut lines = split_lines(content.chars());
        if lines.is_empty() {
            lines.push(vec![NEWLINE]);
        }
        Self { id, lines }
    }

    pub fn id(&self) -> BufferId {
        self.id
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn last_line(&self) -> usize {
        self.lines.len() - 1
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line(&self, line: usize) -> Option<&[char]> {
        self.lines.get(line).map(Vec::as_slice)
    }

    /// Length of a line in chars, sentinel included (0 for missing lines)
    pub fn line_len(&self, line: usize) -> usize {
        self.lines.get(line).map_or(0, Vec::len)
    }

    /// Line content without the trailing newline
    pub fn line_text(&self, line: usize) -> String {
        match self.lines.get(line) {
            Some(chars) => chars[..chars.len() - 1].iter().collect(),
            None => String::new(),
        }
    }

    pub fn char_at(&self, line: usize, column: usize) -> Option<char> {
        self.lines.get(line).and_then(|l| l.get(column)).copied()
    }

    /// Column of the first non-blank character (the sentinel on blank lines)
    pub fn first_non_blank(&self, line: usize) -> usize {
        self.lines.get(line).map_or(0, |chars| {
            chars
                .iter()
                .position(|&c| c != ' ' && c != '\t')
                .unwrap_or(chars.len() - 1)
        })
    }

    /// Verify that a mark belongs to this model and points inside it
    pub fn check(&self, mark: Mark) -> Result<(), EditorError> {
        if mark.buffer != self.id {
            return Err(EditorError::ForeignMark {
                found: mark.buffer,
                expected: self.id,
            });
        }
        match self.lines.get(mark.line) {
            Some(line) if mark.column < line.len() => Ok(()),
            _ => Err(EditorError::stale(mark, self.lines.len())),
        }
    }

    // =========================================================================
    // Character primitives
    // =========================================================================

    /// Insert a character before the mark's column
    pub fn insert_char(&mut self, mark: Mark, ch: char) -> Result<(), EditorError> {
        if ch == NEWLINE {
            return Err(EditorError::NewlineInsert);
        }
        self.check(mark)?;
        self.lines[mark.line].insert(mark.column, ch);
        Ok(())
    }

    /// Split the mark's line at its column
    pub fn insert_newline(&mut self, mark: Mark) -> Result<(), EditorError> {
        self.check(mark)?;
        let line = &mut self.lines[mark.line];
        let tail = line.split_off(mark.column);
        line.push(NEWLINE);
        self.lines.insert(mark.line + 1, tail);
        Ok(())
    }

    /// Remove the character before the mark, joining with the previous line
    /// at line start. Returns where the mark ends up and what was removed.
    pub fn delete_char_before(&mut self, mark: Mark) -> Result<(Mark, Option<char>), EditorError> {
        self.check(mark)?;
        if mark.column > 0 {
            let ch = self.lines[mark.line].remove(mark.column - 1);
            return Ok((Mark::new(self.id, mark.line, mark.column - 1), Some(ch)));
        }
        if mark.line == 0 {
            return Ok((mark, None));
        }
        let join_column = self.lines[mark.line - 1].len() - 1;
        self.join_line_below(mark.line - 1);
        Ok((Mark::new(self.id, mark.line - 1, join_column), Some(NEWLINE)))
    }

    /// Remove the character under the mark, joining the next line when the
    /// mark is on the sentinel
    pub fn delete_char_after(&mut self, mark: Mark) -> Result<Option<char>, EditorError> {
        self.check(mark)?;
        if mark.column + 1 < self.lines[mark.line].len() {
            return Ok(Some(self.lines[mark.line].remove(mark.column)));
        }
        if self.join_line_below(mark.line) {
            Ok(Some(NEWLINE))
        } else {
            Ok(None)
        }
    }

    /// Append the following line to `line`. Returns false on the last line.
    pub fn join_line_below(&mut self, line: usize) -> bool {
        if line + 1 >= self.lines.len() {
            return false;
        }
        let next = self.lines.remove(line + 1);
        let current = &mut self.lines[line];
        current.pop();
        current.extend(next);
        true
    }

    // =========================================================================
    // Span operations
    // =========================================================================

    /// Remove every line spanned by the two marks. Leaves one empty line if
    /// the buffer would become empty. Returns the number of lines removed.
    pub fn delete_lines(&mut self, from: Mark, to: Mark) -> Result<usize, EditorError> {
        self.check(from)?;
        self.check(to)?;
        let (first, last) = (from.line.min(to.line), from.line.max(to.line));
        self.lines.drain(first..=last);
        if self.lines.is_empty() {
            self.lines.push(vec![NEWLINE]);
        }
        Ok(last - first + 1)
    }

    /// Copy of lines `first..=last`
    pub fn copy_lines(&self, first: usize, last: usize) -> Vec<Line> {
        let last = last.min(self.last_line());
        if first > last {
            return Vec::new();
        }
        self.lines[first..=last].to_vec()
    }

    /// Replace `count` lines starting at `first` with `lines`, returning the
    /// removed ones. `first` may be one past the last line to append.
    pub fn replace_lines(&mut self, first: usize, count: usize, lines: Vec<Line>) -> Vec<Line> {
        let first = first.min(self.lines.len());
        let end = (first + count).min(self.lines.len());
        let lines = lines.into_iter().map(terminated);
        let removed: Vec<Line> = self.lines.splice(first..end, lines).collect();
        if self.lines.is_empty() {
            self.lines.push(vec![NEWLINE]);
        }
        removed
    }

    /// Remove the span of a region. With `inclusive`, the character under the
    /// end mark goes too (a sentinel there removes the line break, except the
    /// final one). Returns the start mark and the removed text.
    pub fn delete_region(
        &mut self,
        region: Region,
        inclusive: bool,
    ) -> Result<(Mark, Snippet), EditorError> {
        let (from, to) = region.ordered();
        self.check(from)?;
        self.check(to)?;
        let end = if inclusive { self.position_after(to) } else { to };
        let removed = self.copy_span(from, end);

        let tail = self.lines[end.line][end.column..].to_vec();
        let first = &mut self.lines[from.line];
        first.truncate(from.column);
        first.extend(tail);
        self.lines.drain(from.line + 1..=end.line);

        Ok((from, removed))
    }

    /// Splice a snippet in before the mark. Returns the mark just past the
    /// inserted text.
    pub fn insert_text(&mut self, mark: Mark, snippet: &Snippet) -> Result<Mark, EditorError> {
        self.check(mark)?;
        if snippet.is_empty() {
            return Ok(mark);
        }
        let line = &self.lines[mark.line];
        let mut chars = line[..mark.column].to_vec();
        chars.extend_from_slice(snippet.chars());
        chars.extend_from_slice(&line[mark.column..]);

        let replacement = split_lines(chars);
        self.lines.splice(mark.line..=mark.line, replacement);
        Ok(mark.advance_over(snippet))
    }

    /// Copy the ordered span between two marks, end exclusive
    pub fn copy_region(&self, from: Mark, to: Mark) -> Result<Snippet, EditorError> {
        let (from, to) = Region::new(from, to).ordered();
        self.check(from)?;
        self.check(to)?;
        Ok(self.copy_span(from, to))
    }

    fn copy_span(&self, from: Mark, to: Mark) -> Snippet {
        if from.line == to.line {
            return Snippet::from_chars(self.lines[from.line][from.column..to.column].to_vec());
        }
        let mut chars = self.lines[from.line][from.column..].to_vec();
        for line in &self.lines[from.line + 1..to.line] {
            chars.extend_from_slice(line);
        }
        chars.extend_from_slice(&self.lines[to.line][..to.column]);
        Snippet::from_chars(chars)
    }

    /// First position after `mark`, never past the final sentinel
    pub fn position_after(&self, mark: Mark) -> Mark {
        if mark.column + 1 < self.lines[mark.line].len() {
            Mark::new(self.id, mark.line, mark.column + 1)
        } else if mark.line < self.last_line() {
            Mark::new(self.id, mark.line + 1, 0)
        } else {
            mark
        }
    }
}

impl fmt::Display for TextModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text: String = self.lines.iter().flatten().collect();
        f.write_str(&text)
    }
}

/// Split chars into lines after each newline, terminating a trailing
/// partial line. No chars, no lines.
pub(super) fn split_lines(chars: impl IntoIterator<Item = char>) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut current = Vec::new();
    for ch in chars {
        current.push(ch);
        if ch == NEWLINE {
            lines.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        current.push(NEWLINE);
        lines.push(current);
    }
    lines
}

fn terminated(mut line: Line) -> Line {
    if line.last() != Some(&NEWLINE) {
        line.push(NEWLINE);
    }
    line
}
