//! Undo/redo history.
//!
//! Each change pairs the command that produced it (replayed on redo) with a
//! patch that reverts it (applied on undo). Everything typed between entering
//! and leaving insert mode is coalesced by an [`InsertSession`] into a single
//! change.

use super::buffer::Line;
use super::cursor::Mark;
use super::selection::Region;
use super::snippet::Snippet;
use crate::keymap::Command;
use crate::messages::CommandContext;

/// Default number of changes kept per buffer
pub const DEFAULT_UNDO_LIMIT: usize = 10_000;

/// How to revert one change
#[derive(Debug, Clone, PartialEq)]
pub enum UndoPatch {
    /// Delete `[start, end)` when `end` is set, then insert `text` at `start`
    Text {
        start: Mark,
        end: Option<Mark>,
        text: Snippet,
    },
    /// Remove `inserted` lines at `first`, put `removed` back there and
    /// restore the cursor
    Lines {
        first: usize,
        removed: Vec<Line>,
        inserted: usize,
        cursor: Mark,
    },
}

/// A recorded change
#[derive(Debug, Clone)]
pub struct Change {
    pub redo: CommandContext,
    pub undo: UndoPatch,
}

/// Ordered history of changes with a position marker.
///
/// `current` counts the changes that are applied: 0 means nothing to undo,
/// `len()` means nothing to redo.
#[derive(Debug, Clone)]
pub struct ChangeList {
    changes: Vec<Change>,
    current: usize,
    limit: usize,
}

impl Default for ChangeList {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeList {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_UNDO_LIMIT)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            changes: Vec::new(),
            current: 0,
            limit: limit.max(1),
        }
    }

    /// Append a change, discarding anything that was undone
    pub fn record(&mut self, redo: CommandContext, undo: UndoPatch) {
        self.changes.truncate(self.current);
        tracing::debug!(
            target: "history",
            command = ?redo.command,
            index = self.changes.len() + 1,
            "record change"
        );
        self.changes.push(Change { redo, undo });
        if self.changes.len() > self.limit {
            self.changes.remove(0);
        }
        self.current = self.changes.len();
    }

    /// Step back one change, returning the patch that reverts it
    pub fn undo(&mut self) -> Option<UndoPatch> {
        if self.current == 0 {
            return None;
        }
        self.current -= 1;
        Some(self.changes[self.current].undo.clone())
    }

    /// Step forward one change, returning the command to replay
    pub fn redo(&mut self) -> Option<CommandContext> {
        let change = self.changes.get(self.current)?;
        let redo = change.redo.clone();
        self.current += 1;
        Some(redo)
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Text typed during one stay in insert mode.
///
/// `start` is where the typed text begins, `new_text` is everything typed
/// since (ending at the cursor), `old_text` collects original characters
/// removed by backspacing past `start` or deleting forward, and `suffix` is
/// text inserted after the cursor when the session opened (`O` on the first
/// line).
#[derive(Debug, Clone, PartialEq)]
pub struct InsertSession {
    pub start: Mark,
    pub new_text: Snippet,
    pub old_text: Snippet,
    pub suffix: Snippet,
}

impl InsertSession {
    pub fn new(start: Mark) -> Self {
        Self {
            start,
            new_text: Snippet::new(),
            old_text: Snippet::new(),
            suffix: Snippet::new(),
        }
    }

    pub fn push(&mut self, ch: char) {
        self.new_text.push(ch);
    }

    /// A character before the cursor was removed; `cursor` is the position
    /// after removal
    pub fn backspace(&mut self, removed: char, cursor: Mark) {
        if self.new_text.pop().is_none() {
            self.old_text.prepend(removed);
            self.start = cursor;
        }
    }

    /// The character after the cursor was removed
    pub fn delete_forward(&mut self, removed: char) {
        if self.suffix.pop_front().is_none() {
            self.old_text.push(removed);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.new_text.is_empty() && self.old_text.is_empty() && self.suffix.is_empty()
    }

    /// Everything the session left in the buffer
    pub fn inserted(&self) -> Snippet {
        let mut inserted = self.new_text.clone();
        inserted.append(&self.suffix);
        inserted
    }

    /// Turn the session into a change entry, or `None` if nothing changed.
    ///
    /// The redo command replaces the original text with the typed text; the
    /// patch removes the typed text and restores the original.
    pub fn into_change(self) -> Option<(CommandContext, UndoPatch)> {
        if self.is_empty() {
            return None;
        }
        let inserted = self.inserted();
        let replaced = Region::new(self.start, self.start.advance_over(&self.old_text));

        let mut redo = CommandContext::new(Command::ReplaceRegion);
        redo.point = Some(self.start);
        redo.region = Some(replaced);
        redo.text = Some(inserted.clone());
        redo.silent = true;

        let undo = UndoPatch::Text {
            start: self.start,
            end: (!inserted.is_empty()).then(|| self.start.advance_over(&inserted)),
            text: self.old_text,
        };
        Some((redo, undo))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editable::BufferId;

    fn mark(line: usize, column: usize) -> Mark {
        Mark::new(BufferId(0), line, column)
    }

    fn patch(column: usize) -> UndoPatch {
        UndoPatch::Text {
            start: mark(0, column),
            end: None,
            text: Snippet::from("x"),
        }
    }

    #[test]
    fn test_undo_then_redo_walks_the_list() {
        let mut changes = ChangeList::new();
        changes.record(CommandContext::new(Command::DeleteCharAfter), patch(0));
        changes.record(CommandContext::new(Command::DeleteCharAfter), patch(1));
        assert_eq!(changes.current(), 2);
        assert!(changes.clone().redo().is_none());

        assert_eq!(changes.undo(), Some(patch(1)));
        assert_eq!(changes.undo(), Some(patch(0)));
        assert_eq!(changes.undo(), None);
        assert_eq!(changes.current(), 0);

        assert!(changes.redo().is_some());
        assert_eq!(changes.current(), 1);
    }

    #[test]
    fn test_record_discards_undone_changes() {
        let mut changes = ChangeList::new();
        changes.record(CommandContext::new(Command::DeleteCharAfter), patch(0));
        changes.record(CommandContext::new(Command::DeleteCharAfter), patch(1));
        changes.undo();
        changes.record(CommandContext::new(Command::JoinLines), patch(2));

        assert_eq!(changes.len(), 2);
        assert!(changes.redo().is_none());
        assert_eq!(changes.undo(), Some(patch(2)));
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut changes = ChangeList::with_limit(2);
        for column in 0..3 {
            changes.record(CommandContext::new(Command::DeleteCharAfter), patch(column));
        }
        assert_eq!(changes.len(), 2);
        assert_eq!(changes.undo(), Some(patch(2)));
        assert_eq!(changes.undo(), Some(patch(1)));
        assert_eq!(changes.undo(), None);
    }

    #[test]
    fn test_session_backspace_consumes_typed_text_first() {
        let mut session = InsertSession::new(mark(0, 3));
        session.push('a');
        session.push('b');
        session.backspace('b', mark(0, 4));
        assert_eq!(session.new_text.to_string(), "a");

        session.backspace('a', mark(0, 3));
        session.backspace('z', mark(0, 2));
        assert_eq!(session.old_text.to_string(), "z");
        assert_eq!(session.start, mark(0, 2));
    }

    #[test]
    fn test_session_into_change() {
        let mut session = InsertSession::new(mark(1, 2));
        session.push('h');
        session.push('i');
        session.delete_forward('x');

        let (redo, undo) = session.into_change().unwrap();
        assert_eq!(redo.command, Command::ReplaceRegion);
        assert_eq!(redo.region, Some(Region::new(mark(1, 2), mark(1, 3))));
        assert_eq!(redo.text, Some(Snippet::from("hi")));
        assert_eq!(
            undo,
            UndoPatch::Text {
                start: mark(1, 2),
                end: Some(mark(1, 4)),
                text: Snippet::from("x"),
            }
        );
    }

    #[test]
    fn test_empty_session_records_nothing() {
        assert!(InsertSession::new(mark(0, 0)).into_change().is_none());
    }
}
