//! Command enum representing all executable editor actions
//!
//! Commands are the bridge between key bindings and the dispatcher. Each
//! resolved binding produces a `CommandContext` carrying one of these.

/// All commands the dispatcher can execute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    // ========================================================================
    // Mode changes
    // ========================================================================
    /// `i`
    EnterInsert,
    /// `a`: insert after the cursor
    Append,
    /// `I`: insert before the first non-blank
    InsertLineStart,
    /// `A`: insert at line end
    AppendLineEnd,
    /// `o`
    OpenBelow,
    /// `O`
    OpenAbove,
    /// Esc, Ctrl-C and the insert-mode escape sequence
    ToNormal,
    /// `v`
    EnterVisual,
    /// `:`
    EnterCommandLine,

    // ========================================================================
    // Movement
    // ========================================================================
    /// Apply the context's motion to the cursor
    Move,
    /// `f{char}`
    FindCharRight,
    /// `F{char}`
    FindCharLeft,

    // ========================================================================
    // Insert-mode editing
    // ========================================================================
    InsertChar,
    InsertNewline,
    InsertTab,
    /// Backspace (also `X` in normal mode)
    DeleteCharBefore,
    /// Delete key (also `x` in normal mode)
    DeleteCharAfter,

    // ========================================================================
    // Operators and normal-mode edits
    // ========================================================================
    /// `d{motion}`
    Delete,
    /// `dd`
    DeleteLines,
    /// `c{motion}`
    Change,
    /// `cc`
    ChangeLines,
    /// `y{motion}`
    Yank,
    /// `yy`
    YankLines,
    /// `p`
    PasteAfter,
    /// `P`
    PasteBefore,
    /// `r{char}`
    ReplaceChar,
    /// `J`
    JoinLines,

    // ========================================================================
    // Visual mode
    // ========================================================================
    DeleteSelection,
    ChangeSelection,
    YankSelection,

    // ========================================================================
    // History
    // ========================================================================
    Undo,
    Redo,
    /// Replace a region with the context's text (redo of an insert session)
    ReplaceRegion,
    /// Replace a line range with the context's text (redo of whole-line rewrites)
    ReplaceLines,

    // ========================================================================
    // Command line
    // ========================================================================
    CommandLineChar,
    CommandLineBackspace,
    CommandLineCommit,
    CommandLineCancel,
    CommandLineHistoryPrev,
    CommandLineHistoryNext,

    // ========================================================================
    // Session
    // ========================================================================
    /// F1: leave immediately without saving
    ForceExit,
    /// Bound but does nothing (clears a pending prefix)
    Noop,
}

impl Command {
    /// Linewise form of an operator, used when the operator key is repeated
    /// (`d` then `d`)
    pub fn linewise(self) -> Option<Command> {
        match self {
            Command::Delete => Some(Command::DeleteLines),
            Command::Change => Some(Command::ChangeLines),
            Command::Yank => Some(Command::YankLines),
            _ => None,
        }
    }

    /// Whether executing this command can change the text
    pub fn is_mutating(self) -> bool {
        matches!(
            self,
            Command::InsertChar
                | Command::InsertNewline
                | Command::InsertTab
                | Command::DeleteCharBefore
                | Command::DeleteCharAfter
                | Command::Delete
                | Command::DeleteLines
                | Command::Change
                | Command::ChangeLines
                | Command::PasteAfter
                | Command::PasteBefore
                | Command::ReplaceChar
                | Command::JoinLines
                | Command::DeleteSelection
                | Command::ChangeSelection
                | Command::OpenBelow
                | Command::OpenAbove
                | Command::Undo
                | Command::Redo
                | Command::ReplaceRegion
                | Command::ReplaceLines
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operators_have_linewise_forms() {
        assert_eq!(Command::Delete.linewise(), Some(Command::DeleteLines));
        assert_eq!(Command::Change.linewise(), Some(Command::ChangeLines));
        assert_eq!(Command::Yank.linewise(), Some(Command::YankLines));
        assert_eq!(Command::Move.linewise(), None);
    }

    #[test]
    fn test_yank_does_not_mutate() {
        assert!(!Command::Yank.is_mutating());
        assert!(!Command::Move.is_mutating());
        assert!(Command::Delete.is_mutating());
    }
}
