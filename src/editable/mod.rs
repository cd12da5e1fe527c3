//! Text storage and position arithmetic for the editor.
//!
//! This module holds the pieces every command is built from:
//!
//! - [`TextModel`]: line storage for one buffer, every line ending in `'\n'`
//! - [`Snippet`]: a multi-line text payload (registers, undo patches, paste)
//! - [`Mark`]: a `(buffer, line, column)` position with navigation arithmetic
//! - [`Region`]: an unordered pair of marks
//! - [`ChangeList`] / [`InsertSession`]: per-buffer undo history
//!
//! # Example
//!
//! ```
//! use quill::editable::{BufferId, Mark, Mode, TextModel};
//!
//! let id = BufferId(0);
//! let mut text = TextModel::from_text(id, "hello\n");
//! let mut mark = Mark::new(id, 0, 0);
//!
//! mark.move_right(&text, Mode::Normal, 2);
//! text.insert_char(mark, 'X').unwrap();
//!
//! assert_eq!(text.to_string(), "heXllo\n");
//! ```

mod buffer;
mod cursor;
mod history;
mod selection;
mod snippet;

pub use buffer::{Line, TextModel, NEWLINE};
pub use cursor::{BufferId, Mark};
pub use history::{Change, ChangeList, InsertSession, UndoPatch, DEFAULT_UNDO_LIMIT};
pub use selection::Region;
pub use snippet::Snippet;

/// Editing mode of a buffer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    Insert,
    #[default]
    Normal,
    /// Typing an ex command on the command line
    CommandLine,
    Visual,
}

impl Mode {
    /// Whether the cursor may rest on a line's newline sentinel
    pub fn allows_sentinel(self) -> bool {
        matches!(self, Mode::Insert)
    }

    /// Short label for the status line
    pub fn label(self) -> &'static str {
        match self {
            Mode::Insert => "INSERT",
            Mode::Normal => "NORMAL",
            Mode::CommandLine => "COMMAND",
            Mode::Visual => "VISUAL",
        }
    }
}
