//! Buffer model - one text plus its cursor, history and file state

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::editable::{BufferId, ChangeList, InsertSession, Mark, Mode, Region, TextModel};

/// Buffer state - the text and everything that travels with it
#[derive(Debug, Clone)]
pub struct Buffer {
    pub text: TextModel,
    pub mode: Mode,
    pub cursor: Mark,
    /// Where visual mode was entered
    pub visual_anchor: Option<Mark>,
    pub changes: ChangeList,
    /// Open while in insert mode
    pub insert_session: Option<InsertSession>,

    // === File ===
    /// Display name (the file name, or an error message if loading failed)
    pub name: String,
    /// Path to the file on disk (None for new/unsaved buffers)
    pub path: Option<PathBuf>,
    /// When the buffer was last loaded from or written to disk
    pub synced_at: Option<SystemTime>,
    /// Whether the buffer has unsaved changes
    pub modified: bool,
}

impl Buffer {
    /// Create an empty, unnamed buffer
    pub fn new(id: BufferId, undo_limit: usize) -> Self {
        Self::with_text(TextModel::new(id), undo_limit)
    }

    /// Create a buffer holding `content`
    pub fn from_text(id: BufferId, content: &str, undo_limit: usize) -> Self {
        Self::with_text(TextModel::from_text(id, content), undo_limit)
    }

    fn with_text(text: TextModel, undo_limit: usize) -> Self {
        let cursor = Mark::first_text_char(text.id());
        Self {
            text,
            mode: Mode::Normal,
            cursor,
            visual_anchor: None,
            changes: ChangeList::with_limit(undo_limit),
            insert_session: None,
            name: String::new(),
            path: None,
            synced_at: None,
            modified: false,
        }
    }

    pub fn id(&self) -> BufferId {
        self.text.id()
    }

    /// Attach a file path, naming the buffer after it
    pub fn set_path(&mut self, path: &Path) {
        self.name = path.display().to_string();
        self.path = Some(path.to_path_buf());
    }

    /// File extension used to pick filetype hooks
    pub fn extension(&self) -> Option<&str> {
        self.path
            .as_deref()
            .and_then(|p| p.extension())
            .and_then(|e| e.to_str())
    }

    /// Move the cursor, clamping it to the text for the current mode
    pub fn set_cursor(&mut self, mut mark: Mark) {
        mark.fix_line_and_position(&self.text, self.mode);
        self.cursor = mark;
    }

    /// Switch mode and re-clamp the cursor (leaving insert mode pulls it off
    /// the newline sentinel)
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        let cursor = self.cursor;
        self.set_cursor(cursor);
    }

    /// The visual selection, from anchor to cursor
    pub fn selection(&self) -> Option<Region> {
        self.visual_anchor
            .filter(|_| self.mode == Mode::Visual)
            .map(|anchor| Region::new(anchor, self.cursor))
    }
}
