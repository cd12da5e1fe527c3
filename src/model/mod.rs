//! Session model - the complete state of the editor
//!
//! There are no process-wide registers: everything a command can touch lives
//! in an [`EditorSession`] owned by the dispatcher.

pub mod buffer;
pub mod command_line;

pub use buffer::Buffer;
pub use command_line::{CommandLine, HISTORY_LIMIT};

use std::path::Path;

use crate::config::EditorConfig;
use crate::editable::{BufferId, Snippet};
use crate::error::{EditorError, StorageError};
use crate::motion::Pattern;
use crate::storage::Storage;

/// The unnamed register filled by yank and delete
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Register {
    pub text: Snippet,
    /// The text is whole lines and pastes above/below the cursor line
    pub linewise: bool,
}

/// The complete editor state
#[derive(Debug)]
pub struct EditorSession {
    buffers: Vec<Buffer>,
    active: BufferId,
    next_id: usize,
    pub register: Register,
    pub command_line: CommandLine,
    /// Pattern repeated by `n` / `N`
    pub last_search: Option<Pattern>,
    /// Message shown on the status line
    pub status: String,
    pub config: EditorConfig,
    pub quit: bool,
}

impl EditorSession {
    /// A session with one empty buffer
    pub fn new(config: EditorConfig) -> Self {
        let mut session = Self {
            buffers: Vec::new(),
            active: BufferId(0),
            next_id: 0,
            register: Register::default(),
            command_line: CommandLine::new(),
            last_search: None,
            status: String::new(),
            config,
            quit: false,
        };
        let id = session.allocate_id();
        let buffer = Buffer::new(id, session.config.undo_limit);
        session.buffers.push(buffer);
        session
    }

    /// A session whose single buffer holds `content`
    pub fn with_text(config: EditorConfig, content: &str) -> Self {
        let mut session = Self::new(config);
        let id = session.active;
        let buffer = Buffer::from_text(id, content, session.config.undo_limit);
        session.buffers[0] = buffer;
        session
    }

    fn allocate_id(&mut self) -> BufferId {
        let id = BufferId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Open `path` in a new buffer and make it active.
    ///
    /// A file that cannot be read still gets a buffer: it is empty and named
    /// after the error, and keeps the path so that `:w` can create the file.
    pub fn open(&mut self, path: &Path, storage: &dyn Storage) -> BufferId {
        let id = self.allocate_id();
        let undo_limit = self.config.undo_limit;
        let buffer = match storage.open(path) {
            Ok(loaded) => {
                tracing::info!("Loaded {}", path.display());
                let mut buffer = Buffer::from_text(id, &loaded.text, undo_limit);
                buffer.set_path(path);
                buffer.synced_at = Some(loaded.synced_at);
                buffer
            }
            Err(err) => {
                if !matches!(err, StorageError::NotFound(_)) {
                    tracing::warn!("Failed to open {}: {}", path.display(), err);
                }
                let mut buffer = Buffer::new(id, undo_limit);
                buffer.path = Some(path.to_path_buf());
                buffer.name = err.to_string();
                buffer
            }
        };
        self.status = buffer.name.clone();
        self.buffers.push(buffer);
        self.active = id;
        id
    }

    pub fn active_id(&self) -> BufferId {
        self.active
    }

    pub fn buffers(&self) -> &[Buffer] {
        &self.buffers
    }

    pub fn buffer(&self, id: BufferId) -> Result<&Buffer, EditorError> {
        self.buffers
            .iter()
            .find(|b| b.id() == id)
            .ok_or(EditorError::UnknownBuffer(id))
    }

    pub fn buffer_mut(&mut self, id: BufferId) -> Result<&mut Buffer, EditorError> {
        self.buffers
            .iter_mut()
            .find(|b| b.id() == id)
            .ok_or(EditorError::UnknownBuffer(id))
    }

    pub fn active(&self) -> Result<&Buffer, EditorError> {
        self.buffer(self.active)
    }

    pub fn active_mut(&mut self) -> Result<&mut Buffer, EditorError> {
        self.buffer_mut(self.active)
    }

    /// The active buffer together with the register, for yank and delete
    pub fn active_with_register(&mut self) -> Result<(&mut Buffer, &mut Register), EditorError> {
        let active = self.active;
        let buffer = self
            .buffers
            .iter_mut()
            .find(|b| b.id() == active)
            .ok_or(EditorError::UnknownBuffer(active))?;
        Ok((buffer, &mut self.register))
    }

    /// Make another open buffer active
    pub fn switch_to(&mut self, id: BufferId) -> Result<(), EditorError> {
        self.buffer(id)?;
        self.active = id;
        Ok(())
    }
}
