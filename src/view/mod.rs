//! View module - what the dispatcher hands to the screen
//!
//! After each non-silent command the dispatcher captures a [`Frame`] from
//! the session and passes it to its [`Renderer`]. The binary uses the
//! crossterm [`TerminalRenderer`]; tests record frames instead.

pub mod terminal;

pub use terminal::TerminalRenderer;

use std::sync::{Arc, Mutex};

use crate::editable::Mode;
use crate::error::EditorError;
use crate::model::EditorSession;

/// Snapshot of everything visible on screen
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub name: String,
    /// Buffer lines without their newline
    pub lines: Vec<String>,
    /// Cursor (line, column) as char indices
    pub cursor: (usize, usize),
    pub mode: Mode,
    pub status: String,
    /// The ex command being typed, in command-line mode
    pub command_line: Option<String>,
    pub modified: bool,
}

impl Frame {
    /// Capture the active buffer of a session
    pub fn capture(session: &EditorSession) -> Result<Self, EditorError> {
        let buffer = session.active()?;
        let text = &buffer.text;
        Ok(Self {
            name: buffer.name.clone(),
            lines: (0..text.line_count()).map(|i| text.line_text(i)).collect(),
            cursor: (buffer.cursor.line, buffer.cursor.column),
            mode: buffer.mode,
            status: session.status.clone(),
            command_line: (buffer.mode == Mode::CommandLine)
                .then(|| session.command_line.text().to_string()),
            modified: buffer.modified,
        })
    }

    /// Status line text: mode, name, modified marker and message
    pub fn status_line(&self) -> String {
        let name = if self.name.is_empty() {
            "[No Name]"
        } else {
            &self.name
        };
        let modified = if self.modified { " [+]" } else { "" };
        format!(
            "{} | {}{} | {}:{} | {}",
            self.mode.label(),
            name,
            modified,
            self.cursor.0 + 1,
            self.cursor.1 + 1,
            self.status
        )
    }
}

/// Draws frames. Only the dispatcher calls it.
pub trait Renderer: Send {
    fn render(&mut self, frame: &Frame) -> std::io::Result<()>;
}

/// Renderer that draws nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _frame: &Frame) -> std::io::Result<()> {
        Ok(())
    }
}

/// Renderer that keeps every frame, shared between clones
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    frames: Arc<Mutex<Vec<Frame>>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> Vec<Frame> {
        self.frames.lock().map(|f| f.clone()).unwrap_or_default()
    }

    pub fn last(&self) -> Option<Frame> {
        self.frames.lock().ok()?.last().cloned()
    }

    pub fn count(&self) -> usize {
        self.frames.lock().map(|f| f.len()).unwrap_or(0)
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, frame: &Frame) -> std::io::Result<()> {
        if let Ok(mut frames) = self.frames.lock() {
            frames.push(frame.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;

    #[test]
    fn test_capture_active_buffer() {
        let mut session = EditorSession::with_text(EditorConfig::default(), "one\ntwo\n");
        session.status = "hello".to_string();
        let frame = Frame::capture(&session).unwrap();
        assert_eq!(frame.lines, vec!["one", "two"]);
        assert_eq!(frame.cursor, (0, 0));
        assert_eq!(frame.command_line, None);
        assert_eq!(frame.status_line(), "NORMAL | [No Name] | 1:1 | hello");
    }

    #[test]
    fn test_recording_renderer_shares_frames() {
        let recorder = RecordingRenderer::new();
        let mut boxed: Box<dyn Renderer> = Box::new(recorder.clone());
        let session = EditorSession::new(EditorConfig::default());
        let frame = Frame::capture(&session).unwrap();
        boxed.render(&frame).unwrap();
        assert_eq!(recorder.count(), 1);
        assert_eq!(recorder.last(), Some(frame));
    }
}
