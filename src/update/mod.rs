//! Update functions - the dispatcher and its command handlers
//!
//! Every state transformation flows through [`Dispatcher::dispatch`]. It owns
//! the session, executes one [`CommandContext`] at a time and renders a frame
//! after each non-silent command. The handlers are plain functions over the
//! session, split by concern:
//! - `editor`: mode changes, cursor movement, the command line
//! - `document`: everything that changes the text
//! - `history`: undo
//! - `ex`: commands typed after `:`

mod document;
mod editor;
pub mod ex;
mod history;

pub use ex::{ExCommand, ExEnv, ExRegistry};

use tracing::{debug, warn};

use crate::editable::{InsertSession, Mark, Mode, Snippet, UndoPatch};
use crate::error::EditorError;
use crate::hooks::HookRegistry;
use crate::keymap::Command;
use crate::messages::{CommandContext, Completion};
use crate::model::{Buffer, EditorSession};
use crate::motion::Motion;
use crate::storage::Storage;
use crate::view::{Frame, Renderer};

/// Status shown when `n`/`N` has nothing to repeat
pub const NO_PREVIOUS_PATTERN: &str = "No previous search pattern";

/// Executes commands against the session it owns
pub struct Dispatcher {
    session: EditorSession,
    renderer: Box<dyn Renderer>,
    storage: Box<dyn Storage>,
    hooks: HookRegistry,
    ex: ExRegistry,
}

impl Dispatcher {
    pub fn new(
        session: EditorSession,
        renderer: Box<dyn Renderer>,
        storage: Box<dyn Storage>,
        hooks: HookRegistry,
    ) -> Self {
        Self {
            session,
            renderer,
            storage,
            hooks,
            ex: ExRegistry::with_builtins(),
        }
    }

    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    /// Register an extra ex command
    pub fn register_ex(&mut self, name: &str, command: ExCommand) {
        self.ex.register(name, command);
    }

    /// Mode of the active buffer
    pub fn mode(&self) -> Mode {
        self.session.active().map(|b| b.mode).unwrap_or_default()
    }

    /// Draw the current state
    pub fn render(&mut self) {
        match Frame::capture(&self.session) {
            Ok(frame) => {
                if let Err(err) = self.renderer.render(&frame) {
                    warn!(target: "dispatch", "Render failed: {}", err);
                }
            }
            Err(err) => warn!(target: "dispatch", "Nothing to render: {}", err),
        }
    }

    /// Execute one command and report the resulting mode
    pub fn dispatch(&mut self, mut ctx: CommandContext) -> Result<Completion, EditorError> {
        debug!(
            target: "dispatch",
            command = ?ctx.command,
            count = ctx.count,
            keys = %ctx.keys,
            mutating = ctx.command.is_mutating(),
            "Dispatch"
        );

        if !ctx.silent {
            self.session.status.clear();
        }
        {
            let buffer = self.session.active()?;
            let point = ctx.point.unwrap_or(buffer.cursor);
            buffer.text.check(point)?;
            ctx.point = Some(point);
        }

        self.execute(&mut ctx)?;

        if !ctx.status.is_empty() {
            self.session.status = std::mem::take(&mut ctx.status);
        }
        if !ctx.silent {
            self.render();
        }

        Ok(Completion {
            mode: self.mode(),
            status: self.session.status.clone(),
            quit: self.session.quit,
        })
    }

    fn execute(&mut self, ctx: &mut CommandContext) -> Result<(), EditorError> {
        match ctx.command {
            Command::Redo => self.redo(ctx),
            Command::CommandLineCommit => {
                let line = self.session.command_line.commit();
                self.session.active_mut()?.set_mode(Mode::Normal);
                ctx.argument = line;
                let mut env = ExEnv {
                    session: &mut self.session,
                    storage: self.storage.as_ref(),
                    hooks: &self.hooks,
                };
                ctx.status = self.ex.run(&mut env, &ctx.argument)?;
                Ok(())
            }
            Command::Undo => history::update_undo(&mut self.session, ctx),
            Command::Yank | Command::YankLines | Command::YankSelection => {
                document::update_document(&mut self.session, &self.hooks, ctx)
            }
            command if command.is_mutating() => {
                document::update_document(&mut self.session, &self.hooks, ctx)
            }
            _ => editor::update_editor(&mut self.session, ctx),
        }
    }

    /// Re-execute the next change in history without recording it again
    fn redo(&mut self, ctx: &mut CommandContext) -> Result<(), EditorError> {
        let Some(mut replay) = self.session.active_mut()?.changes.redo() else {
            ctx.status = "Already at latest change".to_string();
            return Ok(());
        };
        replay.replay = true;
        replay.silent = true;
        replay.status.clear();
        self.execute(&mut replay)?;

        let buffer = self.session.active_mut()?;
        buffer.modified = true;
        ctx.status = format!(
            "redid change #{} of {}",
            buffer.changes.current(),
            buffer.changes.len()
        );
        Ok(())
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("session", &self.session)
            .field("hooks", &self.hooks)
            .finish()
    }
}

// =============================================================================
// Shared helpers
// =============================================================================

/// The mark a command acts on, validated against the text
fn point_of(buffer: &Buffer, ctx: &CommandContext) -> Result<Mark, EditorError> {
    let point = ctx.point.unwrap_or(buffer.cursor);
    buffer.text.check(point)?;
    Ok(point)
}

/// Record a change unless the command is being replayed from history
fn record(buffer: &mut Buffer, ctx: &CommandContext, undo: UndoPatch) {
    buffer.modified = true;
    if ctx.replay {
        return;
    }
    let mut redo = ctx.clone();
    redo.status.clear();
    redo.silent = true;
    buffer.changes.record(redo, undo);
}

/// Close the open insert session, recording what it typed as one change
fn finish_insert_session(buffer: &mut Buffer) {
    if let Some(session) = buffer.insert_session.take() {
        if let Some((redo, undo)) = session.into_change() {
            buffer.changes.record(redo, undo);
            buffer.modified = true;
        }
    }
}

/// Enter insert mode at `at` with a fresh session. `replaced` is text the
/// command removed just before (`c`), so both undo as one change.
fn start_insert(buffer: &mut Buffer, at: Mark, replaced: Snippet) {
    buffer.visual_anchor = None;
    buffer.set_mode(Mode::Insert);
    buffer.set_cursor(at);
    let mut session = InsertSession::new(buffer.cursor);
    session.old_text = replaced;
    buffer.insert_session = Some(session);
}

/// The context's motion with `n`/`N` resolved against the last search.
/// Sets the status and returns `None` when there is no pattern to repeat.
fn resolve_motion(session: &EditorSession, ctx: &mut CommandContext) -> Option<Motion> {
    let motion = ctx.motion.clone()?;
    let resolved = motion.resolve(session.last_search.as_ref());
    if resolved.is_none() {
        ctx.status = NO_PREVIOUS_PATTERN.to_string();
    }
    resolved
}
