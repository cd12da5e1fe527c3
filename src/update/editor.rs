//! Editor update functions for mode changes, cursor movement and the command line.

use tracing::debug;

use super::{finish_insert_session, resolve_motion, start_insert};
use crate::editable::{InsertSession, Mark, Mode, Snippet};
use crate::error::EditorError;
use crate::keymap::Command;
use crate::messages::CommandContext;
use crate::model::EditorSession;
use crate::motion::{Motion, Pattern};

/// Handle commands that move the cursor or switch modes without editing
pub(super) fn update_editor(
    session: &mut EditorSession,
    ctx: &mut CommandContext,
) -> Result<(), EditorError> {
    match ctx.command {
        // =====================================================================
        // Entering insert mode
        // =====================================================================
        Command::EnterInsert => {
            let buffer = session.active_mut()?;
            let at = buffer.cursor;
            start_insert(buffer, at, Snippet::new());
        }

        Command::Append => {
            let buffer = session.active_mut()?;
            let mut at = buffer.cursor;
            if !at.at_empty_line(&buffer.text) {
                at.column += 1;
            }
            start_insert(buffer, at, Snippet::new());
        }

        Command::InsertLineStart => {
            let buffer = session.active_mut()?;
            let line = buffer.cursor.line;
            let at = Mark::new(buffer.id(), line, buffer.text.first_non_blank(line));
            start_insert(buffer, at, Snippet::new());
        }

        Command::AppendLineEnd => {
            let buffer = session.active_mut()?;
            let line = buffer.cursor.line;
            let at = Mark::new(buffer.id(), line, buffer.text.line_len(line) - 1);
            start_insert(buffer, at, Snippet::new());
        }

        // =====================================================================
        // Other modes
        // =====================================================================
        Command::ToNormal => {
            let mode = session.active()?.mode;
            match mode {
                Mode::Insert => {
                    let buffer = session.active_mut()?;
                    finish_insert_session(buffer);
                    if !buffer.cursor.at_line_start() {
                        buffer.cursor.column -= 1;
                    }
                    buffer.set_mode(Mode::Normal);
                }
                Mode::Visual => {
                    let buffer = session.active_mut()?;
                    buffer.visual_anchor = None;
                    buffer.set_mode(Mode::Normal);
                }
                Mode::CommandLine => {
                    session.command_line.clear();
                    session.active_mut()?.set_mode(Mode::Normal);
                }
                Mode::Normal => {}
            }
        }

        Command::EnterVisual => {
            let buffer = session.active_mut()?;
            buffer.visual_anchor = Some(buffer.cursor);
            buffer.set_mode(Mode::Visual);
        }

        Command::EnterCommandLine => {
            session.command_line.clear();
            session.active_mut()?.set_mode(Mode::CommandLine);
        }

        // =====================================================================
        // Movement
        // =====================================================================
        Command::Move => {
            if let Some(motion) = resolve_motion(session, ctx) {
                move_cursor(session, &motion, ctx.count)?;
            }
        }

        Command::FindCharRight | Command::FindCharLeft => {
            let Some(ch) = ctx.ch else {
                return Ok(());
            };
            let pattern = match Pattern::literal(&ch.to_string()) {
                Ok(pattern) => pattern,
                Err(err) => {
                    ctx.status = format!("Invalid pattern: {err}");
                    return Ok(());
                }
            };
            session.last_search = Some(pattern.clone());
            let motion = if ctx.command == Command::FindCharRight {
                Motion::FindRight(pattern)
            } else {
                Motion::FindLeft(pattern)
            };
            move_cursor(session, &motion, ctx.count)?;
        }

        // =====================================================================
        // Command line
        // =====================================================================
        Command::CommandLineChar => {
            if let Some(ch) = ctx.ch {
                session.command_line.push(ch);
            }
        }

        Command::CommandLineBackspace => {
            session.command_line.backspace();
        }

        Command::CommandLineCancel => {
            session.command_line.clear();
            session.active_mut()?.set_mode(Mode::Normal);
        }

        Command::CommandLineHistoryPrev => session.command_line.history_prev(),
        Command::CommandLineHistoryNext => session.command_line.history_next(),

        Command::ForceExit => {
            session.quit = true;
        }

        Command::Noop => {}

        other => {
            debug!(target: "dispatch", "{:?} is not an editor command", other);
        }
    }
    Ok(())
}

/// Apply a motion to the cursor. In insert mode the typing session is split
/// around the move, so undo treats text on either side as separate changes.
fn move_cursor(
    session: &mut EditorSession,
    motion: &Motion,
    count: usize,
) -> Result<(), EditorError> {
    let buffer = session.active_mut()?;
    let mode = buffer.mode;
    if mode == Mode::Insert {
        finish_insert_session(buffer);
    }

    let target = motion.apply_count(buffer.cursor, &buffer.text, mode, count);
    buffer.set_cursor(target.destination());

    if mode == Mode::Insert {
        buffer.insert_session = Some(InsertSession::new(buffer.cursor));
    }
    Ok(())
}
