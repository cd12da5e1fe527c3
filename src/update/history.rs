//! Undo. Redo lives on the dispatcher because it re-executes commands.

use super::finish_insert_session;
use crate::editable::{Region, UndoPatch};
use crate::error::EditorError;
use crate::messages::CommandContext;
use crate::model::{Buffer, EditorSession};

pub(super) fn update_undo(
    session: &mut EditorSession,
    ctx: &mut CommandContext,
) -> Result<(), EditorError> {
    let buffer = session.active_mut()?;
    finish_insert_session(buffer);

    let Some(patch) = buffer.changes.undo() else {
        ctx.status = "No more changes to undo".to_string();
        return Ok(());
    };
    apply_patch(buffer, patch)?;
    buffer.modified = true;
    ctx.status = format!(
        "undid change #{} of {}",
        buffer.changes.current() + 1,
        buffer.changes.len()
    );
    Ok(())
}

fn apply_patch(buffer: &mut Buffer, patch: UndoPatch) -> Result<(), EditorError> {
    match patch {
        UndoPatch::Text { start, end, text } => {
            if let Some(end) = end {
                buffer.text.delete_region(Region::new(start, end), false)?;
            }
            buffer.text.insert_text(start, &text)?;
            let mut cursor = start;
            // Undoing an insertion leaves the cursor before it
            if text.is_empty() && cursor.column > 0 {
                cursor.column -= 1;
            }
            buffer.set_cursor(cursor);
        }
        UndoPatch::Lines {
            first,
            removed,
            inserted,
            cursor,
        } => {
            buffer.text.replace_lines(first, inserted, removed);
            buffer.set_cursor(cursor);
        }
    }
    Ok(())
}
