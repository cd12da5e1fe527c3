//! Document update functions - every command that changes the text
//!
//! Each handler records one change for the command it executed. Typing in
//! insert mode is recorded when its session closes. Replays from history run
//! through the same handlers with `ctx.replay` set.

use tracing::debug;

use super::{finish_insert_session, point_of, record, resolve_motion, start_insert};
use crate::editable::{
    InsertSession, Line, Mark, Mode, Region, Snippet, TextModel, UndoPatch, NEWLINE,
};
use crate::error::EditorError;
use crate::hooks::{FiletypeHooks, HookRegistry};
use crate::keymap::Command;
use crate::messages::CommandContext;
use crate::model::{Buffer, EditorSession, Register};
use crate::motion::{Motion, Target};
use crate::util::text::{
    big_word_class, char_class, char_col_to_visual_col, indent_string, indent_width, CharClass,
};

/// Handle commands that edit the active buffer (and yanks, which share the
/// operator plumbing)
pub(super) fn update_document(
    session: &mut EditorSession,
    hooks: &HookRegistry,
    ctx: &mut CommandContext,
) -> Result<(), EditorError> {
    let mode = session.active()?.mode;
    match ctx.command {
        // === Insert mode ===
        Command::InsertChar => insert_char(session, hooks, ctx),
        Command::InsertNewline => insert_newline(session, hooks),
        Command::InsertTab => insert_tab(session),
        Command::DeleteCharBefore if mode == Mode::Insert => backspace(session),
        Command::DeleteCharAfter if mode == Mode::Insert => delete_forward(session),
        Command::OpenBelow => open_line(session, hooks, false),
        Command::OpenAbove => open_line(session, hooks, true),

        // === Normal mode ===
        Command::DeleteCharBefore => delete_chars_before(session, ctx),
        Command::DeleteCharAfter => delete_chars_after(session, ctx),
        Command::Delete | Command::Change | Command::Yank => operator(session, ctx),
        Command::DeleteLines | Command::ChangeLines | Command::YankLines => {
            let (buffer, register) = session.active_with_register()?;
            let first = point_of(buffer, ctx)?.line;
            let last = first
                .saturating_add(ctx.count.saturating_sub(1))
                .min(buffer.text.last_line());
            lines_operator(buffer, register, ctx, first, last)
        }
        Command::PasteAfter => paste(session, ctx, false),
        Command::PasteBefore => paste(session, ctx, true),
        Command::ReplaceChar => replace_char(session, ctx),
        Command::JoinLines => join_lines(session, ctx),

        // === Visual mode ===
        Command::DeleteSelection | Command::ChangeSelection | Command::YankSelection => {
            selection_operator(session, ctx)
        }

        // === History replays ===
        Command::ReplaceRegion => replace_region(session, ctx),
        Command::ReplaceLines => replace_lines(session, ctx),

        other => {
            debug!(target: "dispatch", "{:?} is not a document command", other);
            Ok(())
        }
    }
}

// =============================================================================
// Insert mode
// =============================================================================

fn insert_char(
    session: &mut EditorSession,
    hooks: &HookRegistry,
    ctx: &CommandContext,
) -> Result<(), EditorError> {
    let Some(ch) = ctx.ch else {
        return Ok(());
    };
    let (tab_stop, expand_tab) = (session.config.tab_stop, session.config.expand_tab);
    let buffer = session.active_mut()?;
    let Some(typing) = buffer.insert_session.as_mut() else {
        return Ok(());
    };

    buffer.text.insert_char(buffer.cursor, ch)?;
    typing.push(ch);
    buffer.cursor.column += 1;
    buffer.modified = true;

    let filetype = hooks.for_extension(buffer.extension());
    if filetype.trigger_chars().contains(&ch) {
        reindent_line(buffer, filetype, tab_stop, expand_tab)?;
    }
    Ok(())
}

fn insert_newline(session: &mut EditorSession, hooks: &HookRegistry) -> Result<(), EditorError> {
    let (tab_stop, expand_tab) = (session.config.tab_stop, session.config.expand_tab);
    let buffer = session.active_mut()?;
    let Some(typing) = buffer.insert_session.as_mut() else {
        return Ok(());
    };

    buffer.text.insert_newline(buffer.cursor)?;
    typing.push(NEWLINE);
    buffer.cursor = Mark::new(buffer.cursor.buffer, buffer.cursor.line + 1, 0);
    buffer.modified = true;

    let filetype = hooks.for_extension(buffer.extension());
    auto_indent(buffer, filetype, tab_stop, expand_tab)
}

fn insert_tab(session: &mut EditorSession) -> Result<(), EditorError> {
    let tab_stop = session.config.tab_stop.max(1);
    let expand_tab = session.config.expand_tab;
    let buffer = session.active_mut()?;
    let Some(typing) = buffer.insert_session.as_mut() else {
        return Ok(());
    };

    let chars = if expand_tab {
        let line = buffer.text.line(buffer.cursor.line).unwrap_or_default();
        let visual = char_col_to_visual_col(line, buffer.cursor.column, tab_stop);
        vec![' '; tab_stop - visual % tab_stop]
    } else {
        vec!['\t']
    };
    for ch in chars {
        buffer.text.insert_char(buffer.cursor, ch)?;
        typing.push(ch);
        buffer.cursor.column += 1;
    }
    buffer.modified = true;
    Ok(())
}

fn backspace(session: &mut EditorSession) -> Result<(), EditorError> {
    let buffer = session.active_mut()?;
    let Some(typing) = buffer.insert_session.as_mut() else {
        return Ok(());
    };
    let (mark, removed) = buffer.text.delete_char_before(buffer.cursor)?;
    if let Some(ch) = removed {
        typing.backspace(ch, mark);
        buffer.modified = true;
    }
    buffer.cursor = mark;
    Ok(())
}

fn delete_forward(session: &mut EditorSession) -> Result<(), EditorError> {
    let buffer = session.active_mut()?;
    let Some(typing) = buffer.insert_session.as_mut() else {
        return Ok(());
    };
    if let Some(ch) = buffer.text.delete_char_after(buffer.cursor)? {
        typing.delete_forward(ch);
        buffer.modified = true;
    }
    Ok(())
}

/// `o` / `O`: open a line and start typing on it
fn open_line(
    session: &mut EditorSession,
    hooks: &HookRegistry,
    above: bool,
) -> Result<(), EditorError> {
    let (tab_stop, expand_tab) = (session.config.tab_stop, session.config.expand_tab);
    let buffer = session.active_mut()?;
    finish_insert_session(buffer);
    let id = buffer.id();
    let line = buffer.cursor.line;
    buffer.visual_anchor = None;
    buffer.set_mode(Mode::Insert);

    let typing = if above && line == 0 {
        // Nothing above to split: the new line break trails the cursor
        let start = Mark::new(id, 0, 0);
        buffer.text.insert_newline(start)?;
        buffer.cursor = start;
        let mut typing = InsertSession::new(start);
        typing.suffix = Snippet::from("\n");
        typing
    } else {
        let split_line = if above { line - 1 } else { line };
        let at = Mark::new(id, split_line, buffer.text.line_len(split_line) - 1);
        buffer.text.insert_newline(at)?;
        buffer.cursor = Mark::new(id, split_line + 1, 0);
        let mut typing = InsertSession::new(at);
        typing.push(NEWLINE);
        typing
    };
    buffer.insert_session = Some(typing);
    buffer.modified = true;

    let filetype = hooks.for_extension(buffer.extension());
    auto_indent(buffer, filetype, tab_stop, expand_tab)
}

/// Type the indentation the filetype wants on the cursor's (new) line
fn auto_indent(
    buffer: &mut Buffer,
    filetype: &dyn FiletypeHooks,
    tab_stop: usize,
    expand_tab: bool,
) -> Result<(), EditorError> {
    let width = filetype.indent(&buffer.text, buffer.cursor.line, tab_stop);
    if width == 0 {
        return Ok(());
    }
    let Some(typing) = buffer.insert_session.as_mut() else {
        return Ok(());
    };
    for ch in indent_string(width, tab_stop, expand_tab) {
        buffer.text.insert_char(buffer.cursor, ch)?;
        typing.push(ch);
        buffer.cursor.column += 1;
    }
    Ok(())
}

/// Re-indent the cursor's line after a trigger character.
///
/// The rewrite is its own change between two typing sessions.
fn reindent_line(
    buffer: &mut Buffer,
    filetype: &dyn FiletypeHooks,
    tab_stop: usize,
    expand_tab: bool,
) -> Result<(), EditorError> {
    let line = buffer.cursor.line;
    let Some(chars) = buffer.text.line(line) else {
        return Ok(());
    };
    let width = filetype.indent(&buffer.text, line, tab_stop);
    if width == indent_width(chars, tab_stop) {
        return Ok(());
    }
    let old_len = chars.iter().take_while(|&&c| c == ' ' || c == '\t').count();
    let mut replacement = indent_string(width, tab_stop, expand_tab);
    let new_len = replacement.len();
    replacement.extend_from_slice(&chars[old_len..]);

    finish_insert_session(buffer);
    let cursor = buffer.cursor;
    let removed = buffer.text.replace_lines(line, 1, vec![replacement.clone()]);

    let mut redo = CommandContext::new(Command::ReplaceLines);
    redo.point = Some(Mark::new(cursor.buffer, line, 0));
    redo.text = Some(Snippet::from_chars(replacement));
    redo.silent = true;
    buffer.changes.record(
        redo,
        UndoPatch::Lines {
            first: line,
            removed,
            inserted: 1,
            cursor,
        },
    );
    buffer.modified = true;

    buffer.cursor.column = (cursor.column + new_len).saturating_sub(old_len);
    buffer.insert_session = Some(InsertSession::new(buffer.cursor));
    Ok(())
}

// =============================================================================
// Normal mode character edits
// =============================================================================

/// `X`: delete up to `count` characters before the cursor on its line
fn delete_chars_before(
    session: &mut EditorSession,
    ctx: &CommandContext,
) -> Result<(), EditorError> {
    let (buffer, register) = session.active_with_register()?;
    let point = point_of(buffer, ctx)?;
    let n = ctx.count.min(point.column);
    if n == 0 {
        return Ok(());
    }
    let from = Mark::new(point.buffer, point.line, point.column - n);
    let (start, removed) = buffer.text.delete_region(Region::new(from, point), false)?;
    *register = Register {
        text: removed.clone(),
        linewise: false,
    };
    buffer.set_cursor(start);
    record(
        buffer,
        ctx,
        UndoPatch::Text {
            start,
            end: None,
            text: removed,
        },
    );
    Ok(())
}

/// `x`: delete up to `count` characters from the cursor to line end
fn delete_chars_after(
    session: &mut EditorSession,
    ctx: &CommandContext,
) -> Result<(), EditorError> {
    let (buffer, register) = session.active_with_register()?;
    let point = point_of(buffer, ctx)?;
    let Some(last) = point.last_char_column(&buffer.text) else {
        return Ok(());
    };
    if point.column > last {
        return Ok(());
    }
    let n = ctx.count.min(last - point.column + 1);
    let to = Mark::new(point.buffer, point.line, point.column + n);
    let (start, removed) = buffer.text.delete_region(Region::new(point, to), false)?;
    *register = Register {
        text: removed.clone(),
        linewise: false,
    };
    buffer.set_cursor(start);
    record(
        buffer,
        ctx,
        UndoPatch::Text {
            start,
            end: None,
            text: removed,
        },
    );
    Ok(())
}

/// `r{char}`: overwrite `count` characters
fn replace_char(session: &mut EditorSession, ctx: &CommandContext) -> Result<(), EditorError> {
    let Some(ch) = ctx.ch else {
        return Ok(());
    };
    let buffer = session.active_mut()?;
    let point = point_of(buffer, ctx)?;
    let Some(last) = point.last_char_column(&buffer.text) else {
        return Ok(());
    };
    let end = point.column.saturating_add(ctx.count.saturating_sub(1));
    if end > last {
        return Ok(());
    }

    let removed = buffer.text.copy_lines(point.line, point.line);
    let Some(mut line) = removed.first().cloned() else {
        return Ok(());
    };
    line[point.column..=end].fill(ch);
    buffer.text.replace_lines(point.line, 1, vec![line]);
    buffer.set_cursor(Mark::new(point.buffer, point.line, end));
    record(
        buffer,
        ctx,
        UndoPatch::Lines {
            first: point.line,
            removed,
            inserted: 1,
            cursor: point,
        },
    );
    Ok(())
}

/// `J`: join `count - 1` lines (at least one) onto the cursor line
fn join_lines(session: &mut EditorSession, ctx: &CommandContext) -> Result<(), EditorError> {
    let buffer = session.active_mut()?;
    let point = point_of(buffer, ctx)?;
    let first = point.line;
    if first >= buffer.text.last_line() {
        return Ok(());
    }
    let last = first
        .saturating_add(ctx.count.saturating_sub(1).max(1))
        .min(buffer.text.last_line());
    let removed = buffer.text.copy_lines(first, last);

    let mut joined: Line = removed[0][..removed[0].len() - 1].to_vec();
    let mut cursor_column = 0;
    for line in &removed[1..] {
        let content: Vec<char> = line[..line.len() - 1]
            .iter()
            .copied()
            .skip_while(|&c| c == ' ' || c == '\t')
            .collect();
        cursor_column = joined.len();
        let needs_space = !content.is_empty()
            && !joined.is_empty()
            && !matches!(joined.last(), Some(' ' | '\t'))
            && content[0] != ')';
        if needs_space {
            joined.push(' ');
        }
        joined.extend(content);
    }
    joined.push(NEWLINE);

    buffer.text.replace_lines(first, removed.len(), vec![joined]);
    buffer.set_cursor(Mark::new(point.buffer, first, cursor_column));
    record(
        buffer,
        ctx,
        UndoPatch::Lines {
            first,
            removed,
            inserted: 1,
            cursor: point,
        },
    );
    Ok(())
}

// =============================================================================
// Operators
// =============================================================================

/// `d`, `c` or `y` followed by a motion
fn operator(session: &mut EditorSession, ctx: &mut CommandContext) -> Result<(), EditorError> {
    let Some(motion) = resolve_motion(session, ctx) else {
        return Ok(());
    };
    let (buffer, register) = session.active_with_register()?;
    let point = point_of(buffer, ctx)?;

    let target = if ctx.command == Command::Change {
        change_target(&motion, point, &buffer.text, ctx.count)
    } else {
        motion.apply_count(point, &buffer.text, Mode::Normal, ctx.count)
    };
    if target.linewise {
        let (first, last) = target.region.line_span();
        return lines_operator(buffer, register, ctx, first, last);
    }

    let (from, to) = target.region.ordered();
    let end = if target.inclusive {
        buffer.text.position_after(to)
    } else {
        to
    };
    span_operator(buffer, register, ctx, from, end)
}

/// `cw` on a non-blank acts like `ce`, and a one-character word changes
/// just that character
fn change_target(motion: &Motion, point: Mark, text: &TextModel, count: usize) -> Target {
    let (classify, end_motion): (fn(char) -> CharClass, Motion) = match motion {
        Motion::NextWordStart => (char_class, Motion::WordEnd),
        Motion::NextBigWordStart => (big_word_class, Motion::BigWordEnd),
        _ => return motion.apply_count(point, text, Mode::Normal, count),
    };
    let under = point.char_at(text).filter(|&c| c != NEWLINE);
    let Some(class) = under.map(classify).filter(|&c| c != CharClass::Space) else {
        return motion.apply_count(point, text, Mode::Normal, count);
    };

    let next_class = text
        .char_at(point.line, point.column + 1)
        .filter(|&c| c != NEWLINE)
        .map(classify);
    let remaining = if next_class == Some(class) {
        count
    } else {
        count - 1
    };
    if remaining == 0 {
        return Target {
            region: Region::collapsed(point),
            inclusive: true,
            linewise: false,
        };
    }
    end_motion.apply_count(point, text, Mode::Normal, remaining)
}

/// Apply an operator to the characters in `[from, end)`
fn span_operator(
    buffer: &mut Buffer,
    register: &mut Register,
    ctx: &CommandContext,
    from: Mark,
    end: Mark,
) -> Result<(), EditorError> {
    if matches!(ctx.command, Command::Yank | Command::YankSelection) {
        if from != end {
            *register = Register {
                text: buffer.text.copy_region(from, end)?,
                linewise: false,
            };
        }
        buffer.set_cursor(from);
        return Ok(());
    }

    let (start, removed) = if from == end {
        (from, Snippet::new())
    } else {
        buffer.text.delete_region(Region::new(from, end), false)?
    };
    if !removed.is_empty() {
        *register = Register {
            text: removed.clone(),
            linewise: false,
        };
    }

    if matches!(ctx.command, Command::Change | Command::ChangeSelection) {
        start_insert(buffer, start, removed);
        return Ok(());
    }
    if removed.is_empty() {
        return Ok(());
    }
    buffer.set_cursor(start);
    record(
        buffer,
        ctx,
        UndoPatch::Text {
            start,
            end: None,
            text: removed,
        },
    );
    Ok(())
}

/// Apply an operator to whole lines `first..=last`
fn lines_operator(
    buffer: &mut Buffer,
    register: &mut Register,
    ctx: &CommandContext,
    first: usize,
    last: usize,
) -> Result<(), EditorError> {
    let point = point_of(buffer, ctx)?;
    let id = buffer.id();
    let lines = buffer.text.copy_lines(first, last);
    *register = Register {
        text: Snippet::from_lines(&lines),
        linewise: true,
    };

    match ctx.command {
        Command::Yank | Command::YankLines => {
            buffer.set_cursor(Mark::new(id, first, point.column));
        }
        Command::Change | Command::ChangeLines => {
            let start = Mark::new(id, first, buffer.text.first_non_blank(first));
            let end = Mark::new(id, last, buffer.text.line_len(last) - 1);
            let (start, removed) = if start.is_before(&end) {
                buffer.text.delete_region(Region::new(start, end), false)?
            } else {
                (start, Snippet::new())
            };
            start_insert(buffer, start, removed);
        }
        _ => {
            let line_count = buffer.text.line_count();
            buffer
                .text
                .delete_lines(Mark::new(id, first, 0), Mark::new(id, last, 0))?;
            let inserted = usize::from(lines.len() == line_count);
            let line = first.min(buffer.text.last_line());
            buffer.set_cursor(Mark::new(id, line, buffer.text.first_non_blank(line)));
            record(
                buffer,
                ctx,
                UndoPatch::Lines {
                    first,
                    removed: lines,
                    inserted,
                    cursor: point,
                },
            );
        }
    }
    Ok(())
}

/// `d`, `c` or `y` on the visual selection (or the region of a replay)
fn selection_operator(
    session: &mut EditorSession,
    ctx: &mut CommandContext,
) -> Result<(), EditorError> {
    let (buffer, register) = session.active_with_register()?;
    let Some(region) = ctx.region.or_else(|| buffer.selection()) else {
        return Ok(());
    };
    ctx.region = Some(region);
    let (from, to) = region.ordered();
    buffer.text.check(from)?;
    buffer.text.check(to)?;
    let end = buffer.text.position_after(to);

    buffer.visual_anchor = None;
    buffer.set_mode(Mode::Normal);
    span_operator(buffer, register, ctx, from, end)
}

// =============================================================================
// Paste
// =============================================================================

/// `p` / `P`. The payload is stored in the context so a redo pastes the same
/// text whatever the register holds by then.
fn paste(
    session: &mut EditorSession,
    ctx: &mut CommandContext,
    before: bool,
) -> Result<(), EditorError> {
    let (buffer, register) = session.active_with_register()?;
    let (payload, linewise) = match &ctx.text {
        Some(text) => (text.clone(), ctx.linewise),
        None => (register.text.clone(), register.linewise),
    };
    if payload.is_empty() {
        return Ok(());
    }
    ctx.text = Some(payload.clone());
    ctx.linewise = linewise;

    let point = point_of(buffer, ctx)?;
    let payload = payload.repeated(ctx.count);

    if linewise {
        let first = if before { point.line } else { point.line + 1 };
        let untouched = buffer.text.line_count();
        buffer.text.replace_lines(first, 0, payload.lines());
        let inserted = buffer.text.line_count() - untouched;
        buffer.set_cursor(Mark::new(point.buffer, first, buffer.text.first_non_blank(first)));
        record(
            buffer,
            ctx,
            UndoPatch::Lines {
                first,
                removed: Vec::new(),
                inserted,
                cursor: point,
            },
        );
        return Ok(());
    }

    let at = if before || point.at_empty_line(&buffer.text) {
        point
    } else {
        Mark::new(point.buffer, point.line, point.column + 1)
    };
    let end = buffer.text.insert_text(at, &payload)?;
    let mut cursor = end;
    cursor.move_left(&buffer.text, Mode::Insert, 1);
    buffer.set_cursor(cursor);
    record(
        buffer,
        ctx,
        UndoPatch::Text {
            start: at,
            end: Some(end),
            text: Snippet::new(),
        },
    );
    Ok(())
}

// =============================================================================
// History replays
// =============================================================================

/// Replace a region with the context's text
fn replace_region(session: &mut EditorSession, ctx: &CommandContext) -> Result<(), EditorError> {
    let (Some(region), Some(text)) = (ctx.region, ctx.text.as_ref()) else {
        return Ok(());
    };
    let buffer = session.active_mut()?;
    let (start, removed) = buffer.text.delete_region(region, false)?;
    let end = buffer.text.insert_text(start, text)?;

    let mut cursor = end;
    if cursor.column > 0 {
        cursor.column -= 1;
    }
    buffer.set_cursor(cursor);
    record(
        buffer,
        ctx,
        UndoPatch::Text {
            start,
            end: (!text.is_empty()).then_some(end),
            text: removed,
        },
    );
    Ok(())
}

/// Replace `ctx.count` lines from the point's line with the context's text
fn replace_lines(session: &mut EditorSession, ctx: &CommandContext) -> Result<(), EditorError> {
    let Some(text) = ctx.text.as_ref() else {
        return Ok(());
    };
    let buffer = session.active_mut()?;
    let point = point_of(buffer, ctx)?;
    let cursor = buffer.cursor;
    let before = buffer.text.line_count();

    let removed = buffer
        .text
        .replace_lines(point.line, ctx.count, text.lines());
    let inserted = buffer.text.line_count() + removed.len() - before;
    buffer.set_cursor(cursor);
    record(
        buffer,
        ctx,
        UndoPatch::Lines {
            first: point.line,
            removed,
            inserted,
            cursor,
        },
    );
    Ok(())
}
