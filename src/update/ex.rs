//! Ex commands - lines typed after `:`
//!
//! A line is split on whitespace. The first word names the command and the
//! rest are its arguments. Each command returns the message for the status
//! line.

use std::collections::HashMap;
use std::path::Path;

use tracing::warn;

use crate::editable::{Mark, Mode, Snippet};
use crate::error::EditorError;
use crate::hooks::HookRegistry;
use crate::keymap::Command;
use crate::messages::CommandContext;
use crate::model::EditorSession;
use crate::motion::{Motion, Pattern};
use crate::storage::Storage;

/// What an ex command may touch
pub struct ExEnv<'a> {
    pub session: &'a mut EditorSession,
    pub storage: &'a dyn Storage,
    pub hooks: &'a HookRegistry,
}

/// An ex command: arguments in, status message out
pub type ExCommand = fn(&mut ExEnv<'_>, &[&str]) -> Result<String, EditorError>;

/// Ex commands by name
#[derive(Debug, Clone, Default)]
pub struct ExRegistry {
    commands: HashMap<String, ExCommand>,
}

impl ExRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry with `q`, `q!`, `w`, `wq`, `echo` and `find`
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("q", quit);
        registry.register("q!", force_quit);
        registry.register("w", write);
        registry.register("wq", write_quit);
        registry.register("echo", echo);
        registry.register("find", find);
        registry
    }

    pub fn register(&mut self, name: &str, command: ExCommand) {
        self.commands.insert(name.to_string(), command);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Run one command line
    pub fn run(&self, env: &mut ExEnv<'_>, line: &str) -> Result<String, EditorError> {
        let mut tokens = line.split_whitespace();
        let Some(name) = tokens.next() else {
            return Ok(String::new());
        };
        let args: Vec<&str> = tokens.collect();
        let Some(command) = self.commands.get(name) else {
            return Ok(format!("Unknown command: {line}"));
        };
        let status = command(env, &args)?;

        // The command may have changed the text under the cursor
        let buffer = env.session.active_mut()?;
        let cursor = buffer.cursor;
        buffer.set_cursor(cursor);
        Ok(status)
    }
}

// =============================================================================
// Built-ins
// =============================================================================

fn quit(env: &mut ExEnv<'_>, _args: &[&str]) -> Result<String, EditorError> {
    if env.session.active()?.modified {
        return Ok("No write since last change (add ! to override)".to_string());
    }
    env.session.quit = true;
    Ok("Bye-bye".to_string())
}

fn force_quit(env: &mut ExEnv<'_>, _args: &[&str]) -> Result<String, EditorError> {
    env.session.quit = true;
    Ok("Bye-bye".to_string())
}

fn write(env: &mut ExEnv<'_>, args: &[&str]) -> Result<String, EditorError> {
    if let Some(path) = args.first() {
        env.session.active_mut()?.set_path(Path::new(path));
    }
    apply_before_save(env)?;

    let storage = env.storage;
    let buffer = env.session.active_mut()?;
    match storage.save(buffer) {
        Ok(synced_at) => {
            buffer.synced_at = Some(synced_at);
            buffer.modified = false;
            // A buffer opened from a missing file was named after the error
            if let Some(path) = buffer.path.clone() {
                buffer.set_path(&path);
            }
            Ok(format!(
                "\"{}\" {}L written",
                buffer.name,
                buffer.text.line_count()
            ))
        }
        Err(err) => {
            warn!("Failed to save {}: {}", buffer.name, err);
            Ok(err.to_string())
        }
    }
}

fn write_quit(env: &mut ExEnv<'_>, args: &[&str]) -> Result<String, EditorError> {
    let status = write(env, args)?;
    if env.session.active()?.modified {
        return Ok(status);
    }
    force_quit(env, args)
}

fn echo(_env: &mut ExEnv<'_>, args: &[&str]) -> Result<String, EditorError> {
    Ok(args.join(" "))
}

/// `find <regex>`: remember the pattern for `n`/`N` and jump to the next match
fn find(env: &mut ExEnv<'_>, args: &[&str]) -> Result<String, EditorError> {
    if args.is_empty() {
        return Ok("Usage: find <pattern>".to_string());
    }
    let pattern = match Pattern::new(&args.join(" ")) {
        Ok(pattern) => pattern,
        Err(err) => return Ok(format!("Invalid pattern: {err}")),
    };
    env.session.last_search = Some(pattern.clone());

    let buffer = env.session.active_mut()?;
    let target = Motion::FindRight(pattern).apply(buffer.cursor, &buffer.text, Mode::Normal);
    buffer.set_cursor(target.destination());
    Ok(String::new())
}

/// Let the filetype rewrite the buffer before it is saved. The rewrite is
/// recorded so it can be undone.
fn apply_before_save(env: &mut ExEnv<'_>) -> Result<(), EditorError> {
    let hooks = env.hooks;
    let buffer = env.session.active_mut()?;
    let Some(lines) = hooks
        .for_extension(buffer.extension())
        .before_save(&buffer.text)
    else {
        return Ok(());
    };

    let mut ctx = CommandContext::new(Command::ReplaceLines)
        .with_count(buffer.text.line_count())
        .silent();
    ctx.point = Some(Mark::first_text_char(buffer.id()));
    ctx.text = Some(Snippet::from_lines(&lines));
    super::document::update_document(env.session, hooks, &mut ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use crate::storage::MemoryStorage;

    fn run(session: &mut EditorSession, storage: &MemoryStorage, line: &str) -> String {
        let hooks = HookRegistry::with_defaults().unwrap();
        let mut env = ExEnv {
            session,
            storage,
            hooks: &hooks,
        };
        ExRegistry::with_builtins().run(&mut env, line).unwrap()
    }

    #[test]
    fn test_echo_and_unknown() {
        let storage = MemoryStorage::new();
        let mut session = EditorSession::new(EditorConfig::default());
        assert_eq!(run(&mut session, &storage, "echo hello  world"), "hello world");
        assert_eq!(run(&mut session, &storage, "frobnicate 1"), "Unknown command: frobnicate 1");
        assert_eq!(run(&mut session, &storage, "   "), "");
    }

    #[test]
    fn test_quit_refuses_unsaved_changes() {
        let storage = MemoryStorage::new();
        let mut session = EditorSession::new(EditorConfig::default());
        session.active_mut().unwrap().modified = true;

        let status = run(&mut session, &storage, "q");
        assert!(status.starts_with("No write since last change"));
        assert!(!session.quit);

        assert_eq!(run(&mut session, &storage, "q!"), "Bye-bye");
        assert!(session.quit);
    }

    #[test]
    fn test_write_to_new_path() {
        let storage = MemoryStorage::new();
        let mut session = EditorSession::with_text(EditorConfig::default(), "one\ntwo\n");
        session.active_mut().unwrap().modified = true;

        let status = run(&mut session, &storage, "w notes.txt");
        assert_eq!(status, "\"notes.txt\" 2L written");
        assert_eq!(storage.get("notes.txt").as_deref(), Some("one\ntwo\n"));
        assert!(!session.active().unwrap().modified);
    }

    #[test]
    fn test_write_without_path_reports_error() {
        let storage = MemoryStorage::new();
        let mut session = EditorSession::new(EditorConfig::default());
        let status = run(&mut session, &storage, "w");
        assert!(!status.is_empty());
        assert!(!status.contains("written"));
    }

    #[test]
    fn test_write_go_file_trims_trailing_blanks_undoably() {
        let storage = MemoryStorage::new();
        let mut session = EditorSession::with_text(EditorConfig::default(), "a  \nb\n");
        run(&mut session, &storage, "w main.go");

        assert_eq!(storage.get("main.go").as_deref(), Some("a\nb\n"));
        let buffer = session.active().unwrap();
        assert_eq!(buffer.text.to_string(), "a\nb\n");
        assert_eq!(buffer.changes.len(), 1);
    }

    #[test]
    fn test_find_sets_last_search() {
        let storage = MemoryStorage::new();
        let mut session = EditorSession::with_text(EditorConfig::default(), "foo bar foo\n");
        assert_eq!(run(&mut session, &storage, "find fo+"), "");
        assert_eq!(session.active().unwrap().cursor.column, 8);
        assert!(session.last_search.is_some());

        let status = run(&mut session, &storage, "find (");
        assert!(status.starts_with("Invalid pattern"));
    }
}
