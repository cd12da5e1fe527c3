//! Command-line tests - ex commands, saving, filetype hooks and search

mod common;

use common::{editor, file_editor};
use quill::editable::Mode;
use quill::keymap::{KeyCode, Keystroke};
use quill::storage::MemoryStorage;
use quill::error::EditorError;
use quill::update::{ExEnv, NO_PREVIOUS_PATTERN};

// ========================================================================
// Command line editing
// ========================================================================

#[test]
fn test_colon_enters_command_line() {
    let mut editor = editor("abc\n");
    editor.keys(":ec").unwrap();
    assert_eq!(editor.mode(), Mode::CommandLine);
    assert_eq!(editor.dispatcher().session().command_line.text(), "ec");
}

#[test]
fn test_echo_sets_status() {
    let mut editor = editor("abc\n");
    editor.keys(":echo hi there\n").unwrap();
    assert_eq!(editor.status(), "hi there");
    assert_eq!(editor.mode(), Mode::Normal);
}

#[test]
fn test_unknown_command() {
    let mut editor = editor("abc\n");
    editor.keys(":nope\n").unwrap();
    assert_eq!(editor.status(), "Unknown command: nope");
}

#[test]
fn test_escape_cancels_command_line() {
    let mut editor = editor("abc\n");
    editor.keys(":q!\x1b").unwrap();
    assert_eq!(editor.mode(), Mode::Normal);
    assert!(!editor.dispatcher().session().quit);
    assert_eq!(editor.dispatcher().session().command_line.text(), "");
}

#[test]
fn test_backspace_edits_command_line() {
    let mut editor = editor("abc\n");
    editor.keys(":echo ab").unwrap();
    editor.key(Keystroke::key(KeyCode::Backspace)).unwrap();
    editor.keys("\n").unwrap();
    assert_eq!(editor.status(), "a");
}

#[test]
fn test_history_recalls_previous_line() {
    let mut editor = editor("abc\n");
    editor.keys(":echo first\n").unwrap();
    editor.keys(":echo second\n").unwrap();
    editor.keys(":").unwrap();
    editor.key(Keystroke::key(KeyCode::Up)).unwrap();
    editor.key(Keystroke::key(KeyCode::Up)).unwrap();
    editor.keys("\n").unwrap();
    assert_eq!(editor.status(), "first");
}

// ========================================================================
// Quitting
// ========================================================================

#[test]
fn test_quit_unmodified_buffer() {
    let mut editor = editor("abc\n");
    editor.keys(":q\n").unwrap();
    assert!(editor.dispatcher().session().quit);
}

#[test]
fn test_quit_refuses_modified_buffer() {
    let mut editor = editor("abc\n");
    editor.keys("x:q\n").unwrap();
    assert!(!editor.dispatcher().session().quit);
    assert_eq!(
        editor.status(),
        "No write since last change (add ! to override)"
    );

    editor.keys(":q!\n").unwrap();
    assert!(editor.dispatcher().session().quit);
}

// ========================================================================
// Saving
// ========================================================================

#[test]
fn test_write_saves_to_storage() {
    let storage = MemoryStorage::new();
    storage.insert("notes.txt", "one\ntwo\n");
    let mut editor = file_editor(&storage, "notes.txt");
    editor.keys("x:w\n").unwrap();

    assert_eq!(editor.status(), "\"notes.txt\" 2L written");
    assert_eq!(storage.get("notes.txt").as_deref(), Some("ne\ntwo\n"));
    let buffer = editor.dispatcher().session().active().unwrap();
    assert!(!buffer.modified);
}

#[test]
fn test_write_quit() {
    let storage = MemoryStorage::new();
    let mut editor = file_editor(&storage, "new.txt");
    editor.keys("ihello\x1b:wq\n").unwrap();

    assert_eq!(storage.get("new.txt").as_deref(), Some("hello\n"));
    assert!(editor.dispatcher().session().quit);
}

#[test]
fn test_open_missing_file_names_buffer_after_error() {
    let storage = MemoryStorage::new();
    let editor = file_editor(&storage, "missing.txt");
    assert_eq!(editor.text(), "\n");
    assert_eq!(editor.status(), "missing.txt: no such file");
}

// ========================================================================
// Go filetype hooks
// ========================================================================

#[test]
fn test_go_indents_blocks() {
    let storage = MemoryStorage::new();
    storage.insert("main.go", "func main() {\n");
    let mut editor = file_editor(&storage, "main.go");

    editor.keys("ox++\x1b").unwrap();
    assert_eq!(editor.text(), "func main() {\n\tx++\n");

    editor.keys("o}\x1b").unwrap();
    assert_eq!(editor.text(), "func main() {\n\tx++\n}\n");
}

#[test]
fn test_go_write_trims_trailing_blanks_undoably() {
    let storage = MemoryStorage::new();
    storage.insert("main.go", "a  \nb\t\n");
    let mut editor = file_editor(&storage, "main.go");

    editor.keys(":w\n").unwrap();
    assert_eq!(storage.get("main.go").as_deref(), Some("a\nb\n"));
    assert_eq!(editor.text(), "a\nb\n");

    editor.keys("u").unwrap();
    assert_eq!(editor.text(), "a  \nb\t\n");
}

#[test]
fn test_plain_file_write_is_unchanged() {
    let storage = MemoryStorage::new();
    storage.insert("notes.txt", "a  \n");
    let mut editor = file_editor(&storage, "notes.txt");
    editor.keys(":w\n").unwrap();
    assert_eq!(storage.get("notes.txt").as_deref(), Some("a  \n"));
}

// ========================================================================
// Search
// ========================================================================

#[test]
fn test_find_command_then_repeat() {
    let mut editor = editor("foo bar foo\nfoo\n");
    editor.keys(":find fo+\n").unwrap();
    assert_eq!(editor.cursor(), (0, 8));

    editor.keys("n").unwrap();
    assert_eq!(editor.cursor(), (1, 0));

    editor.keys("N").unwrap();
    assert_eq!(editor.cursor(), (0, 8));
}

#[test]
fn test_invalid_pattern_reports() {
    let mut editor = editor("abc\n");
    editor.keys(":find (\n").unwrap();
    assert!(editor.status().starts_with("Invalid pattern"));
    assert_eq!(editor.cursor(), (0, 0));
}

#[test]
fn test_repeat_without_search() {
    let mut editor = editor("abc abc\n");
    editor.keys("n").unwrap();
    assert_eq!(editor.status(), NO_PREVIOUS_PATTERN);
    assert_eq!(editor.cursor(), (0, 0));
}

#[test]
fn test_find_char_sets_search() {
    let mut editor = editor("hello world\n");
    editor.keys("fo").unwrap();
    assert_eq!(editor.cursor(), (0, 4));
    editor.keys("n").unwrap();
    assert_eq!(editor.cursor(), (0, 7));
    editor.keys("Fh").unwrap();
    assert_eq!(editor.cursor(), (0, 0));
}

#[test]
fn test_delete_to_search_match() {
    let mut editor = editor("one two three\n");
    editor.keys(":find t\n").unwrap();
    assert_eq!(editor.cursor(), (0, 4));
    editor.keys("0dn").unwrap();
    assert_eq!(editor.text(), "wo three\n");
}

#[test]
fn test_write_renames_buffer_opened_from_missing_file() {
    let storage = MemoryStorage::new();
    let mut editor = file_editor(&storage, "new.txt");
    editor.keys("ihi\x1b:w\n").unwrap();
    assert_eq!(editor.status(), "\"new.txt\" 1L written");
    assert_eq!(editor.dispatcher().session().active().unwrap().name, "new.txt");
}

// ========================================================================
// Registered commands
// ========================================================================

fn count_lines(env: &mut ExEnv<'_>, _args: &[&str]) -> Result<String, EditorError> {
    let lines = env.session.active()?.text.line_count();
    Ok(format!("{lines} lines"))
}

#[test]
fn test_registered_ex_command_runs() {
    let mut editor = editor("a\nb\nc\n");
    editor.dispatcher_mut().register_ex("lines", count_lines);
    editor.keys(":lines\n").unwrap();
    assert_eq!(editor.status(), "3 lines");
}
