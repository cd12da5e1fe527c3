//! Error types for the editing core
//!
//! `EditorError` covers invariant violations inside the core. They are
//! propagated with `?` up to the dispatcher, which logs them and shuts the
//! session down. Recoverable I/O problems use `StorageError` instead and
//! end up in the status line.

use std::path::PathBuf;

use thiserror::Error;

use crate::editable::{BufferId, Mark};

/// Faults that indicate a bug in the caller, not a user mistake
#[derive(Debug, Error)]
pub enum EditorError {
    /// A mark that points outside the text it is applied to
    #[error("stale mark at {line}:{column} (buffer has {line_count} lines)")]
    StaleMark {
        line: usize,
        column: usize,
        line_count: usize,
    },

    /// A mark created for a different buffer
    #[error("mark belongs to buffer {found}, expected buffer {expected}")]
    ForeignMark { found: BufferId, expected: BufferId },

    /// `insert_char` was asked to insert a line break
    #[error("line breaks must be inserted with insert_newline")]
    NewlineInsert,

    /// No buffer with this id is open in the session
    #[error("no open buffer with id {0}")]
    UnknownBuffer(BufferId),

    /// A handler panicked while executing a command
    #[error("command handler panicked: {0}")]
    Panic(String),
}

impl EditorError {
    pub fn stale(mark: Mark, line_count: usize) -> Self {
        EditorError::StaleMark {
            line: mark.line,
            column: mark.column,
            line_count,
        }
    }
}

/// Failures reading or writing files
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("{}: no such file", .0.display())]
    NotFound(PathBuf),

    #[error("{}: permission denied", .0.display())]
    PermissionDenied(PathBuf),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: is a directory", .0.display())]
    IsDirectory(PathBuf),

    /// The file contains NUL bytes
    #[error("{}: binary file", .0.display())]
    BinaryFile(PathBuf),

    #[error("{}: file too large ({size_mb:.1} MB)", path.display())]
    TooLarge { path: PathBuf, size_mb: f64 },

    #[error("buffer has no file name")]
    NoPath,
}

impl StorageError {
    /// Classify an `io::Error` for the given path
    pub fn from_io(path: PathBuf, source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::NotFound => StorageError::NotFound(path),
            std::io::ErrorKind::PermissionDenied => StorageError::PermissionDenied(path),
            _ => StorageError::Io { path, source },
        }
    }
}
