//! Reading and writing buffer contents
//!
//! Files are validated before they are read:
//! - existence and permissions
//! - directories are refused
//! - a size limit
//! - binary content (NUL bytes in the first 8 KB)

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

use crate::error::StorageError;
use crate::model::Buffer;

/// Maximum file size in bytes (50 MB)
pub const MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// File content as loaded
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded {
    pub text: String,
    pub synced_at: SystemTime,
}

/// Where buffers come from and go to
pub trait Storage: Send {
    fn open(&self, path: &Path) -> Result<Loaded, StorageError>;

    /// Write the buffer to its path. Returns the sync time.
    fn save(&self, buffer: &Buffer) -> Result<SystemTime, StorageError>;
}

/// Local filesystem storage
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStorage;

impl FsStorage {
    fn validate(path: &Path) -> Result<(), StorageError> {
        let metadata =
            fs::metadata(path).map_err(|e| StorageError::from_io(path.to_path_buf(), e))?;

        if metadata.is_dir() {
            return Err(StorageError::IsDirectory(path.to_path_buf()));
        }

        if metadata.len() > MAX_FILE_SIZE {
            return Err(StorageError::TooLarge {
                path: path.to_path_buf(),
                size_mb: metadata.len() as f64 / (1024.0 * 1024.0),
            });
        }

        if is_likely_binary(path) {
            return Err(StorageError::BinaryFile(path.to_path_buf()));
        }
        Ok(())
    }
}

impl Storage for FsStorage {
    fn open(&self, path: &Path) -> Result<Loaded, StorageError> {
        Self::validate(path)?;
        let text =
            fs::read_to_string(path).map_err(|e| StorageError::from_io(path.to_path_buf(), e))?;
        let synced_at = fs::metadata(path)
            .and_then(|m| m.modified())
            .unwrap_or_else(|_| SystemTime::now());
        Ok(Loaded { text, synced_at })
    }

    fn save(&self, buffer: &Buffer) -> Result<SystemTime, StorageError> {
        let path = buffer.path.as_deref().ok_or(StorageError::NoPath)?;
        fs::write(path, buffer.text.to_string())
            .map_err(|e| StorageError::from_io(path.to_path_buf(), e))?;
        tracing::info!("Saved {}", path.display());
        Ok(fs::metadata(path)
            .and_then(|m| m.modified())
            .unwrap_or_else(|_| SystemTime::now()))
    }
}

/// Check if a file is likely binary by scanning the first 8KB for null bytes.
///
/// Returns `false` on any read error (the actual open reports it better).
pub fn is_likely_binary(path: &Path) -> bool {
    let Ok(mut file) = File::open(path) else {
        return false;
    };

    let mut buffer = [0u8; 8192];
    let Ok(bytes_read) = file.read(&mut buffer) else {
        return false;
    };

    buffer[..bytes_read].contains(&0)
}

/// In-memory storage shared between clones, for tests and scratch sessions
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    files: Arc<Mutex<HashMap<PathBuf, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, path: impl Into<PathBuf>, text: &str) {
        if let Ok(mut files) = self.files.lock() {
            files.insert(path.into(), text.to_string());
        }
    }

    /// Current content of a stored file
    pub fn get(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.lock().ok()?.get(path.as_ref()).cloned()
    }
}

impl Storage for MemoryStorage {
    fn open(&self, path: &Path) -> Result<Loaded, StorageError> {
        match self.get(path) {
            Some(text) => Ok(Loaded {
                text,
                synced_at: SystemTime::now(),
            }),
            None => Err(StorageError::NotFound(path.to_path_buf())),
        }
    }

    fn save(&self, buffer: &Buffer) -> Result<SystemTime, StorageError> {
        let path = buffer.path.as_deref().ok_or(StorageError::NoPath)?;
        self.insert(path, &buffer.text.to_string());
        Ok(SystemTime::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editable::BufferId;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_save_then_open_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("round.txt");

        let mut buffer = Buffer::from_text(BufferId(0), "alpha\n\nbeta\n", 10);
        buffer.set_path(&path);
        FsStorage.save(&buffer).unwrap();

        let loaded = FsStorage.open(&path).unwrap();
        assert_eq!(loaded.text, "alpha\n\nbeta\n");
    }

    #[test]
    fn test_saved_file_ends_with_newline() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("partial.txt");
        fs::write(&path, "no newline").unwrap();

        let loaded = FsStorage.open(&path).unwrap();
        let mut buffer = Buffer::from_text(BufferId(0), &loaded.text, 10);
        buffer.set_path(&path);
        FsStorage.save(&buffer).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "no newline\n");
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = FsStorage.open(&dir.path().join("nope.txt"));
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_directory_is_refused() {
        let dir = TempDir::new().unwrap();
        let result = FsStorage.open(dir.path());
        assert!(matches!(result, Err(StorageError::IsDirectory(_))));
    }

    #[test]
    fn test_binary_file_is_refused() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0x89, 0x50, 0x00, 0x01]).unwrap();
        file.flush().unwrap();
        let result = FsStorage.open(file.path());
        assert!(matches!(result, Err(StorageError::BinaryFile(_))));
    }

    #[test]
    fn test_save_without_path() {
        let buffer = Buffer::new(BufferId(0), 10);
        assert!(matches!(
            FsStorage.save(&buffer),
            Err(StorageError::NoPath)
        ));
    }
}
