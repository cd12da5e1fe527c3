//! Where quill keeps its files
//!
//! Everything lives under one directory:
//! - Unix/macOS: `$XDG_CONFIG_HOME/quill/` or `~/.config/quill/`
//! - Windows: `%APPDATA%\quill\`
//!
//! ```text
//! quill/
//!   config.yaml
//!   logs/quill.log.YYYY-MM-DD
//! ```

use std::io;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "quill";

/// Prefix of the daily-rotated log files
pub const LOG_FILE_PREFIX: &str = "quill.log";

/// The directory layout rooted at one config directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    root: PathBuf,
}

impl ConfigPaths {
    /// Layout under `root`
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The user's config directory, if the platform has one
    pub fn discover() -> Option<Self> {
        platform_config_home().map(|home| Self::at(home.join(APP_DIR)))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.yaml")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }

    /// Create the logs directory if needed, returning it
    pub fn ensure_logs_dir(&self) -> io::Result<PathBuf> {
        let logs = self.logs_dir();
        std::fs::create_dir_all(&logs)?;
        Ok(logs)
    }

    /// Newest rotated log file, e.g. `quill.log.2026-01-07`
    pub fn latest_log(&self) -> Option<PathBuf> {
        std::fs::read_dir(self.logs_dir())
            .ok()?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(LOG_FILE_PREFIX))
            })
            // YYYY-MM-DD suffixes sort naturally
            .max()
    }
}

#[cfg(target_os = "windows")]
fn platform_config_home() -> Option<PathBuf> {
    std::env::var_os("APPDATA")
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
}

#[cfg(not(target_os = "windows"))]
fn platform_config_home() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let paths = ConfigPaths::at("/cfg/quill");
        assert_eq!(paths.config_file(), PathBuf::from("/cfg/quill/config.yaml"));
        assert_eq!(paths.logs_dir(), PathBuf::from("/cfg/quill/logs"));
    }

    #[test]
    fn test_latest_log_picks_newest_day() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ConfigPaths::at(dir.path());
        assert_eq!(paths.latest_log(), None);

        let logs = paths.ensure_logs_dir().unwrap();
        for name in ["quill.log.2026-01-06", "quill.log.2026-01-07", "other.txt"] {
            std::fs::write(logs.join(name), "").unwrap();
        }
        assert_eq!(
            paths.latest_log(),
            Some(logs.join("quill.log.2026-01-07"))
        );
    }
}
