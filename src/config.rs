//! Editor configuration persistence
//!
//! Stores user preferences in `~/.config/quill/config.yaml`. Every field is
//! optional in the file; missing ones take their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config_paths::ConfigPaths;
use crate::editable::DEFAULT_UNDO_LIMIT;

/// Editor configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Quiet time after which an ambiguous key prefix is resolved
    pub keypress_timeout_ms: u64,
    /// Display width of a tab, and the indentation step
    pub tab_stop: usize,
    /// Indent with spaces instead of tabs
    pub expand_tab: bool,
    /// Changes kept per buffer before the oldest are dropped
    pub undo_limit: usize,
    /// Key sequence that leaves insert mode
    pub insert_escape: String,
    /// Capacity of the key and command queues
    pub queue_capacity: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            keypress_timeout_ms: 750,
            tab_stop: 4,
            expand_tab: false,
            undo_limit: DEFAULT_UNDO_LIMIT,
            insert_escape: "jj".to_string(),
            queue_capacity: 100,
        }
    }
}

impl EditorConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(paths) = ConfigPaths::discover() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&paths.config_file())
    }

    /// Load config from `path`, or return defaults if it is missing or broken
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str::<Self>(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config.sanitized()
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Replace values that would make the editor unusable
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.tab_stop == 0 {
            self.tab_stop = defaults.tab_stop;
        }
        if self.queue_capacity == 0 {
            self.queue_capacity = defaults.queue_capacity;
        }
        if self.insert_escape.is_empty() {
            self.insert_escape = defaults.insert_escape;
        }
        self
    }
}
