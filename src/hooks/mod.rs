//! Filetype hooks
//!
//! Per-filetype behaviour the dispatcher calls into:
//! - indentation of new and re-typed lines
//! - rewrites applied just before a buffer is saved
//!
//! Hooks are looked up by file extension. Buffers without registered hooks
//! get [`CopyIndent`], which keeps the previous line's indentation.

mod go;

pub use go::GoHooks;

use std::collections::HashMap;

use crate::editable::{Line, TextModel};
use crate::util::text::indent_width;

/// Behaviour specific to one kind of file
pub trait FiletypeHooks: Send {
    /// Characters that re-indent the current line when typed in insert mode
    fn trigger_chars(&self) -> &[char] {
        &[]
    }

    /// Indentation width, in columns, that `line` should have
    fn indent(&self, text: &TextModel, line: usize, tab_stop: usize) -> usize;

    /// Replacement lines to store instead of the buffer's text, if any
    fn before_save(&self, _text: &TextModel) -> Option<Vec<Line>> {
        None
    }
}

/// Fallback: indent like the line above
#[derive(Debug, Clone, Copy, Default)]
pub struct CopyIndent;

impl FiletypeHooks for CopyIndent {
    fn indent(&self, text: &TextModel, line: usize, tab_stop: usize) -> usize {
        match line.checked_sub(1).and_then(|prev| text.line(prev)) {
            Some(prev) => indent_width(prev, tab_stop),
            None => 0,
        }
    }
}

/// Hooks keyed by lowercase file extension
#[derive(Default)]
pub struct HookRegistry {
    by_extension: HashMap<String, Box<dyn FiletypeHooks>>,
    fallback: CopyIndent,
}

impl HookRegistry {
    /// An empty registry: every buffer uses the fallback
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry with the built-in filetypes
    pub fn with_defaults() -> Result<Self, regex::Error> {
        let mut registry = Self::new();
        registry.register("go", GoHooks::new()?);
        Ok(registry)
    }

    pub fn register(&mut self, extension: &str, hooks: impl FiletypeHooks + 'static) {
        self.by_extension
            .insert(extension.to_lowercase(), Box::new(hooks));
    }

    pub fn for_extension(&self, extension: Option<&str>) -> &dyn FiletypeHooks {
        extension
            .and_then(|ext| self.by_extension.get(&ext.to_lowercase()))
            .map(|hooks| hooks.as_ref())
            .unwrap_or(&self.fallback)
    }
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookRegistry")
            .field("extensions", &self.by_extension.keys().collect::<Vec<_>>())
            .finish()
    }
}
