//! Quill - the editing core of a modal terminal text editor
//!
//! Keys flow through three stages:
//! - [`input::InputParser`] turns keystrokes into commands using a [`keymap::Keymap`]
//! - [`update::Dispatcher`] executes commands against the [`model::EditorSession`]
//! - [`view::Renderer`] draws a frame after each command
//!
//! [`runtime`] runs the stages as tokio tasks; [`runtime::LocalEditor`] runs
//! them inline for tests.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod editable;
pub mod error;
pub mod hooks;
pub mod input;
pub mod keymap;
pub mod messages;
pub mod model;
pub mod motion;
pub mod runtime;
pub mod storage;
pub mod tracing;
pub mod update;
pub mod util;
pub mod view;

// Re-export commonly used types
pub use config::EditorConfig;
pub use error::{EditorError, StorageError};
pub use messages::{CommandContext, Completion};
pub use model::EditorSession;
pub use update::Dispatcher;
