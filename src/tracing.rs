//! Logging setup
//!
//! Structured logging with scoped filtering. The interesting targets are
//! `input` (key parsing), `dispatch` (command execution) and the module
//! paths under `quill::`.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable or `--log-level`:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=input=trace,dispatch=debug` - scoped filtering
//! - `RUST_LOG=quill::update=debug` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/quill/logs/quill.log` with daily rotation.
//! The terminal belongs to the editor, so console output is off unless a
//! filter is given explicitly.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config_paths::{ConfigPaths, LOG_FILE_PREFIX};

/// Initialize tracing subscriber with console and file logging
///
/// `level` overrides RUST_LOG for both layers when given.
pub fn init(level: Option<&str>) {
    let console_filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off")),
    };
    let file_filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
    };

    // Console layer - stderr, so it survives the alternate screen
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let logs_dir = ConfigPaths::discover()
        .ok_or_else(|| "no config directory".to_string())
        .and_then(|paths| paths.ensure_logs_dir().map_err(|e| e.to_string()));
    let file_layer = match logs_dir {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX);
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(file_filter),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}
