//! Command-line argument parsing for the editor

use clap::Parser;
use std::path::PathBuf;

/// A modal terminal text editor
#[derive(Parser, Debug)]
#[command(name = "quill", version, about = "A modal terminal text editor")]
pub struct CliArgs {
    /// File to open
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Settings file to use instead of ~/.config/quill/config.yaml
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `dispatch=trace` (overrides RUST_LOG)
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,

    /// Print the newest log file and exit
    #[arg(long)]
    pub print_log_path: bool,
}
