//! Log format and destination flags shared by every command.

use clap::{Args, ValueEnum};
use petal_log::Level;
use std::path::PathBuf;

/// Where console log lines are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputTarget {
    /// Standard error.
    #[default]
    Stderr,
    /// Standard output.
    Stdout,
    /// Nowhere; only the external writer (if any) receives events.
    None,
}

/// Logging-related CLI flags; these override env and config file values.
#[derive(Debug, Args)]
pub struct FormatArgs {
    /// Config file (JSON or TOML, chosen by extension).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Threshold level: debug, info or discard.
    #[arg(long, global = true)]
    pub level: Option<Level>,
    /// Render console lines as JSON.
    #[arg(long, global = true)]
    pub json: bool,
    /// Omit the timestamp from console lines.
    #[arg(long, global = true)]
    pub no_timestamp: bool,
    /// Console destination.
    #[arg(long, global = true, value_enum, default_value_t = OutputTarget::Stderr)]
    pub output: OutputTarget,
    /// Also write structured, timestamped JSON lines to this file.
    #[arg(long, global = true, conflicts_with = "tracing")]
    pub log_file: Option<PathBuf>,
    /// Forward events to a `tracing` subscriber on stderr.
    #[arg(long, global = true)]
    pub tracing: bool,
}
