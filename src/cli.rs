//! Command-line argument definitions for `linelog`.
//!
//! Uses [`clap`] derive macros for argument parsing.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_complete::Shell;

/// Pretty-print linelog JSON records from stdin.
///
/// Reads wire records from stdin and writes one aligned, optionally
/// colorized line per record to stdout. Anything that is not a JSON object
/// is passed through unchanged.
#[derive(Debug, Parser)]
#[command(name = "linelog", version, about, long_about = None)]
pub struct Cli {
    /// Control color output.
    ///
    /// `auto` enables colors only when stdout is a TTY and `NO_COLOR` is unset.
    #[arg(short = 'c', long, value_enum)]
    pub color: Option<ColorMode>,

    /// strftime-style pattern for the time column.
    #[arg(short = 't', long)]
    pub time_format: Option<String>,

    /// Show times in UTC instead of the local time zone.
    #[arg(short = 'u', long)]
    pub utc: bool,

    /// Path to configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print a shell completion script and exit.
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,
}

/// Color output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Enable colors only when stdout is a TTY.
    Auto,
    /// Always enable colors.
    Always,
    /// Never enable colors.
    Never,
}

impl ColorMode {
    /// Parses the config file spelling. Unknown values fall back to `Auto`.
    pub fn from_config(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "always" => Self::Always,
            "never" => Self::Never,
            _ => Self::Auto,
        }
    }
}
