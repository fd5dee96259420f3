//! Error types for the `linelog` binary.
//!
//! The logging core never returns errors; these cover config loading and
//! the stdin/stdout plumbing of the CLI.

use thiserror::Error;

/// Errors that can occur in the `linelog` CLI.
///
/// Maps to exit codes: [`Config`](Self::Config) and [`Toml`](Self::Toml)
/// → exit 1, [`Io`](Self::Io) → exit 2.
#[derive(Debug, Error)]
pub enum LinelogError {
    /// Configuration error (unreadable config file, unknown time zone).
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error during read or write.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML deserialization error.
    #[error("config file error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl LinelogError {
    /// Process exit status for this error.
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) | Self::Toml(_) => 1,
            Self::Io(_) => 2,
        }
    }
}
