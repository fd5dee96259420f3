//! Log level representation with parsing, display, and colorization.
//!
//! The encoder writes one of five fixed level names; the console writer
//! reads them back loosely (case-insensitive, common aliases) so records
//! produced by other loggers still get a badge and a color.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

use owo_colors::Style;

/// Canonical log level enumeration.
///
/// Ordered by severity (ascending) so the level gate can compare with `<`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Level {
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Fatal = 5,
}

impl Level {
    /// Name written into the `level` field of a record.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Fatal => "fatal",
        }
    }

    /// 5-character display badge for the level, right-justified (e.g., `" INFO"`, `"ERROR"`).
    #[allow(clippy::trivially_copy_pass_by_ref)] // &self required since OwoColorize has conflicting trait methods
    pub const fn badge(&self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => " INFO",
            Self::Warn => " WARN",
            Self::Error => "ERROR",
            Self::Fatal => "FATAL",
        }
    }

    /// Returns the [`Style`] for this level's badge when colors are enabled.
    ///
    /// - Debug: faint
    /// - Info: terminal default
    /// - Warn: yellow bold
    /// - Error: red bold
    /// - Fatal: white bold on red background
    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub const fn style(&self) -> Style {
        match self {
            Self::Debug => Style::new().dimmed(),
            Self::Info => Style::new(),
            Self::Warn => Style::new().yellow().bold(),
            Self::Error => Style::new().red().bold(),
            Self::Fatal => Style::new().white().on_red().bold(),
        }
    }

    /// Style used for level strings that [`from_str_loose`](Self::from_str_loose) rejects.
    pub const fn neutral_style() -> Style {
        Style::new()
    }

    /// Parse a string into a [`Level`], case-insensitive.
    ///
    /// Returns `None` for unrecognized strings.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "debug" | "dbg" | "trace" | "trc" => Some(Self::Debug),
            "info" | "inf" | "information" => Some(Self::Info),
            "warn" | "warning" | "wrn" => Some(Self::Warn),
            "error" | "err" => Some(Self::Error),
            "fatal" | "critical" | "crit" | "panic" | "emerg" | "emergency" => Some(Self::Fatal),
            _ => None,
        }
    }

    const fn from_u8(n: u8) -> Self {
        match n {
            0 | 1 => Self::Debug,
            2 => Self::Info,
            3 => Self::Warn,
            4 => Self::Error,
            _ => Self::Fatal,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown level name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError(String);

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid level '{}': expected one of debug, info, warn, error, fatal",
            self.0
        )
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_loose(s).ok_or_else(|| ParseLevelError(s.to_string()))
    }
}

/// A [`Level`] that can be read and replaced concurrently.
#[derive(Debug)]
pub struct AtomicLevel(AtomicU8);

impl AtomicLevel {
    pub const fn new(level: Level) -> Self {
        Self(AtomicU8::new(level as u8))
    }

    pub fn load(&self) -> Level {
        Level::from_u8(self.0.load(Ordering::Relaxed))
    }

    pub fn store(&self, level: Level) {
        self.0.store(level as u8, Ordering::Relaxed);
    }
}

impl From<Level> for AtomicLevel {
    fn from(level: Level) -> Self {
        Self::new(level)
    }
}

impl Default for AtomicLevel {
    fn default() -> Self {
        Self::new(Level::Debug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_loose_basic() {
        assert_eq!(Level::from_str_loose("info"), Some(Level::Info));
        assert_eq!(Level::from_str_loose("INFO"), Some(Level::Info));
        assert_eq!(Level::from_str_loose("warn"), Some(Level::Warn));
        assert_eq!(Level::from_str_loose("WARNING"), Some(Level::Warn));
        assert_eq!(Level::from_str_loose("error"), Some(Level::Error));
        assert_eq!(Level::from_str_loose("debug"), Some(Level::Debug));
        assert_eq!(Level::from_str_loose("fatal"), Some(Level::Fatal));
        assert_eq!(Level::from_str_loose("panic"), Some(Level::Fatal));
    }

    #[test]
    fn test_from_str_loose_unknown() {
        assert_eq!(Level::from_str_loose("hahaha"), None);
        assert_eq!(Level::from_str_loose(""), None);
    }

    #[test]
    fn test_from_str_strict_error_message() {
        assert_eq!("Warn".parse::<Level>(), Ok(Level::Warn));
        let err = "verbose".parse::<Level>().unwrap_err();
        assert!(err.to_string().contains("invalid level 'verbose'"));
    }

    #[test]
    fn test_level_ordering() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Warn < Level::Error);
        assert!(Level::Error < Level::Fatal);
    }

    #[test]
    fn test_badge_width() {
        for level in [
            Level::Debug,
            Level::Info,
            Level::Warn,
            Level::Error,
            Level::Fatal,
        ] {
            assert_eq!(level.badge().len(), 5, "Badge for {level:?} is not 5 chars");
            assert_eq!(level.badge().trim().to_lowercase(), level.as_str());
        }
    }

    #[test]
    fn test_atomic_level_round_trip() {
        let level = AtomicLevel::new(Level::Info);
        assert_eq!(level.load(), Level::Info);
        level.store(Level::Fatal);
        assert_eq!(level.load(), Level::Fatal);
        assert_eq!(AtomicLevel::default().load(), Level::Debug);
    }
}
