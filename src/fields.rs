//! Well-known record keys the console writer pulls into fixed columns.
//!
//! The encoder writes `time`, `level`, `caller`, `message`, and `error`; the
//! short spellings are accepted so records from similar loggers still line up.

/// Keys holding the record time.
pub const TIME_KEYS: &[&str] = &["time", "ts", "timestamp"];

/// Keys holding the level name.
pub const LEVEL_KEYS: &[&str] = &["level", "lvl"];

/// Keys holding the `<file>:<line>` caller location.
pub const CALLER_KEYS: &[&str] = &["caller"];

/// Keys holding the message text.
pub const MESSAGE_KEYS: &[&str] = &["message", "msg"];

/// Keys holding an error description.
pub const ERROR_KEYS: &[&str] = &["error", "err"];

/// Column a record key is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Time,
    Level,
    Caller,
    Message,
    Error,
    /// Any other key; rendered as `key=value` after the fixed columns.
    Extra,
}

/// Classifies `key` by exact, case-sensitive match.
pub fn classify(key: &str) -> Slot {
    if TIME_KEYS.contains(&key) {
        Slot::Time
    } else if LEVEL_KEYS.contains(&key) {
        Slot::Level
    } else if CALLER_KEYS.contains(&key) {
        Slot::Caller
    } else if MESSAGE_KEYS.contains(&key) {
        Slot::Message
    } else if ERROR_KEYS.contains(&key) {
        Slot::Error
    } else {
        Slot::Extra
    }
}
