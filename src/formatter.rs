//! Console rendering of parsed wire records.
//!
//! Columns, in order:
//!
//! ```text
//! 05:35:54.277  INFO [main.rs:12] hello error="disk full" foo=bar n=42
//! ```
//!
//! Each part is omitted when the record lacks it. With colors on, the time is
//! faint, the level badge takes its level's style, the caller is bold, the
//! error is red, and extra keys are bold grey.

use std::fmt::Write;

use jiff::tz::TimeZone;
use owo_colors::OwoColorize;
use serde_json::Value;

use crate::level::Level;
use crate::parser::LogRecord;

/// Display settings for [`render_record`].
#[derive(Debug, Clone, Copy)]
pub struct Layout<'a> {
    pub ansi_color: bool,
    /// strftime-style pattern for the time column.
    pub time_format: &'a str,
    pub time_zone: &'a TimeZone,
}

/// Width of the level column.
const BADGE_WIDTH: usize = 5;

/// Appends one rendered line for `record` to `out`, newline included.
pub fn render_record(record: &LogRecord, layout: &Layout<'_>, out: &mut String) {
    let start = out.len();

    if let Some(ts) = &record.time {
        let text = ts.format_with(layout.time_format, layout.time_zone);
        if layout.ansi_color {
            let _ = write!(out, "{}", text.dimmed());
        } else {
            out.push_str(&text);
        }
    }

    if let Some(level) = &record.level {
        separate(out, start);
        push_badge(out, level, layout.ansi_color);
    }

    if let Some(caller) = &record.caller {
        separate(out, start);
        if layout.ansi_color {
            let _ = write!(out, "[{}]", caller.bold());
        } else {
            let _ = write!(out, "[{caller}]");
        }
    }

    if let Some(message) = record.message.as_deref().filter(|m| !m.is_empty()) {
        separate(out, start);
        out.push_str(message);
    }

    if let Some(error) = &record.error {
        separate(out, start);
        let value = display_string(error);
        if layout.ansi_color {
            let _ = write!(out, "{}{}", "error=".red(), value.red());
        } else {
            let _ = write!(out, "error={value}");
        }
    }

    for (key, value) in &record.extra {
        separate(out, start);
        let value = format_value(value);
        if layout.ansi_color {
            let _ = write!(out, "{}={value}", key.truecolor(150, 150, 150).bold());
        } else {
            let _ = write!(out, "{key}={value}");
        }
    }

    out.push('\n');
}

fn separate(out: &mut String, start: usize) {
    if out.len() > start {
        out.push(' ');
    }
}

/// Known levels get their fixed badge and style. Anything else is printed
/// verbatim in the neutral style, padded to the badge width but never cut.
fn push_badge(out: &mut String, level: &str, ansi_color: bool) {
    match Level::from_str_loose(level) {
        Some(known) if ansi_color => {
            let _ = write!(out, "{}", known.badge().style(known.style()));
        }
        Some(known) => out.push_str(known.badge()),
        None => {
            let text = format!("{level:>BADGE_WIDTH$}");
            if ansi_color {
                let _ = write!(out, "{}", text.style(Level::neutral_style()));
            } else {
                out.push_str(&text);
            }
        }
    }
}

/// Strings print bare unless empty or containing whitespace, in which case
/// they are JSON-quoted. Everything else prints as compact JSON.
fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => display_string(s),
        other => other.to_string(),
    }
}

fn display_string(s: &str) -> String {
    if s.is_empty() || s.chars().any(char::is_whitespace) {
        serde_json::to_string(s).unwrap_or_else(|_| s.to_string())
    } else {
        s.to_string()
    }
}
