//! Parsing of record time values for console display.
//!
//! Accepts what the encoder writes (the millisecond RFC 3339 string or an
//! integer millisecond epoch) plus RFC 3339 with offsets and `YYYY-MM-DD
//! HH:MM:SS` strings.

use std::fmt;

use jiff::tz::TimeZone;

/// A record time normalized to an instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    pub value: jiff::Timestamp,
}

impl Timestamp {
    /// Renders the instant in `tz` with a strftime-style `format`.
    pub fn format_with(&self, format: &str, tz: &TimeZone) -> String {
        self.value.to_zoned(tz.clone()).strftime(format).to_string()
    }

    /// Parses a record's time value. Returns `None` for anything unrecognized.
    pub fn from_json_value(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) => Self::parse_string(s),
            serde_json::Value::Number(n) => Self::parse_number(n),
            _ => None,
        }
    }

    fn parse_string(s: &str) -> Option<Self> {
        if let Ok(value) = s.parse::<jiff::Timestamp>() {
            return Some(Self { value });
        }

        // No offset: read as UTC.
        for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"] {
            if let Ok(dt) = jiff::civil::DateTime::strptime(format, s)
                && let Ok(zdt) = dt.to_zoned(TimeZone::UTC)
            {
                return Some(Self {
                    value: zdt.timestamp(),
                });
            }
        }

        None
    }

    /// Numbers are epoch milliseconds, matching the encoder's numeric
    /// mode. A fractional part carries sub-millisecond precision.
    fn parse_number(n: &serde_json::Number) -> Option<Self> {
        let value = if let Some(ms) = n.as_i64() {
            jiff::Timestamp::from_millisecond(ms).ok()?
        } else {
            let ms = n.as_f64().filter(|f| f.is_finite())?;
            #[allow(clippy::cast_possible_truncation)]
            let nanos = (ms * 1_000_000.0).round() as i128;
            jiff::Timestamp::from_nanosecond(nanos).ok()?
        };
        Some(Self { value })
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with("%Y-%m-%dT%H:%M:%S%.3fZ", &TimeZone::UTC))
    }
}
