//! Streaming parser for wire records.
//!
//! One write to the console writer may carry a single record, several
//! concatenated records, a partial record, or text that is not JSON at all.
//! [`parse_chunks`] walks the input with a streaming JSON reader and splits
//! it into parsed records and raw spans that must be passed through as-is.

use std::fmt;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde_json::Value;

use crate::fields::{self, Slot};
use crate::timestamp::Timestamp;

/// A wire record split into display columns.
///
/// Slots hold the first occurrence of their key; repeats of an occupied slot
/// and unparseable times land in [`extra`](Self::extra).
#[derive(Debug, Default, PartialEq)]
pub struct LogRecord {
    pub time: Option<Timestamp>,
    pub level: Option<String>,
    pub caller: Option<String>,
    pub message: Option<String>,
    pub error: Option<String>,
    /// Remaining fields in first-seen order, duplicates included.
    pub extra: Vec<(String, Value)>,
}

/// A piece of console writer input.
#[derive(Debug, PartialEq)]
pub enum Chunk<'a> {
    Record(LogRecord),
    /// Bytes to write through unchanged.
    Raw(&'a [u8]),
}

/// Splits `input` into records and raw spans.
///
/// If the first value is not a JSON object the whole input is raw. If a
/// later value fails, everything from its start onward is raw, minus the
/// line break that ended the preceding record.
pub fn parse_chunks(input: &[u8]) -> Vec<Chunk<'_>> {
    let mut chunks = Vec::new();
    let mut stream = serde_json::Deserializer::from_slice(input).into_iter::<OrderedFields>();
    let mut offset = 0;

    loop {
        match stream.next() {
            Some(Ok(fields)) => {
                chunks.push(Chunk::Record(LogRecord::from_fields(fields.0)));
                offset = stream.byte_offset();
            }
            Some(Err(_)) => {
                if chunks.is_empty() {
                    return vec![Chunk::Raw(input)];
                }
                chunks.push(Chunk::Raw(strip_line_break(&input[offset..])));
                break;
            }
            None => break,
        }
    }

    if chunks.is_empty() && !input.is_empty() {
        // Whitespace only.
        chunks.push(Chunk::Raw(input));
    }
    chunks
}

/// Rendered records carry their own newline.
fn strip_line_break(rest: &[u8]) -> &[u8] {
    rest.strip_prefix(b"\r\n")
        .or_else(|| rest.strip_prefix(b"\n"))
        .unwrap_or(rest)
}

impl LogRecord {
    fn from_fields(fields: Vec<(String, Value)>) -> Self {
        let mut record = Self::default();
        for (key, value) in fields {
            let placed = match fields::classify(&key) {
                Slot::Time if record.time.is_none() => {
                    record.time = Timestamp::from_json_value(&value);
                    record.time.is_some()
                }
                Slot::Level if record.level.is_none() => fill(&mut record.level, &value),
                Slot::Caller if record.caller.is_none() => fill(&mut record.caller, &value),
                Slot::Message if record.message.is_none() => fill(&mut record.message, &value),
                Slot::Error if record.error.is_none() => fill(&mut record.error, &value),
                _ => false,
            };
            if !placed {
                record.extra.push((key, value));
            }
        }
        record
    }
}

/// Stores the display text of `value` in `slot`. `null` leaves the slot
/// empty but still consumes the key.
fn fill(slot: &mut Option<String>, value: &Value) -> bool {
    *slot = match value {
        Value::Null => return true,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    };
    true
}

/// A JSON object's members in document order, repeated keys included.
struct OrderedFields(Vec<(String, Value)>);

impl<'de> Deserialize<'de> for OrderedFields {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OrderedFieldsVisitor)
    }
}

struct OrderedFieldsVisitor;

impl<'de> Visitor<'de> for OrderedFieldsVisitor {
    type Value = OrderedFields;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut fields = Vec::with_capacity(map.size_hint().unwrap_or(8));
        while let Some((key, value)) = map.next_entry::<String, Value>()? {
            fields.push((key, value));
        }
        Ok(OrderedFields(fields))
    }
}
