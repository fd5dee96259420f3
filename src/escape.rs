//! JSON string quoting for record values.
//!
//! Besides the characters JSON requires, `<` and `'` are escaped so records
//! stay safe when embedded in HTML or single-quoted script contexts.

const fn build_escape_table() -> [bool; 256] {
    let mut table = [false; 256];
    let mut i = 0;
    while i < 0x20 {
        table[i] = true;
        i += 1;
    }
    table[b'"' as usize] = true;
    table[b'\\' as usize] = true;
    table[b'<' as usize] = true;
    table[b'\'' as usize] = true;
    table
}

/// Bytes that cannot be copied verbatim into a quoted string.
static NEEDS_ESCAPE: [bool; 256] = build_escape_table();

const HEX: &[u8; 16] = b"0123456789abcdef";

/// Appends `s` as a quoted JSON string.
#[inline]
pub fn append_str(buf: &mut Vec<u8>, s: &str) {
    append_bytes(buf, s.as_bytes());
}

/// Appends `b` as a quoted JSON string.
///
/// When no byte needs escaping the input is copied in one go.
pub fn append_bytes(buf: &mut Vec<u8>, b: &[u8]) {
    if !b.iter().any(|&c| NEEDS_ESCAPE[usize::from(c)]) {
        buf.reserve(b.len() + 2);
        buf.push(b'"');
        buf.extend_from_slice(b);
        buf.push(b'"');
        return;
    }
    append_escaped(buf, b);
}

fn append_escaped(buf: &mut Vec<u8>, b: &[u8]) {
    buf.push(b'"');
    let mut start = 0;
    for (i, &c) in b.iter().enumerate() {
        if !NEEDS_ESCAPE[usize::from(c)] {
            continue;
        }
        buf.extend_from_slice(&b[start..i]);
        match c {
            b'"' => buf.extend_from_slice(b"\\\""),
            b'\\' => buf.extend_from_slice(b"\\\\"),
            b'\n' => buf.extend_from_slice(b"\\n"),
            b'\r' => buf.extend_from_slice(b"\\r"),
            b'\t' => buf.extend_from_slice(b"\\t"),
            _ => {
                buf.extend_from_slice(b"\\u00");
                buf.push(HEX[usize::from(c >> 4)]);
                buf.push(HEX[usize::from(c & 0x0f)]);
            }
        }
        start = i + 1;
    }
    buf.extend_from_slice(&b[start..]);
    buf.push(b'"');
}

/// Appends lower-case hex pairs for every byte, without quotes.
pub fn append_hex(buf: &mut Vec<u8>, b: &[u8]) {
    buf.reserve(b.len() * 2);
    for &c in b {
        buf.push(HEX[usize::from(c >> 4)]);
        buf.push(HEX[usize::from(c & 0x0f)]);
    }
}

/// Appends colon-separated lower-case hex pairs, without quotes.
pub fn append_mac(buf: &mut Vec<u8>, b: &[u8]) {
    for (i, &c) in b.iter().enumerate() {
        if i > 0 {
            buf.push(b':');
        }
        buf.push(HEX[usize::from(c >> 4)]);
        buf.push(HEX[usize::from(c & 0x0f)]);
    }
}
