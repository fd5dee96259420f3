//! In-flight log records and their typed field appends.
//!
//! An [`Event`] owns a pooled buffer that already holds the record header.
//! Every field method appends `,"<key>":<value>` in call order and hands the
//! event back, so calls chain:
//!
//! ```
//! use linelog::{Level, Logger};
//!
//! let logger = Logger::default();
//! logger.set_level(Level::Error);
//! // Filtered out: every call below is a no-op.
//! logger.info().str("user", "ada").int("attempt", 3).msg("login");
//! ```
//!
//! An event filtered by the level gate (or discarded) carries no buffer and
//! ignores every call made on it.

use std::backtrace::Backtrace;
use std::error::Error;
use std::fmt;
use std::io::Write;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::panic::Location;
use std::time::Duration;

use serde::Serialize;

use crate::clock;
use crate::escape;
use crate::pool::{EVENT_POOL, SCRATCH_POOL};
use crate::sink::{Sink, note_write_error};

/// Exit status used after a fatal record has been written.
pub const FATAL_EXIT_STATUS: i32 = 255;

/// A single log record under construction.
#[must_use = "an event does nothing until `msg` or `msgf` is called"]
pub struct Event<'a> {
    inner: Option<Inner<'a>>,
}

struct Inner<'a> {
    buf: Vec<u8>,
    sink: &'a dyn Sink,
    stack: bool,
    exit: bool,
}

impl Inner<'_> {
    #[inline]
    fn key(&mut self, key: &str) {
        self.buf.push(b',');
        escape::append_str(&mut self.buf, key);
        self.buf.push(b':');
    }
}

impl<'a> Event<'a> {
    /// Wraps a buffer holding a record header.
    pub(crate) fn new(buf: Vec<u8>, sink: &'a dyn Sink, fatal: bool) -> Self {
        Self {
            inner: Some(Inner {
                buf,
                sink,
                stack: fatal,
                exit: fatal,
            }),
        }
    }

    /// An event that ignores every call made on it.
    pub const fn disabled() -> Self {
        Self { inner: None }
    }

    /// Returns `false` if the record was filtered out or discarded.
    pub fn enabled(&self) -> bool {
        self.inner.is_some()
    }

    /// Bytes accumulated so far, without the closing brace.
    pub fn as_bytes(&self) -> &[u8] {
        self.inner
            .as_ref()
            .map(|inner| inner.buf.as_slice())
            .unwrap_or_default()
    }

    #[inline]
    fn append(mut self, key: &str, value: impl FnOnce(&mut Vec<u8>)) -> Self {
        if let Some(inner) = self.inner.as_mut() {
            inner.key(key);
            value(&mut inner.buf);
        }
        self
    }

    #[inline]
    fn append_list<T>(
        self,
        key: &str,
        items: &[T],
        mut item: impl FnMut(&mut Vec<u8>, &T),
    ) -> Self {
        self.append(key, |buf| {
            buf.push(b'[');
            for (i, value) in items.iter().enumerate() {
                if i > 0 {
                    buf.push(b',');
                }
                item(buf, value);
            }
            buf.push(b']');
        })
    }

    /// Adds `val` as a string.
    pub fn str(self, key: &str, val: &str) -> Self {
        self.append(key, |buf| escape::append_str(buf, val))
    }

    /// Adds `vals` as an array of strings.
    pub fn strs<S: AsRef<str>>(self, key: &str, vals: &[S]) -> Self {
        self.append_list(key, vals, |buf, s| escape::append_str(buf, s.as_ref()))
    }

    /// Adds raw bytes as a string.
    pub fn bytes(self, key: &str, val: &[u8]) -> Self {
        self.append(key, |buf| escape::append_bytes(buf, val))
    }

    /// Adds `val` as a lower-case hex string.
    pub fn hex(self, key: &str, val: &[u8]) -> Self {
        self.append(key, |buf| {
            buf.push(b'"');
            escape::append_hex(buf, val);
            buf.push(b'"');
        })
    }

    pub fn bool(self, key: &str, b: bool) -> Self {
        self.append(key, |buf| buf.extend_from_slice(bool_literal(b)))
    }

    pub fn bools(self, key: &str, b: &[bool]) -> Self {
        self.append_list(key, b, |buf, &v| buf.extend_from_slice(bool_literal(v)))
    }

    /// Adds a signed integer; narrower integer types widen through [`Into`].
    pub fn int(self, key: &str, i: impl Into<i64>) -> Self {
        let i = i.into();
        self.append(key, |buf| {
            let _ = write!(buf, "{i}");
        })
    }

    pub fn ints(self, key: &str, vals: &[i64]) -> Self {
        self.append_list(key, vals, |buf, i| {
            let _ = write!(buf, "{i}");
        })
    }

    /// Adds an unsigned integer; narrower integer types widen through [`Into`].
    pub fn uint(self, key: &str, i: impl Into<u64>) -> Self {
        let i = i.into();
        self.append(key, |buf| {
            let _ = write!(buf, "{i}");
        })
    }

    pub fn uints(self, key: &str, vals: &[u64]) -> Self {
        self.append_list(key, vals, |buf, i| {
            let _ = write!(buf, "{i}");
        })
    }

    /// Adds a pointer-sized signed integer.
    pub fn isize(self, key: &str, i: isize) -> Self {
        self.append(key, |buf| {
            let _ = write!(buf, "{i}");
        })
    }

    /// Adds a length, index or count.
    pub fn usize(self, key: &str, i: usize) -> Self {
        self.append(key, |buf| {
            let _ = write!(buf, "{i}");
        })
    }

    pub fn usizes(self, key: &str, vals: &[usize]) -> Self {
        self.append_list(key, vals, |buf, i| {
            let _ = write!(buf, "{i}");
        })
    }

    /// Adds `f` with the fewest digits that read back to the same value.
    pub fn float64(self, key: &str, f: f64) -> Self {
        self.append(key, |buf| append_f64(buf, f))
    }

    pub fn floats64(self, key: &str, f: &[f64]) -> Self {
        self.append_list(key, f, |buf, &v| append_f64(buf, v))
    }

    pub fn float32(self, key: &str, f: f32) -> Self {
        self.append(key, |buf| append_f32(buf, f))
    }

    pub fn floats32(self, key: &str, f: &[f32]) -> Self {
        self.append_list(key, f, |buf, &v| append_f32(buf, v))
    }

    /// Adds a duration as a human string such as `"1.5s"` or `"250ms"`.
    pub fn dur(self, key: &str, d: Duration) -> Self {
        self.append(key, |buf| append_quoted_duration(buf, d))
    }

    pub fn durs(self, key: &str, d: &[Duration]) -> Self {
        self.append_list(key, d, |buf, &v| append_quoted_duration(buf, v))
    }

    /// Adds `t` in RFC 3339 form with as many fractional digits as needed.
    pub fn time(self, key: &str, t: jiff::Timestamp) -> Self {
        self.append(key, |buf| append_display(buf, &t))
    }

    /// Adds `t` rendered with a strftime-style pattern, in UTC.
    pub fn time_format(self, key: &str, format: &str, t: jiff::Timestamp) -> Self {
        self.append(key, |buf| append_display(buf, &t.strftime(format)))
    }

    /// Adds the time elapsed from `start` to `t`, or zero if `t` is not later.
    pub fn time_diff(self, key: &str, t: jiff::Timestamp, start: jiff::Timestamp) -> Self {
        let nanos = t.as_nanosecond() - start.as_nanosecond();
        let d = u64::try_from(nanos.max(0)).map_or(Duration::MAX, Duration::from_nanos);
        self.dur(key, d)
    }

    /// Adds the `error` field: `null` for `None`, the error's message otherwise.
    pub fn err(self, err: Option<&dyn Error>) -> Self {
        self.append("error", |buf| append_error(buf, err))
    }

    /// Adds an array of error messages, with `null` for each `None`.
    pub fn errs(self, key: &str, errs: &[Option<&dyn Error>]) -> Self {
        self.append_list(key, errs, |buf, &err| append_error(buf, err))
    }

    /// Adds an address, dotted-quad for IPv4 (including IPv4-mapped IPv6).
    pub fn ip_addr(self, key: &str, ip: IpAddr) -> Self {
        self.append(key, |buf| {
            buf.push(b'"');
            append_ip(buf, ip);
            buf.push(b'"');
        })
    }

    /// Adds a network prefix as `address/length`, with host bits cleared.
    pub fn ip_prefix(self, key: &str, ip: IpAddr, prefix_len: u8) -> Self {
        let network = match ip {
            IpAddr::V4(a) => {
                let len = u32::from(prefix_len.min(32));
                let mask = u32::MAX.checked_shl(32 - len).unwrap_or(0);
                IpAddr::V4(Ipv4Addr::from(u32::from(a) & mask))
            }
            IpAddr::V6(a) => {
                let len = u32::from(prefix_len.min(128));
                let mask = u128::MAX.checked_shl(128 - len).unwrap_or(0);
                IpAddr::V6(Ipv6Addr::from(u128::from(a) & mask))
            }
        };
        let max = if ip.is_ipv4() { 32 } else { 128 };
        self.append(key, |buf| {
            let _ = write!(buf, "\"{network}/{}\"", prefix_len.min(max));
        })
    }

    /// Adds a hardware address as colon-separated hex pairs.
    pub fn mac_addr(self, key: &str, addr: &[u8]) -> Self {
        self.append(key, |buf| {
            buf.push(b'"');
            escape::append_mac(buf, addr);
            buf.push(b'"');
        })
    }

    /// Inserts already encoded JSON verbatim.
    pub fn raw_json(self, key: &str, json: &[u8]) -> Self {
        self.append(key, |buf| buf.extend_from_slice(json))
    }

    /// Adds any serializable value as embedded JSON.
    ///
    /// A value that fails to serialize is recorded as the string
    /// `"marshaling error: <reason>"` instead.
    pub fn interface<T: Serialize + ?Sized>(self, key: &str, value: &T) -> Self {
        self.append(key, |buf| {
            let mut scratch = SCRATCH_POOL.acquire();
            match serde_json::to_writer(&mut scratch, value) {
                Ok(()) => buf.extend_from_slice(&scratch),
                Err(e) => {
                    scratch.clear();
                    let _ = write!(scratch, "marshaling error: {e}");
                    escape::append_bytes(buf, &scratch);
                }
            }
            SCRATCH_POOL.release(scratch);
        })
    }

    /// Adds `"caller":"<file>:<line>"` for the calling location.
    #[track_caller]
    pub fn caller(self) -> Self {
        let location = Location::caller();
        self.append("caller", |buf| append_location(buf, location))
    }

    /// Writes a stack trace after the record when it is finalized.
    pub fn stack(mut self) -> Self {
        if let Some(inner) = self.inner.as_mut() {
            inner.stack = true;
        }
        self
    }

    /// Drops the record without writing it.
    pub fn discard(mut self) -> Self {
        if let Some(inner) = self.inner.take() {
            EVENT_POOL.release(inner.buf);
        }
        self
    }

    /// Finalizes the record with `msg` as the `message` field (omitted when
    /// empty) and writes it to the sink.
    ///
    /// Sink failures are counted by [`write_errors`](crate::write_errors)
    /// and otherwise ignored. A fatal record terminates the process after
    /// the record and stack trace are written.
    pub fn msg(mut self, msg: &str) {
        let Some(mut inner) = self.inner.take() else {
            return;
        };
        if !msg.is_empty() {
            inner.buf.extend_from_slice(b",\"message\":");
            escape::append_str(&mut inner.buf, msg);
        }
        inner.buf.extend_from_slice(b"}\n");
        if inner.sink.write_record(&inner.buf).is_err() {
            note_write_error();
        }
        if inner.stack {
            write_stack(inner.sink);
        }
        if inner.exit {
            terminate();
        }
        EVENT_POOL.release(inner.buf);
    }

    /// Finalizes the record with a formatted message.
    ///
    /// ```
    /// # let logger = linelog::Logger::default();
    /// logger.warn().msgf(format_args!("retrying in {}s", 5));
    /// ```
    pub fn msgf(self, args: fmt::Arguments<'_>) {
        if self.inner.is_none() {
            return;
        }
        if let Some(s) = args.as_str() {
            self.msg(s);
            return;
        }
        let mut scratch = SCRATCH_POOL.acquire();
        let _ = scratch.write_fmt(args);
        self.msg(std::str::from_utf8(&scratch).unwrap_or_default());
        SCRATCH_POOL.release(scratch);
    }
}

impl Drop for Event<'_> {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.take() {
            EVENT_POOL.release(inner.buf);
        }
    }
}

impl fmt::Debug for Event<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("enabled", &self.enabled())
            .field("buf", &String::from_utf8_lossy(self.as_bytes()))
            .finish()
    }
}

const fn bool_literal(b: bool) -> &'static [u8] {
    if b { b"true" } else { b"false" }
}

fn append_f64(buf: &mut Vec<u8>, f: f64) {
    if f.is_finite() {
        let _ = write!(buf, "{f}");
    } else {
        buf.extend_from_slice(non_finite(f.is_nan(), f.is_sign_positive()));
    }
}

fn append_f32(buf: &mut Vec<u8>, f: f32) {
    if f.is_finite() {
        let _ = write!(buf, "{f}");
    } else {
        buf.extend_from_slice(non_finite(f.is_nan(), f.is_sign_positive()));
    }
}

const fn non_finite(nan: bool, positive: bool) -> &'static [u8] {
    match (nan, positive) {
        (true, _) => b"\"NaN\"",
        (false, true) => b"\"+Inf\"",
        (false, false) => b"\"-Inf\"",
    }
}

fn append_quoted_duration(buf: &mut Vec<u8>, d: Duration) {
    buf.push(b'"');
    clock::append_duration(buf, d);
    buf.push(b'"');
}

fn append_ip(buf: &mut Vec<u8>, ip: IpAddr) {
    let v4 = match ip {
        IpAddr::V4(a) => Some(a),
        IpAddr::V6(a) => a.to_ipv4_mapped(),
    };
    let _ = match v4 {
        Some(a) => {
            let [a, b, c, d] = a.octets();
            write!(buf, "{a}.{b}.{c}.{d}")
        }
        None => write!(buf, "{ip}"),
    };
}

fn append_error(buf: &mut Vec<u8>, err: Option<&dyn Error>) {
    match err {
        None => buf.extend_from_slice(b"null"),
        Some(err) => append_display(buf, err),
    }
}

/// Renders `value` through a scratch buffer and appends it quoted.
///
/// A `Display` impl that fails midway leaves whatever it produced so far.
pub(crate) fn append_display(buf: &mut Vec<u8>, value: &dyn fmt::Display) {
    let mut scratch = SCRATCH_POOL.acquire();
    let _ = write!(scratch, "{value}");
    escape::append_bytes(buf, &scratch);
    SCRATCH_POOL.release(scratch);
}

pub(crate) fn append_location(buf: &mut Vec<u8>, location: &Location<'_>) {
    let file = location.file();
    let base = file.rsplit(['/', '\\']).next().unwrap_or(file);
    escape::append_str(buf, base);
    buf.pop();
    let _ = write!(buf, ":{}\"", location.line());
}

fn write_stack(sink: &dyn Sink) {
    let trace = Backtrace::force_capture();
    let thread = std::thread::current();
    let mut scratch = SCRATCH_POOL.acquire();
    let _ = writeln!(
        scratch,
        "stack backtrace of thread '{}':\n{trace}",
        thread.name().unwrap_or("<unnamed>")
    );
    if sink.write_record(&scratch).is_err() {
        note_write_error();
    }
    SCRATCH_POOL.release(scratch);
}

#[cfg(not(test))]
fn terminate() {
    std::process::exit(FATAL_EXIT_STATUS);
}

#[cfg(test)]
thread_local! {
    pub(crate) static TERMINATED: std::cell::Cell<bool> = const { std::cell::Cell::new(false) };
}

#[cfg(test)]
fn terminate() {
    TERMINATED.with(|t| t.set(true));
}
