//! Logger configuration, the level gate, and record headers.
//!
//! A [`Logger`] decides whether a record is built at all and, if so, writes
//! the header every record starts with:
//!
//! ```text
//! {"time":"2019-07-10T05:35:54.277Z","level":"info"[,"<host_field>":"<hostname>"][,"caller":"main.rs:12"]
//! ```

use std::fmt;
use std::panic::Location;
use std::sync::OnceLock;

use crate::clock;
use crate::escape;
use crate::event::{self, Event};
use crate::level::{AtomicLevel, Level};
use crate::pool::EVENT_POOL;
use crate::sink::{Sink, StderrSink};

static DEFAULT_SINK: StderrSink = StderrSink;

/// Generates JSON line records and writes them to a [`Sink`].
///
/// Only the minimum level may change after construction (through
/// [`set_level`](Self::set_level)); the remaining fields are read
/// concurrently by every logging call.
///
/// ```
/// use linelog::{Level, Logger};
///
/// let logger = Logger {
///     level: Level::Info.into(),
///     host_field: "host".to_string(),
///     ..Logger::default()
/// };
/// logger.info().str("foo", "bar").int("n", 42).msg("hello");
/// ```
pub struct Logger {
    /// Records below this level are never built.
    pub level: AtomicLevel,
    /// Add `"caller":"<file>:<line>"` to every record.
    pub caller: bool,
    /// Write the time as an integer millisecond epoch. Takes priority over
    /// [`time_field`](Self::time_field) and [`time_format`](Self::time_format).
    pub timestamp: bool,
    /// Name of the time field; `"time"` when empty.
    pub time_field: String,
    /// strftime-style pattern for the time field, rendered in the local
    /// zone. Empty selects `YYYY-MM-DDTHH:MM:SS.mmmZ` in UTC.
    pub time_format: String,
    /// Name of the hostname field; the field is omitted when empty.
    pub host_field: String,
    /// Destination of finished records; stderr when `None`.
    pub writer: Option<Box<dyn Sink>>,
    /// Clock consulted once per record.
    pub now: fn() -> jiff::Timestamp,
}

impl Default for Logger {
    fn default() -> Self {
        Self {
            level: AtomicLevel::new(Level::Debug),
            caller: false,
            timestamp: false,
            time_field: String::new(),
            time_format: String::new(),
            host_field: String::new(),
            writer: None,
            now: jiff::Timestamp::now,
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level.load())
            .field("caller", &self.caller)
            .field("timestamp", &self.timestamp)
            .field("time_field", &self.time_field)
            .field("time_format", &self.time_format)
            .field("host_field", &self.host_field)
            .field("writer", &self.writer.as_ref().map(|_| "<sink>"))
            .finish_non_exhaustive()
    }
}

impl Logger {
    /// Changes the minimum level. Safe to call while other threads log.
    pub fn set_level(&self, level: Level) {
        self.level.store(level);
    }

    /// Current minimum level.
    pub fn level(&self) -> Level {
        self.level.load()
    }

    #[track_caller]
    pub fn debug(&self) -> Event<'_> {
        self.with_level(Level::Debug)
    }

    #[track_caller]
    pub fn info(&self) -> Event<'_> {
        self.with_level(Level::Info)
    }

    #[track_caller]
    pub fn warn(&self) -> Event<'_> {
        self.with_level(Level::Warn)
    }

    #[track_caller]
    pub fn error(&self) -> Event<'_> {
        self.with_level(Level::Error)
    }

    /// Starts a fatal record. Finalizing it dumps the stack and exits the
    /// process with [`FATAL_EXIT_STATUS`](crate::FATAL_EXIT_STATUS).
    #[track_caller]
    pub fn fatal(&self) -> Event<'_> {
        self.with_level(Level::Fatal)
    }

    /// Starts a record at `level`, or a disabled event if `level` is below
    /// the minimum.
    #[track_caller]
    pub fn with_level(&self, level: Level) -> Event<'_> {
        let location = Location::caller();
        self.header(level, self.caller.then_some(location))
    }

    /// Writes a message-only record at the logger's own minimum level.
    #[track_caller]
    pub fn print(&self, args: fmt::Arguments<'_>) {
        self.with_level(self.level()).msgf(args);
    }

    fn sink(&self) -> &dyn Sink {
        match &self.writer {
            Some(writer) => writer.as_ref(),
            None => &DEFAULT_SINK,
        }
    }

    fn header(&self, level: Level, caller: Option<&Location<'_>>) -> Event<'_> {
        if level < self.level.load() {
            return Event::disabled();
        }
        let mut buf = EVENT_POOL.acquire();
        let now = (self.now)();
        let (secs, nanos) = clock::normalize(now.as_second(), now.subsec_nanosecond());

        if self.timestamp {
            buf.extend_from_slice(b"{\"time\":");
            clock::append_epoch_millis(&mut buf, secs, nanos);
        } else {
            if self.time_field.is_empty() {
                buf.extend_from_slice(b"{\"time\":");
            } else {
                buf.push(b'{');
                escape::append_str(&mut buf, &self.time_field);
                buf.push(b':');
            }
            if self.time_format.is_empty() {
                clock::append_rfc3339_millis(&mut buf, secs, nanos);
            } else {
                let local = now.to_zoned(jiff::tz::TimeZone::system());
                event::append_display(&mut buf, &local.strftime(&self.time_format));
            }
        }

        buf.extend_from_slice(b",\"level\":\"");
        buf.extend_from_slice(level.as_str().as_bytes());
        buf.push(b'"');

        if !self.host_field.is_empty() {
            buf.push(b',');
            escape::append_str(&mut buf, &self.host_field);
            buf.push(b':');
            escape::append_str(&mut buf, hostname());
        }

        if let Some(location) = caller {
            buf.extend_from_slice(b",\"caller\":");
            event::append_location(&mut buf, location);
        }

        Event::new(buf, self.sink(), level == Level::Fatal)
    }
}

/// Name of this machine, resolved once per process.
pub fn hostname() -> &'static str {
    static HOSTNAME: OnceLock<String> = OnceLock::new();
    HOSTNAME.get_or_init(resolve_hostname)
}

#[cfg(unix)]
fn resolve_hostname() -> String {
    let mut buf = [0u8; 256];
    let rc = unsafe { libc::gethostname(buf.as_mut_ptr().cast(), buf.len()) };
    if rc != 0 {
        return String::new();
    }
    let len = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    String::from_utf8_lossy(&buf[..len]).into_owned()
}

#[cfg(not(unix))]
fn resolve_hostname() -> String {
    std::env::var("COMPUTERNAME").unwrap_or_default()
}

static DEFAULT_LOGGER: OnceLock<Logger> = OnceLock::new();

/// The process-wide logger used by [`debug`], [`info`], and friends.
///
/// Built on first use with [`Logger::default`] unless
/// [`set_default_logger`] ran before.
pub fn default_logger() -> &'static Logger {
    DEFAULT_LOGGER.get_or_init(Logger::default)
}

/// Installs the process-wide logger.
///
/// Fails, handing the logger back, once the default logger is in use.
pub fn set_default_logger(logger: Logger) -> Result<(), Logger> {
    DEFAULT_LOGGER.set(logger)
}

#[track_caller]
pub fn debug() -> Event<'static> {
    default_logger().debug()
}

#[track_caller]
pub fn info() -> Event<'static> {
    default_logger().info()
}

#[track_caller]
pub fn warn() -> Event<'static> {
    default_logger().warn()
}

#[track_caller]
pub fn error() -> Event<'static> {
    default_logger().error()
}

#[track_caller]
pub fn fatal() -> Event<'static> {
    default_logger().fatal()
}

/// Writes a message-only record through the default logger.
#[track_caller]
pub fn print(args: fmt::Arguments<'_>) {
    default_logger().print(args);
}
