//! A sink that pretty-prints wire records for humans.
//!
//! [`ConsoleWriter`] accepts encoder output (or any bytes), renders every
//! JSON object it finds as one aligned line, and writes everything else
//! through untouched.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use jiff::tz::TimeZone;

use crate::formatter::{self, Layout};
use crate::parser::{self, Chunk};
use crate::pool::SCRATCH_POOL;
use crate::sink::Sink;

/// Default pattern for the time column.
pub const DEFAULT_TIME_FORMAT: &str = "%H:%M:%S%.3f";

/// Renders wire records to an underlying writer.
///
/// ```
/// use linelog::{ConsoleWriter, Logger};
///
/// let mut console = ConsoleWriter::new(std::io::stdout());
/// console.ansi_color = linelog::is_terminal(1);
/// let logger = Logger {
///     writer: Some(Box::new(console)),
///     ..Logger::default()
/// };
/// logger.info().str("foo", "bar").msg("hello");
/// ```
pub struct ConsoleWriter<W> {
    /// Wrap columns in ANSI styles.
    pub ansi_color: bool,
    /// strftime-style pattern for the time column.
    pub time_format: String,
    /// Zone the time column is shown in.
    pub time_zone: TimeZone,
    writer: Mutex<W>,
}

impl<W> ConsoleWriter<W> {
    /// Colors off, [`DEFAULT_TIME_FORMAT`], system time zone.
    pub fn new(writer: W) -> Self {
        Self {
            ansi_color: false,
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            time_zone: TimeZone::system(),
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Renders `input` into `out` without writing it anywhere.
    pub fn render(&self, input: &[u8], out: &mut Vec<u8>) {
        let layout = Layout {
            ansi_color: self.ansi_color,
            time_format: &self.time_format,
            time_zone: &self.time_zone,
        };
        let mut line = String::new();
        for chunk in parser::parse_chunks(input) {
            match chunk {
                Chunk::Record(record) => {
                    line.clear();
                    formatter::render_record(&record, &layout, &mut line);
                    out.extend_from_slice(line.as_bytes());
                }
                Chunk::Raw(raw) => out.extend_from_slice(raw),
            }
        }
    }
}

/// Reports whether `fd` refers to an interactive terminal.
#[cfg(unix)]
pub fn is_terminal(fd: std::os::fd::RawFd) -> bool {
    unsafe { libc::isatty(fd) == 1 }
}

/// Reports whether `fd` refers to an interactive terminal.
#[cfg(not(unix))]
pub fn is_terminal(_fd: i32) -> bool {
    false
}

impl<W: Write + Send> Sink for ConsoleWriter<W> {
    fn write_record(&self, record: &[u8]) -> io::Result<()> {
        let mut out = Vec::with_capacity(record.len() + 32);
        self.render(record, &mut out);
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writer.write_all(&out)?;
        writer.flush()
    }
}

impl<W: Write + Send> Write for ConsoleWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_record(buf)?;
        Ok(buf.len())
    }

    /// Formats the whole of `args` before parsing, so `write!` hands over
    /// one record instead of one fragment per argument.
    fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> io::Result<()> {
        let mut scratch = SCRATCH_POOL.acquire();
        let result = scratch
            .write_fmt(args)
            .and_then(|()| self.write_record(&scratch));
        SCRATCH_POOL.release(scratch);
        result
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .flush()
    }
}

impl<W> fmt::Debug for ConsoleWriter<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleWriter")
            .field("ansi_color", &self.ansi_color)
            .field("time_format", &self.time_format)
            .field("time_zone", &self.time_zone)
            .finish_non_exhaustive()
    }
}
