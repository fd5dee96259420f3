//! Destinations for finished records.
//!
//! A sink receives one completed record (or a stack dump) per call. It takes
//! `&self`, so sinks shared across threads serialize their own writes; the
//! logger adds no locking around the call.

use std::fs::File;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

static WRITE_ERRORS: AtomicU64 = AtomicU64::new(0);

/// Number of record writes that failed since process start.
///
/// Logging never reports sink failures to the caller; this counter is the
/// only place they surface.
pub fn write_errors() -> u64 {
    WRITE_ERRORS.load(Ordering::Relaxed)
}

pub(crate) fn note_write_error() {
    WRITE_ERRORS.fetch_add(1, Ordering::Relaxed);
}

/// A byte-stream destination for log records.
pub trait Sink: Send + Sync {
    /// Writes `record` in full. The input is never modified.
    fn write_record(&self, record: &[u8]) -> io::Result<()>;
}

/// Process stderr; the destination of loggers without a configured writer.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrSink;

impl Sink for StderrSink {
    fn write_record(&self, record: &[u8]) -> io::Result<()> {
        io::stderr().lock().write_all(record)
    }
}

impl Sink for io::Stderr {
    fn write_record(&self, record: &[u8]) -> io::Result<()> {
        self.lock().write_all(record)
    }
}

impl Sink for io::Stdout {
    fn write_record(&self, record: &[u8]) -> io::Result<()> {
        let mut out = self.lock();
        out.write_all(record)?;
        out.flush()
    }
}

impl Sink for File {
    fn write_record(&self, record: &[u8]) -> io::Result<()> {
        let mut file = self;
        file.write_all(record)
    }
}

impl<W: Write + Send> Sink for Mutex<W> {
    fn write_record(&self, record: &[u8]) -> io::Result<()> {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .write_all(record)
    }
}

impl<S: Sink + ?Sized> Sink for Arc<S> {
    fn write_record(&self, record: &[u8]) -> io::Result<()> {
        (**self).write_record(record)
    }
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn write_record(&self, record: &[u8]) -> io::Result<()> {
        (**self).write_record(record)
    }
}
