//! `linelog`: a structured logger that writes one JSON object per line, and a
//! console writer that renders those lines for humans.
//!
//! Records are built by chaining typed field appends on an [`Event`] and
//! finished with [`Event::msg`]. Events below the logger's level are inert
//! values, so call sites never branch on whether logging is enabled.
//!
//! # Example
//!
//! ```
//! use std::sync::{Arc, Mutex};
//!
//! use linelog::{Level, Logger};
//!
//! let out = Arc::new(Mutex::new(Vec::new()));
//! let logger = Logger {
//!     level: Level::Info.into(),
//!     writer: Some(Box::new(Arc::clone(&out))),
//!     ..Logger::default()
//! };
//!
//! logger.info().str("foo", "bar").int("n", 42).msg("hello");
//! logger.debug().str("dropped", "yes").msg("below the level");
//!
//! let line = String::from_utf8(out.lock().unwrap().clone()).unwrap();
//! assert!(line.ends_with("\"level\":\"info\",\"foo\":\"bar\",\"n\":42,\"message\":\"hello\"}\n"));
//! ```

pub mod cli;
pub mod config;
pub mod console;
pub mod error;
pub mod event;
pub mod fields;
pub mod formatter;
pub mod level;
pub mod logger;
pub mod parser;
pub mod pool;
pub mod sink;
pub mod timestamp;

mod clock;
mod escape;

// Re-export primary API types for convenience.
pub use console::{ConsoleWriter, is_terminal};
pub use error::LinelogError;
pub use event::{Event, FATAL_EXIT_STATUS};
pub use level::{AtomicLevel, Level, ParseLevelError};
pub use logger::{
    Logger, debug, default_logger, error, fatal, hostname, info, print, set_default_logger, warn,
};
pub use pool::BufferPool;
pub use sink::{Sink, StderrSink, write_errors};
