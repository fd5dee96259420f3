//! Library-level tests: records produced by `Logger` and read back through
//! a JSON parser and the console writer.

use std::net::{IpAddr, Ipv4Addr};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use jiff::tz::TimeZone;
use serde_json::{Value, json};

use linelog::{ConsoleWriter, Level, Logger};

fn fixed_now() -> jiff::Timestamp {
    jiff::Timestamp::new(1_562_736_954, 277_000_000).unwrap()
}

fn capture() -> (Logger, Arc<Mutex<Vec<u8>>>) {
    let out = Arc::new(Mutex::new(Vec::new()));
    let logger = Logger {
        level: Level::Info.into(),
        writer: Some(Box::new(Arc::clone(&out))),
        now: fixed_now,
        ..Logger::default()
    };
    (logger, out)
}

fn lines(out: &Arc<Mutex<Vec<u8>>>) -> Vec<Value> {
    let bytes = out.lock().unwrap().clone();
    String::from_utf8(bytes)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[test]
fn end_to_end_wire_line() {
    let (logger, out) = capture();
    logger.info().str("foo", "bar").int("n", 42).msg("hello");
    assert_eq!(
        out.lock().unwrap().as_slice(),
        b"{\"time\":\"2019-07-10T05:35:54.277Z\",\"level\":\"info\",\"foo\":\"bar\",\"n\":42,\"message\":\"hello\"}\n"
    );
}

#[test]
fn typed_fields_parse_back() {
    let (logger, out) = capture();
    logger
        .warn()
        .str("s", "quote \" slash \\ lt < apos ' nl \n")
        .uint("u", u64::MAX)
        .int("i", i64::MIN)
        .float64("f", 0.1)
        .bool("b", true)
        .dur("d", Duration::from_millis(1500))
        .ip_addr("ip", IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)))
        .strs("list", &["a", "b"])
        .interface("obj", &json!({"k": [1, 2]}))
        .msg("typed");
    let v = &lines(&out)[0];
    assert_eq!(v["s"], "quote \" slash \\ lt < apos ' nl \n");
    assert_eq!(v["u"], u64::MAX);
    assert_eq!(v["i"], i64::MIN);
    assert_eq!(v["f"], 0.1);
    assert_eq!(v["b"], true);
    assert_eq!(v["d"], "1.5s");
    assert_eq!(v["ip"], "10.0.0.1");
    assert_eq!(v["list"], json!(["a", "b"]));
    assert_eq!(v["obj"], json!({"k": [1, 2]}));
    assert_eq!(v["message"], "typed");
}

#[test]
fn filtered_levels_write_nothing() {
    let (logger, out) = capture();
    logger.debug().str("a", "b").msg("hidden");
    assert!(out.lock().unwrap().is_empty());
}

#[test]
fn logger_output_through_console_writer() {
    let out = Arc::new(Mutex::new(Vec::new()));
    let mut console = ConsoleWriter::new(SharedBuf(Arc::clone(&out)));
    console.time_zone = TimeZone::UTC;
    let logger = Logger {
        caller: false,
        writer: Some(Box::new(console)),
        now: fixed_now,
        ..Logger::default()
    };
    let err = std::io::Error::other("disk full");
    logger
        .error()
        .err(Some(&err))
        .str("path", "/var/log")
        .msg("write failed");
    let text = String::from_utf8(out.lock().unwrap().clone()).unwrap();
    assert_eq!(
        text,
        "05:35:54.277 ERROR write failed error=\"disk full\" path=/var/log\n"
    );
}

struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
