//! Integration tests for the TOML config file and its precedence.

use std::io::Write;

use predicates::prelude::*;

use crate::{SAMPLE, linelog};

fn config_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn config_file_sets_format_and_zone() {
    let file = config_file("time_format = \"%H:%M\"\ntime_zone = \"utc\"\ncolor = \"never\"\n");
    linelog()
        .arg("--config")
        .arg(file.path())
        .write_stdin(SAMPLE)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("05:35  WARN hello"));
}

#[test]
fn flags_override_config_file() {
    let file = config_file("time_format = \"%H:%M\"\ncolor = \"always\"\n");
    let output = linelog()
        .arg("--config")
        .arg(file.path())
        .args(["--color=never", "--utc", "--time-format", "%H:%M:%S"])
        .write_stdin(SAMPLE)
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("05:35:54  WARN"), "got {stdout:?}");
    assert!(!stdout.contains("\x1b["));
}

#[test]
fn default_config_location_is_read() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("linelog")).unwrap();
    std::fs::write(
        dir.path().join("linelog").join("config.toml"),
        "time_format = \"[%S]\"\ntime_zone = \"utc\"\n",
    )
    .unwrap();
    linelog()
        .env("XDG_CONFIG_HOME", dir.path())
        .arg("--color=never")
        .write_stdin(SAMPLE)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[54]  WARN"));
}

#[test]
fn missing_config_file_exits_one() {
    linelog()
        .args(["--config", "/nonexistent/linelog/config.toml"])
        .write_stdin(SAMPLE)
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("linelog: configuration error"));
}

#[test]
fn malformed_config_file_exits_one() {
    let file = config_file("color = [unterminated\n");
    linelog()
        .arg("--config")
        .arg(file.path())
        .write_stdin(SAMPLE)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("config file error"));
}

#[test]
fn unknown_time_zone_exits_one() {
    let file = config_file("time_zone = \"Mars/Olympus_Mons\"\n");
    linelog()
        .arg("--config")
        .arg(file.path())
        .write_stdin(SAMPLE)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown time zone"));
}
