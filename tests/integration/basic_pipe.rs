//! Integration tests for basic stdin->stdout piping.

use predicates::prelude::*;

use crate::{SAMPLE, linelog};

#[test]
fn empty_stdin_exits_zero() {
    linelog().write_stdin("").assert().success().stdout("");
}

#[test]
fn single_record_rendered() {
    linelog()
        .args(["--color=never", "--utc"])
        .write_stdin(format!("{SAMPLE}\n"))
        .assert()
        .success()
        .stdout("05:35:54.277  WARN hello foo=bar n=42\n");
}

#[test]
fn record_without_trailing_newline() {
    linelog()
        .args(["--color=never", "--utc"])
        .write_stdin(SAMPLE)
        .assert()
        .success()
        .stdout("05:35:54.277  WARN hello foo=bar n=42\n");
}

#[test]
fn extra_fields_keep_record_order() {
    let input = r#"{"level":"info","message":"test","zebra":"z","alpha":"a","middle":"m"}"#;
    let output = linelog()
        .arg("--color=never")
        .write_stdin(input)
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let zebra_pos = stdout.find("zebra=z").unwrap();
    let alpha_pos = stdout.find("alpha=a").unwrap();
    let middle_pos = stdout.find("middle=m").unwrap();
    assert!(zebra_pos < alpha_pos);
    assert!(alpha_pos < middle_pos);
}

#[test]
fn caller_and_error_columns() {
    let input = r#"{"level":"error","caller":"db.rs:88","error":"timeout","message":"query failed","table":"users"}"#;
    linelog()
        .arg("--color=never")
        .write_stdin(input)
        .assert()
        .success()
        .stdout("ERROR [db.rs:88] query failed error=timeout table=users\n");
}

#[test]
fn numeric_epoch_time() {
    let input = r#"{"time":1562736954277,"level":"info","message":"epoch"}"#;
    linelog()
        .args(["--color=never", "--utc"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("05:35:54.277  INFO epoch"));
}

#[test]
fn custom_time_format_flag() {
    linelog()
        .args(["--color=never", "--utc", "--time-format", "%Y-%m-%d %H:%M"])
        .write_stdin(SAMPLE)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("2019-07-10 05:35  WARN"));
}

#[test]
fn completions_generated() {
    linelog()
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("linelog"));
}

#[test]
fn unknown_flag_fails() {
    linelog().arg("--bogus").assert().failure();
}
