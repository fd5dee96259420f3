//! Integration tests for mixed JSON + non-JSON input.

use crate::linelog;

#[test]
fn json_and_plain_text_mixed() {
    let input = r#"Starting application...
{"level":"info","message":"server started","port":8080}
Plain text log line
{"level":"error","message":"connection failed"}
Shutting down."#;

    let output = linelog()
        .arg("--color=never")
        .write_stdin(input)
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout,
        "Starting application...\n INFO server started port=8080\nPlain text log line\nERROR connection failed\nShutting down."
    );
}

#[test]
fn malformed_json_passthrough() {
    let input = "{\"level\":\"info\",\"message\":\n{not json at all}\n";
    linelog()
        .arg("--color=never")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(input);
}

#[test]
fn json_array_passthrough() {
    linelog()
        .arg("--color=never")
        .write_stdin("[1,2,3]\n")
        .assert()
        .success()
        .stdout("[1,2,3]\n");
}

#[test]
fn blank_lines_preserved() {
    linelog()
        .arg("--color=never")
        .write_stdin("\n\n{\"message\":\"x\"}\n")
        .assert()
        .success()
        .stdout("\n\nx\n");
}

#[test]
fn invalid_utf8_passthrough() {
    let input: &[u8] = b"caf\xe9 au lait\n";
    let output = linelog()
        .arg("--color=never")
        .write_stdin(input)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(output.stdout, input);
}
