//! Integration tests for color control: `NO_COLOR`, --color flag, `TERM`.

use crate::{SAMPLE, linelog};

fn stdout_of(cmd: &mut assert_cmd::Command) -> String {
    let output = cmd.write_stdin(SAMPLE).output().unwrap();
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn color_never_disables_ansi() {
    let stdout = stdout_of(linelog().arg("--color=never"));
    assert!(!stdout.contains("\x1b["));
}

#[test]
fn color_always_enables_ansi() {
    let stdout = stdout_of(linelog().arg("--color=always"));
    assert!(stdout.contains("\x1b["));
    assert!(stdout.contains("hello"));
}

#[test]
fn color_always_overrides_no_color() {
    let stdout = stdout_of(linelog().arg("--color=always").env("NO_COLOR", "1"));
    assert!(stdout.contains("\x1b["));
}

#[test]
fn piped_stdout_disables_colors_by_default() {
    let stdout = stdout_of(&mut linelog());
    assert!(!stdout.contains("\x1b["));
}

#[test]
fn term_dumb_disables_colors() {
    let stdout = stdout_of(linelog().env("TERM", "dumb"));
    assert!(!stdout.contains("\x1b["));
}

#[test]
fn plain_text_never_colored() {
    linelog()
        .arg("--color=always")
        .write_stdin("a long long long long plain text")
        .assert()
        .success()
        .stdout("a long long long long plain text");
}
