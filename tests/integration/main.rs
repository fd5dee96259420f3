//! Integration tests for the `linelog` binary and the public library API.

mod basic_pipe;
mod color_control;
mod config_custom;
mod logger_pipeline;
mod mixed_input;

use assert_cmd::Command;

/// The `linelog` binary with the user's config file out of the way.
#[allow(deprecated)]
pub fn linelog() -> Command {
    let mut cmd = Command::cargo_bin("linelog").unwrap();
    cmd.env("XDG_CONFIG_HOME", "/tmp/linelog-test-no-config");
    cmd.env_remove("NO_COLOR");
    cmd
}

pub const SAMPLE: &str = r#"{"time":"2019-07-10T05:35:54.277Z","level":"warning","foo":"bar","n":42,"message":"hello"}"#;
