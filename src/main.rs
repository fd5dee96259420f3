use std::io::{self, BufRead, BufWriter};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};

use linelog::cli::{Cli, ColorMode};
use linelog::config::Config;
use linelog::{ConsoleWriter, LinelogError, Sink};

fn main() -> ExitCode {
    // Reset SIGPIPE to default behavior so upstream writers get a clean
    // SIGPIPE signal instead of a BrokenPipeError when linelog exits early.
    reset_sigpipe();

    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "linelog", &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(LinelogError::Io(e)) if e.kind() == io::ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("linelog: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(cli: &Cli) -> Result<(), LinelogError> {
    let config = Config::from_cli(cli)?;

    let mut console = ConsoleWriter::new(BufWriter::new(io::stdout()));
    console.ansi_color = resolve_color_mode(config.color_mode);
    console.time_format = config.time_format;
    console.time_zone = config.time_zone;

    let mut reader = io::stdin().lock();
    let mut line = Vec::with_capacity(1024);
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            return Ok(());
        }
        console.write_record(&line)?;
    }
}

fn resolve_color_mode(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            if !stdout_is_terminal() {
                return false;
            }
            if std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
                return false;
            }
            if std::env::var("TERM").is_ok_and(|v| v == "dumb") {
                return false;
            }
            true
        }
    }
}

#[cfg(unix)]
fn stdout_is_terminal() -> bool {
    use std::os::fd::AsRawFd;

    linelog::is_terminal(io::stdout().as_raw_fd())
}

#[cfg(not(unix))]
fn stdout_is_terminal() -> bool {
    use std::io::IsTerminal;

    io::stdout().is_terminal()
}

/// Reset SIGPIPE to the default (terminate) behavior.
///
/// Rust ignores SIGPIPE so that writes surface `BrokenPipe` errors. For a
/// filter at the end of a pipeline that only makes the upstream writer see
/// an error when `linelog` exits; `SIG_DFL` lets the OS handle it normally.
#[cfg(unix)]
fn reset_sigpipe() {
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}

#[cfg(not(unix))]
fn reset_sigpipe() {}
