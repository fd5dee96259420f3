//! Configuration management with TOML file support.
//!
//! Merges settings from three sources (highest precedence first):
//! 1. CLI flags
//! 2. Config file (`~/.config/linelog/config.toml` or `$XDG_CONFIG_HOME/linelog/config.toml`)
//! 3. Built-in defaults

use std::path::{Path, PathBuf};

use jiff::tz::TimeZone;
use serde::Deserialize;

use crate::cli::{Cli, ColorMode};
use crate::console::DEFAULT_TIME_FORMAT;
use crate::error::LinelogError;

/// Runtime configuration of the `linelog` binary.
///
/// Use [`Config::from_cli`] to build from parsed CLI arguments, or
/// [`Config::default`] for built-in defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Color output mode (auto/always/never).
    pub color_mode: ColorMode,
    /// strftime-style pattern for the time column.
    pub time_format: String,
    /// Zone the time column is shown in.
    pub time_zone: TimeZone,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            color_mode: ColorMode::Auto,
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            time_zone: TimeZone::system(),
        }
    }
}

impl Config {
    /// Build a [`Config`] from CLI arguments, loading the config file if present.
    ///
    /// An explicit `--config` path must exist; the default path is optional.
    pub fn from_cli(cli: &Cli) -> Result<Self, LinelogError> {
        let mut config = Self::default();

        match &cli.config {
            Some(path) => config.apply_file_config(FileConfig::load(path)?)?,
            None => {
                let path = Self::default_config_path();
                if path.exists() {
                    config.apply_file_config(FileConfig::load(&path)?)?;
                }
            }
        }

        if let Some(color) = cli.color {
            config.color_mode = color;
        }
        if let Some(format) = &cli.time_format {
            config.time_format.clone_from(format);
        }
        if cli.utc {
            config.time_zone = TimeZone::UTC;
        }

        Ok(config)
    }

    /// Default config file path: `$XDG_CONFIG_HOME/linelog/config.toml` or `~/.config/linelog/config.toml`.
    fn default_config_path() -> PathBuf {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(xdg).join("linelog").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("linelog")
                .join("config.toml")
        } else {
            PathBuf::from(".config/linelog/config.toml")
        }
    }

    fn apply_file_config(&mut self, file: FileConfig) -> Result<(), LinelogError> {
        if let Some(color) = file.color {
            self.color_mode = ColorMode::from_config(&color);
        }
        if let Some(format) = file.time_format {
            self.time_format = format;
        }
        if let Some(zone) = file.time_zone {
            self.time_zone = parse_time_zone(&zone)?;
        }
        Ok(())
    }
}

/// `local`, `utc`, or an IANA zone name such as `Europe/Berlin`.
pub fn parse_time_zone(name: &str) -> Result<TimeZone, LinelogError> {
    match name.to_ascii_lowercase().as_str() {
        "local" => Ok(TimeZone::system()),
        "utc" => Ok(TimeZone::UTC),
        _ => TimeZone::get(name)
            .map_err(|e| LinelogError::Config(format!("unknown time zone '{name}': {e}"))),
    }
}

/// Config file structure (TOML deserialization).
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    color: Option<String>,
    time_format: Option<String>,
    time_zone: Option<String>,
}

impl FileConfig {
    fn load(path: &Path) -> Result<Self, LinelogError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            LinelogError::Config(format!("cannot read config file {}: {e}", path.display()))
        })?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }
}
