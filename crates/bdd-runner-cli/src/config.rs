//! Run configuration parsed from environment variables.
//!
//! Every setting can be supplied through a `BDD_RUNNER_` environment
//! variable and overridden on the command line.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::CliError;

/// Log level enumeration matching tracing crate levels.
///
/// Defaults to `Warn` so reports on stdout are not interleaved with chatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Most verbose logging, includes all trace spans.
    Trace,
    /// Debug-level information, such as scenario selection.
    Debug,
    /// Standard informational messages.
    Info,
    /// Warning messages, such as a line filter that matched nothing.
    #[default]
    Warn,
    /// Error messages for failures.
    Error,
}

impl FromStr for LogLevel {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(CliError::InvalidConfig(format!(
                "unknown log level '{s}', expected one of: trace, debug, info, warn, error"
            ))),
        }
    }
}

impl LogLevel {
    /// Convert to a tracing filter directive string.
    #[must_use]
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Report format written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable progress and summary.
    #[default]
    Text,
    /// A single JSON document written when the run finishes.
    Json,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(CliError::InvalidConfig(format!(
                "unknown format '{s}', expected one of: text, json"
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Json => "json",
        })
    }
}

/// Directory searched for `.feature` files when no identifiers are given.
pub const DEFAULT_FEATURES_DIR: &str = "features";

fn parse_env_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "1" | "true" | "TRUE" | "True" | "yes" | "YES" | "Yes" | "on" | "ON" | "On" => Some(true),
        "0" | "false" | "FALSE" | "False" | "no" | "NO" | "No" | "off" | "OFF" | "Off" => {
            Some(false)
        }
        _ => None,
    }
}

/// Configuration for a command line run.
///
/// # Environment Variables
///
/// - `BDD_RUNNER_LOG_LEVEL`: log level (trace, debug, info, warn, error)
/// - `BDD_RUNNER_FORMAT`: report format (text, json)
/// - `BDD_RUNNER_FAIL_FAST`: stop after the first failing feature
/// - `BDD_RUNNER_FEATURES_DIR`: directory searched for `.feature` files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: LogLevel,
    /// Report format.
    pub format: OutputFormat,
    /// Stop after the first failing feature.
    pub fail_fast: bool,
    /// Directory searched when no identifiers are supplied.
    pub features_dir: PathBuf,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            format: OutputFormat::default(),
            fail_fast: false,
            features_dir: PathBuf::from(DEFAULT_FEATURES_DIR),
        }
    }
}

impl RunnerConfig {
    /// Load configuration from the process environment.
    ///
    /// Falls back to defaults for missing values.
    ///
    /// # Errors
    ///
    /// Returns `CliError::InvalidConfig` if an environment variable contains
    /// an invalid value.
    pub fn from_env() -> Result<Self, CliError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns `CliError::InvalidConfig` if a value cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CliError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let log_level = match lookup("BDD_RUNNER_LOG_LEVEL") {
            Some(val) => val.parse()?,
            None => defaults.log_level,
        };

        let format = match lookup("BDD_RUNNER_FORMAT") {
            Some(val) => val.parse()?,
            None => defaults.format,
        };

        let fail_fast = match lookup("BDD_RUNNER_FAIL_FAST") {
            Some(val) => parse_env_bool(&val).ok_or_else(|| {
                CliError::InvalidConfig(format!(
                    "invalid fail-fast value '{val}', expected a boolean such as true or false"
                ))
            })?,
            None => defaults.fail_fast,
        };

        let features_dir = lookup("BDD_RUNNER_FEATURES_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map_or(defaults.features_dir, PathBuf::from);

        Ok(Self {
            log_level,
            format,
            fail_fast,
            features_dir,
        })
    }

    /// Apply optional overrides to an existing configuration.
    ///
    /// Command line values take precedence over the environment.
    #[must_use]
    pub fn apply_overrides(
        mut self,
        log_level: Option<LogLevel>,
        format: Option<OutputFormat>,
        fail_fast: Option<bool>,
        features_dir: Option<PathBuf>,
    ) -> Self {
        if let Some(level) = log_level {
            self.log_level = level;
        }
        if let Some(format) = format {
            self.format = format;
        }
        if let Some(enabled) = fail_fast {
            self.fail_fast = enabled;
        }
        if let Some(dir) = features_dir {
            self.features_dir = dir;
        }
        self
    }

    /// Create a new configuration with the specified log level.
    #[must_use]
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }
}
