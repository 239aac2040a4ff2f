//! Log sink setup
//!
//! The client itself only emits `tracing` events (method, path, parameters,
//! status, timing). Applications that want those events written somewhere
//! call [`init_logging`] once at startup.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Where log output goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogSink {
    /// Standard output
    #[default]
    Stdout,
    /// Standard error
    Stderr,
    /// Append to the file at `LogConfig::path`
    File,
}

/// Log sink configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Output destination
    #[serde(default)]
    pub sink: LogSink,
    /// File path, required for `LogSink::File`
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Filter directive, e.g. `info` or `yclients_api=debug`
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            sink: LogSink::default(),
            path: None,
            level: default_level(),
        }
    }
}

impl LogConfig {
    /// Log to a file
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            sink: LogSink::File,
            path: Some(path.into()),
            level: default_level(),
        }
    }

    /// Set the filter directive
    #[must_use]
    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Build the filter; `RUST_LOG` wins over the configured level
    pub fn filter(&self) -> Result<EnvFilter> {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.level))
            .map_err(|e| Error::config(format!("invalid log level '{}': {e}", self.level)))
    }
}

/// Install a global `tracing` subscriber for the configured sink.
///
/// Fails if the sink cannot be opened or a global subscriber is already set.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let filter = config.filter()?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = match config.sink {
        LogSink::Stdout => builder.with_writer(std::io::stdout).try_init(),
        LogSink::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogSink::File => {
            let path = config
                .path
                .as_ref()
                .ok_or_else(|| Error::config("log.path is required for the file sink"))?;
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };

    installed.map_err(|e| Error::config(format!("failed to install log subscriber: {e}")))
}
