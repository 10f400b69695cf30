//! Persistent append-only action log
//!
//! One line per entry: `<RFC3339 timestamp> <LEVEL>: <message>`.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, SecondsFormat};
use serde::{Deserialize, Serialize};

/// Severity of an action log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One action log entry as surfaced to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: String,
}

impl LogRecord {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// Format a log file line.
pub fn format_line(timestamp: DateTime<Local>, record: &LogRecord) -> String {
    format!(
        "{} {}: {}",
        timestamp.to_rfc3339_opts(SecondsFormat::Secs, false),
        record.level,
        record.message
    )
}

/// Appends action records to the log file. Disabled sinks drop records.
#[derive(Debug, Clone, Default)]
pub struct LogSink {
    path: Option<PathBuf>,
}

impl LogSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    pub fn disabled() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Append `record`. A failing log file never fails the action being logged.
    pub fn write(&self, record: &LogRecord) {
        let Some(path) = &self.path else {
            return;
        };
        let line = format_line(Local::now(), record);
        if let Err(e) = vault_fs::io::append_line(path, &line) {
            tracing::warn!(path = %path.display(), error = %e, "Failed to append to action log");
        }
    }
}
