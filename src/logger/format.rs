//! Log line format module
//!
//! Every line is rendered as `#LEVEL [YYYY.MM.DD HH:MM:SS]: message`.
//! Access lines follow the classic `http.server` shape:
//! `$remote_addr - - "$request" $status -`

use chrono::{DateTime, Local};
use std::fmt;

const TIME_FORMAT: &str = "%Y.%m.%d %H:%M:%S";

/// Severity of a log line, ordered from most to least severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Error,
    Warn,
    Info,
}

impl Level {
    /// Parse a configured level name, falling back to `Info`
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "error" => Self::Error,
            "warn" | "warning" => Self::Warn,
            _ => Self::Info,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warn => "WARNING",
            Self::Info => "INFO",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render a single log line
pub fn format_line(level: Level, time: &DateTime<Local>, message: &str) -> String {
    format!("#{level} [{}]: {message}", time.format(TIME_FORMAT))
}

/// Access log entry for one served request
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    /// Client address
    pub remote_addr: String,
    /// HTTP method (GET, POST, etc.)
    pub method: String,
    /// Request URI including the query string
    pub uri: String,
    /// HTTP version as printed by hyper (HTTP/1.1)
    pub http_version: String,
    /// Response status code
    pub status: u16,
}

impl AccessLogEntry {
    pub fn format(&self) -> String {
        format!(
            "{} - - \"{} {} {}\" {} -",
            self.remote_addr, self.method, self.uri, self.http_version, self.status
        )
    }
}
