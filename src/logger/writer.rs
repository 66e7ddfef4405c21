//! Log writer module
//!
//! Provides thread-safe log writing to a file or stdout/stderr.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, OnceLock};

use super::format::Level;

/// Global log writer instance
static LOG_WRITER: OnceLock<LogWriter> = OnceLock::new();

/// Log output target
enum LogTarget {
    /// Info to stdout, warnings and errors to stderr
    Console,
    /// Everything to one file
    File(Mutex<File>),
}

/// Thread-safe log writer
pub struct LogWriter {
    target: LogTarget,
    max_level: Level,
}

impl LogWriter {
    /// Create a new log writer with an optional file path
    fn new(log_file: Option<&str>, max_level: Level) -> io::Result<Self> {
        let target = match log_file {
            Some(path) => LogTarget::File(Mutex::new(open_log_file(path)?)),
            None => LogTarget::Console,
        };

        Ok(Self { target, max_level })
    }

    pub fn enabled(&self, level: Level) -> bool {
        level <= self.max_level
    }

    /// Write an already formatted line if its level passes the filter
    pub fn write(&self, level: Level, line: &str) {
        if !self.enabled(level) {
            return;
        }
        match &self.target {
            LogTarget::Console => write_console(level, line),
            LogTarget::File(file) => {
                if let Ok(mut f) = file.lock() {
                    let _ = writeln!(f, "{line}");
                }
            }
        }
    }
}

/// Open or create a log file for appending
fn open_log_file(path: &str) -> io::Result<File> {
    // Create parent directories if they don't exist
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    OpenOptions::new().create(true).append(true).open(path)
}

pub fn write_console(level: Level, line: &str) {
    match level {
        Level::Info => println!("{line}"),
        Level::Warn | Level::Error => eprintln!("{line}"),
    }
}

/// Initialize the global log writer
///
/// This should be called once at application startup.
/// Returns error if the log file cannot be opened.
pub fn init(log_file: Option<&str>, max_level: Level) -> io::Result<()> {
    let writer = LogWriter::new(log_file, max_level)?;
    LOG_WRITER.set(writer).map_err(|_| {
        io::Error::new(
            io::ErrorKind::AlreadyExists,
            "Log writer already initialized",
        )
    })
}

/// Get the global log writer, if `init()` has been called
pub fn get() -> Option<&'static LogWriter> {
    LOG_WRITER.get()
}
