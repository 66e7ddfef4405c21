//! Logger module
//!
//! Provides logging utilities for the converter service including:
//! - Server lifecycle logging
//! - Access logging
//! - Error and warning logging
//! - File-based logging support

mod format;
pub mod writer;

pub use format::{AccessLogEntry, Level};

use crate::config::Config;
use chrono::Local;
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.log_file.as_deref(),
        Level::parse(&config.logging.level),
    )
}

fn write(level: Level, message: &str) {
    #[cfg(test)]
    capture::record(level, message);

    let line = format::format_line(level, &Local::now(), message);
    match writer::get() {
        Some(w) => w.write(level, &line),
        None => writer::write_console(level, &line),
    }
}

pub fn log_info(message: &str) {
    write(Level::Info, message);
}

pub fn log_warning(message: &str) {
    write(Level::Warn, message);
}

pub fn log_error(message: &str) {
    write(Level::Error, message);
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    log_info(&format!("Started httpserver on {addr}"));
    log_info(&format!("Templates directory: {}", config.templates.dir));
    log_info(&format!("Rates feed: {}", config.upstream.url));
    if let Some(workers) = config.server.workers {
        log_info(&format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = config.logging.log_file {
        log_info(&format!("Log file: {path}"));
    }
}

pub fn log_shutdown() {
    log_info("^C received, shutting down the web server");
}

pub fn log_access(entry: &AccessLogEntry) {
    log_info(&entry.format());
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    log_error(&format!("Failed to serve connection: {err:?}"));
}
