//! Logger module
//!
//! Provides logging utilities for the benchmark server including:
//! - Startup diagnostics (routes, payload size, engine backend)
//! - Access logging with multiple formats
//! - Error and warning logging
//!
//! Everything except the access log is written to stderr.

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use std::net::SocketAddr;
use std::time::Duration;

use crate::config::LoggingConfig;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &LoggingConfig) -> std::io::Result<()> {
    writer::init(config.access_log_file.as_deref())
}

fn write_info(message: &str) {
    writer::write_diagnostic(message);
}

fn write_error(message: &str) {
    writer::write_diagnostic(message);
}

fn write_access(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

pub fn log_route(path: &str, description: &str) {
    write_info(&format!("{path} - {description}"));
}

pub fn log_route_unavailable(path: &str) {
    write_info(&format!("{path} - not registered (zero-copy bodies unavailable)"));
}

pub fn log_serving(content_len: usize, port: u16, method: &str) {
    write_info(&format!(
        "Serving {content_len} bytes on port {port} using {method}"
    ));
}

pub fn log_listening(addr: &SocketAddr) {
    write_info(&format!("Listening on: http://{addr}"));
}

pub fn log_bounded_run(deadline: Duration) {
    write_info(&format!(
        "Bounded run: exiting after {} seconds",
        deadline.as_secs()
    ));
}

pub fn log_shutdown(reason: &str) {
    write_info(&format!("Shutting down: {reason}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

/// Fatal startup error, printed right before the process exits
pub fn log_fatal(err: &crate::Error) {
    write_error(&err.to_string());
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_access(&entry.format(format));
}
