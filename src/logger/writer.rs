//! Log writer module
//!
//! Diagnostics always go to stderr. The access log goes to stdout unless a
//! file is configured.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, OnceLock, PoisonError};

/// Global log writer instance
static LOG_WRITER: OnceLock<LogWriter> = OnceLock::new();

/// Access log output target
enum AccessTarget {
    Stdout,
    File(Mutex<File>),
}

/// Thread-safe log writer
pub struct LogWriter {
    access: AccessTarget,
}

impl LogWriter {
    fn new(access_log_file: Option<&str>) -> io::Result<Self> {
        let access = match access_log_file {
            Some(path) => AccessTarget::File(Mutex::new(open_log_file(path)?)),
            None => AccessTarget::Stdout,
        };
        Ok(Self { access })
    }

    /// Write to access log
    pub fn write_access(&self, message: &str) {
        match &self.access {
            AccessTarget::Stdout => {
                let mut out = io::stdout().lock();
                let _ = writeln!(out, "{message}");
            }
            AccessTarget::File(file) => {
                let mut f = file.lock().unwrap_or_else(PoisonError::into_inner);
                let _ = writeln!(f, "{message}");
            }
        }
    }
}

/// Write a diagnostic line to stderr
pub fn write_diagnostic(message: &str) {
    let mut err = io::stderr().lock();
    let _ = writeln!(err, "{message}");
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

/// Initialize the global log writer
///
/// Returns error if the access log file cannot be opened or the writer was
/// already initialized.
pub fn init(access_log_file: Option<&str>) -> io::Result<()> {
    let writer = LogWriter::new(access_log_file)?;
    LOG_WRITER.set(writer).map_err(|_| {
        io::Error::new(
            io::ErrorKind::AlreadyExists,
            "Log writer already initialized",
        )
    })
}

/// Get the global log writer, if initialized
pub fn get() -> Option<&'static LogWriter> {
    LOG_WRITER.get()
}
