//! Error types for the benchmark server
//!
//! Every variant is fatal: they are only produced by the linear startup
//! sequence and make the process exit with status 1.

use std::net::SocketAddr;

use thiserror::Error;

/// Result type alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Content length missing, zero or unparsable
    #[error("Bad content length: {0}")]
    BadContentLength(String),

    /// Unrecognized or malformed command line argument
    #[error("Illegal argument: {0}")]
    IllegalArgument(String),

    /// The content buffer could not be reserved
    #[error("Cannot allocate content ({0} bytes)")]
    Allocation(u64),

    /// Two strategies registered for the same path
    #[error("Route already registered: {0}")]
    DuplicateRoute(String),

    /// Listening endpoint could not be bound
    #[error("Cannot bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// Listen address is not a valid socket address
    #[error("Invalid listen address '{0}'")]
    InvalidAddress(String),

    /// Configuration file or environment could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Runtime construction and other I/O failures
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
