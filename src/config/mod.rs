// Configuration module entry point
// Merges defaults, an optional config file, environment and command line

pub mod cli;
mod types;

use std::net::SocketAddr;

use crate::error::{Error, Result};

// Re-export public types
pub use cli::{parse_args, Args, Invocation};
pub use types::{
    ContentConfig, HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig, Settings,
};

/// Config file looked up when `-c` is not given
pub const DEFAULT_CONFIG_PATH: &str = "bench";

/// Bounded-run deadline used by benchmark harnesses
pub const DEFAULT_EXIT_AFTER_SECS: u64 = 99_999_999;

impl Settings {
    /// Load settings for the given command line.
    pub fn load(args: &Args) -> Result<Self> {
        let path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
        Self::load_from(path, args)
    }

    /// Load configuration from specified file path (without extension),
    /// letting `BENCH_*` variables and then the command line override it.
    pub fn load_from(config_path: &str, args: &Args) -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("server.accelerate", false)?
            .set_default("server.exit_after_secs", DEFAULT_EXIT_AFTER_SECS)?
            .set_default("http.server_name", "bench_http")?
            .set_default("http.content_type", "application/octet-stream")?
            .set_default("http.zero_copy", true)?
            .set_default("http.keep_alive", true)?
            .set_default("logging.access_log", false)?
            .set_default("logging.access_log_format", "common")?
            .set_default("performance.connection_timeout_secs", 0)?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("BENCH")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("server.port", args.port.map(u64::from))?
            .set_override_option("content.length", args.length)?
            .set_override_option("server.accelerate", args.accelerate.then_some(true))?
            .build()?;

        let settings: Self = settings.try_deserialize()?;
        settings.content_length()?;
        Ok(settings)
    }

    /// Validated payload size.
    pub fn content_length(&self) -> Result<u64> {
        match self.content.length {
            Some(0) => Err(Error::BadContentLength("length must be greater than zero".to_string())),
            Some(len) => Ok(len),
            None => Err(Error::BadContentLength("no content length given (use -l)".to_string())),
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse().map_err(|_| Error::InvalidAddress(addr))
    }
}
