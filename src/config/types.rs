// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure, immutable once loaded
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    #[serde(default)]
    pub content: ContentConfig,
    pub http: HttpConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
}

/// Listener and dispatch engine configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Request the accelerated engine backend (`-i`)
    pub accelerate: bool,
    /// Worker threads for the accelerated backend (CPU cores if unset).
    /// Setting it enables acceleration on single-CPU hosts too.
    #[serde(default)]
    pub workers: Option<usize>,
    /// Bounded-run deadline armed when acceleration is active
    pub exit_after_secs: u64,
}

/// Synthetic payload configuration
#[derive(Debug, Default, Deserialize, Clone)]
pub struct ContentConfig {
    /// Payload size in bytes; required and non-zero
    #[serde(default)]
    pub length: Option<u64>,
}

/// HTTP response configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
    pub content_type: String,
    /// Whether zero-copy reference bodies are available
    pub zero_copy: bool,
    pub keep_alive: bool,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
    /// Access log format (common, json, or custom pattern)
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
}

/// Connection handling configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    #[serde(default)]
    pub max_connections: Option<u64>,
    /// Per-connection timeout; 0 disables it
    pub connection_timeout_secs: u64,
}
