//! Access log format module
//!
//! Supported formats:
//! - `common` (Common Log Format, with the serving strategy appended)
//! - `json` (one JSON object per line)
//! - Custom patterns with `$variables`

use chrono::Local;

/// One served request
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    pub remote_addr: String,
    pub time: chrono::DateTime<Local>,
    pub method: String,
    pub path: String,
    /// HTTP version without the `HTTP/` prefix
    pub http_version: String,
    pub status: u16,
    pub body_bytes: usize,
    /// Strategy that produced the body, `None` for unregistered paths
    pub strategy: Option<&'static str>,
    pub request_time_us: u64,
}

impl AccessLogEntry {
    /// Create a new access log entry with current timestamp
    pub fn new(remote_addr: String, method: String, path: String) -> Self {
        Self {
            remote_addr,
            time: Local::now(),
            method,
            path,
            http_version: "1.1".to_string(),
            status: 200,
            body_bytes: 0,
            strategy: None,
            request_time_us: 0,
        }
    }

    pub fn format(&self, format: &str) -> String {
        match format {
            "common" => self.format_common(),
            "json" => self.format_json(),
            custom => self.format_custom(custom),
        }
    }

    fn request_line(&self) -> String {
        format!("{} {} HTTP/{}", self.method, self.path, self.http_version)
    }

    fn time_local(&self) -> String {
        self.time.format("%d/%b/%Y:%H:%M:%S %z").to_string()
    }

    /// `$remote_addr - - [$time_local] "$request" $status $body_bytes_sent $strategy`
    fn format_common(&self) -> String {
        format!(
            "{} - - [{}] \"{}\" {} {} {}",
            self.remote_addr,
            self.time_local(),
            self.request_line(),
            self.status,
            self.body_bytes,
            self.strategy.unwrap_or("-"),
        )
    }

    fn format_json(&self) -> String {
        serde_json::json!({
            "remote_addr": self.remote_addr,
            "time": self.time.to_rfc3339(),
            "method": self.method,
            "path": self.path,
            "http_version": self.http_version,
            "status": self.status,
            "body_bytes": self.body_bytes,
            "strategy": self.strategy,
            "request_time_us": self.request_time_us,
        })
        .to_string()
    }

    /// Supported variables: `$remote_addr`, `$time_local`, `$time_iso8601`,
    /// `$request_time`, `$request`, `$status`, `$body_bytes_sent`,
    /// `$strategy`.
    fn format_custom(&self, pattern: &str) -> String {
        #[allow(clippy::cast_precision_loss)]
        let request_time = self.request_time_us as f64 / 1_000_000.0;

        // $request_time must be replaced before $request
        pattern
            .replace("$remote_addr", &self.remote_addr)
            .replace("$time_local", &self.time_local())
            .replace("$time_iso8601", &self.time.to_rfc3339())
            .replace("$request_time", &format!("{request_time:.6}"))
            .replace("$request", &self.request_line())
            .replace("$status", &self.status.to_string())
            .replace("$body_bytes_sent", &self.body_bytes.to_string())
            .replace("$strategy", self.strategy.unwrap_or("-"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_entry() -> AccessLogEntry {
        let mut entry = AccessLogEntry::new(
            "10.0.0.7".to_string(),
            "GET".to_string(),
            "/ref".to_string(),
        );
        entry.body_bytes = 1024;
        entry.strategy = Some("reference");
        entry.request_time_us = 42;
        entry
    }

    #[test]
    fn test_format_common() {
        let log = create_test_entry().format("common");
        assert!(log.starts_with("10.0.0.7 - - ["));
        assert!(log.contains("\"GET /ref HTTP/1.1\" 200 1024 reference"));
    }

    #[test]
    fn test_format_common_unrouted() {
        let mut entry = create_test_entry();
        entry.status = 404;
        entry.body_bytes = 0;
        entry.strategy = None;
        assert!(entry.format("common").ends_with("404 0 -"));
    }

    #[test]
    fn test_format_json() {
        let log = create_test_entry().format("json");
        let value: serde_json::Value = serde_json::from_str(&log).unwrap();
        assert_eq!(value["remote_addr"], "10.0.0.7");
        assert_eq!(value["status"], 200);
        assert_eq!(value["body_bytes"], 1024);
        assert_eq!(value["strategy"], "reference");
        assert_eq!(value["request_time_us"], 42);
    }

    #[test]
    fn test_format_custom() {
        let log = create_test_entry().format("$strategy $status $request_time $request");
        assert_eq!(log, "reference 200 0.000042 GET /ref HTTP/1.1");
    }
}
