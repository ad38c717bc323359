//! HTTP response building module
//!
//! Builds the replies handed to hyper. Builder failures fall back to a bare
//! response and are logged instead of propagated.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::ext::ReasonPhrase;
use hyper::{Response, StatusCode};

use crate::config::HttpConfig;

/// Reason phrase sent with every successful content reply
pub const CONTENT_REASON: &str = "Everything is fine";

/// Build `200 Everything is fine` carrying `body`
pub fn build_content_response(body: Bytes, http: &HttpConfig) -> Response<Full<Bytes>> {
    let content_length = body.len();

    let mut response = Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", http.content_type.as_str())
        .header("Content-Length", content_length)
        .header("Server", http.server_name.as_str())
        .body(Full::new(body.clone()))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(body))
        });

    response
        .extensions_mut()
        .insert(ReasonPhrase::from_static(CONTENT_REASON.as_bytes()));
    response
}

/// Build 404 Not Found response for unregistered paths
pub fn build_404_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from_static(b"404 Not Found")))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from_static(b"404 Not Found")))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http_config() -> HttpConfig {
        HttpConfig {
            server_name: "bench_http".to_string(),
            content_type: "application/octet-stream".to_string(),
            zero_copy: true,
            keep_alive: true,
        }
    }

    #[test]
    fn test_content_response_carries_reason_phrase() {
        let resp = build_content_response(Bytes::from_static(&[1, 2, 3]), &http_config());
        assert_eq!(resp.status(), StatusCode::OK);
        let reason = resp.extensions().get::<ReasonPhrase>().unwrap();
        assert_eq!(reason.as_bytes(), CONTENT_REASON.as_bytes());
        assert_eq!(resp.headers()["content-length"], "3");
        assert_eq!(resp.headers()["server"], "bench_http");
    }

    #[test]
    fn test_empty_body_allowed() {
        let resp = build_content_response(Bytes::new(), &http_config());
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["content-length"], "0");
    }

    #[test]
    fn test_404_response() {
        let resp = build_404_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
