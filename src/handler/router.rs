//! Request routing dispatch module
//!
//! Maps each registered path to exactly one response strategy and turns the
//! strategy's body into a reply.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Request, Response};

use crate::config::{HttpConfig, LoggingConfig};
use crate::content::ContentStore;
use crate::error::{Error, Result};
use crate::handler::strategy::{CopyDelivery, ReferenceDelivery, ResponseStrategy};
use crate::http;
use crate::logger::{self, AccessLogEntry};

/// Path served by copy delivery
pub const BASIC_PATH: &str = "/ind";

/// Path served by reference delivery
pub const REFERENCE_PATH: &str = "/ref";

/// A path bound to its strategy
pub struct Route {
    pub path: String,
    pub strategy: Arc<dyn ResponseStrategy>,
}

/// Immutable route table shared by every connection
pub struct Router {
    content: ContentStore,
    http: HttpConfig,
    access_log_format: Option<String>,
    routes: Vec<Route>,
}

impl Router {
    /// Create an empty table serving `content`
    pub fn new(content: ContentStore, http: HttpConfig, logging: &LoggingConfig) -> Self {
        Self {
            content,
            http,
            access_log_format: logging
                .access_log
                .then(|| logging.access_log_format.clone()),
            routes: Vec::new(),
        }
    }

    /// Register the fixed benchmark routes.
    ///
    /// `/ind` is always present; `/ref` only when the protocol layer offers
    /// zero-copy bodies.
    pub fn with_default_routes(
        content: ContentStore,
        http: HttpConfig,
        logging: &LoggingConfig,
    ) -> Result<Self> {
        let zero_copy = http.zero_copy;
        let mut router = Self::new(content, http, logging);
        router.register(BASIC_PATH, Arc::new(CopyDelivery))?;
        if zero_copy {
            router.register(REFERENCE_PATH, Arc::new(ReferenceDelivery))?;
        }
        Ok(router)
    }

    pub fn register(&mut self, path: &str, strategy: Arc<dyn ResponseStrategy>) -> Result<()> {
        if self.lookup(path).is_some() {
            return Err(Error::DuplicateRoute(path.to_string()));
        }
        self.routes.push(Route {
            path: path.to_string(),
            strategy,
        });
        Ok(())
    }

    pub fn lookup(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.path == path)
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub const fn content(&self) -> ContentStore {
        self.content
    }

    /// Build the reply for `path`.
    pub fn respond(&self, path: &str) -> Response<Full<Bytes>> {
        match self.lookup(path) {
            Some(route) => {
                let body = route.strategy.body(self.content.contents());
                http::build_content_response(body, &self.http)
            }
            None => http::build_404_response(),
        }
    }
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    router: Arc<Router>,
    peer_addr: SocketAddr,
) -> std::result::Result<Response<Full<Bytes>>, Infallible> {
    let Some(format) = router.access_log_format.as_deref() else {
        return Ok(router.respond(req.uri().path()));
    };

    let path = req.uri().path();
    let started = Instant::now();
    let response = router.respond(path);

    let route = router.lookup(path);
    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        path.to_string(),
    );
    entry.http_version = format!("{:?}", req.version())
        .trim_start_matches("HTTP/")
        .to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = route.map_or(0, |_| router.content.len());
    entry.strategy = route.map(|route| route.strategy.name());
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
    logger::log_access(&entry, format);

    Ok(response)
}
