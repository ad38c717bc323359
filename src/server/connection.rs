// Connection handling module
// Serves one accepted TCP connection with hyper

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;

use crate::config::Settings;
use crate::handler::{self, Router};
use crate::logger;

/// Per-connection protocol settings
#[derive(Debug, Clone, Copy)]
pub struct ConnectionConfig {
    pub keep_alive: bool,
    /// Upper bound for a whole connection, `None` for unlimited
    pub timeout: Option<Duration>,
    pub max_connections: Option<u64>,
}

impl ConnectionConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        let secs = settings.performance.connection_timeout_secs;
        Self {
            keep_alive: settings.http.keep_alive,
            timeout: (secs > 0).then(|| Duration::from_secs(secs)),
            max_connections: settings.performance.max_connections,
        }
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            keep_alive: true,
            timeout: None,
            max_connections: None,
        }
    }
}

/// Accept a connection, enforcing the connection limit, and serve it in
/// its own task.
pub fn accept_connection(
    stream: tokio::net::TcpStream,
    peer_addr: SocketAddr,
    router: &Arc<Router>,
    conn_counter: &Arc<AtomicUsize>,
    config: ConnectionConfig,
) {
    // Increment counter first, then check limit (prevents race condition)
    let prev_count = conn_counter.fetch_add(1, Ordering::SeqCst);

    if let Some(max_conn) = config.max_connections {
        if prev_count >= usize::try_from(max_conn).unwrap_or(usize::MAX) {
            conn_counter.fetch_sub(1, Ordering::SeqCst);
            logger::log_warning(&format!(
                "Max connections reached: {prev_count}/{max_conn}. Connection rejected."
            ));
            drop(stream);
            return;
        }
    }

    if let Err(e) = stream.set_nodelay(true) {
        logger::log_warning(&format!("Failed to set TCP_NODELAY for {peer_addr}: {e}"));
    }

    handle_connection(
        stream,
        peer_addr,
        Arc::clone(router),
        Arc::clone(conn_counter),
        config,
    );
}

fn handle_connection(
    stream: tokio::net::TcpStream,
    peer_addr: SocketAddr,
    router: Arc<Router>,
    conn_counter: Arc<AtomicUsize>,
    config: ConnectionConfig,
) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let mut builder = http1::Builder::new();
        builder.keep_alive(config.keep_alive);

        let conn = builder.serve_connection(
            io,
            service_fn(move |req| handler::handle_request(req, Arc::clone(&router), peer_addr)),
        );

        match config.timeout {
            Some(limit) => match tokio::time::timeout(limit, conn).await {
                Ok(Ok(())) => {}
                Ok(Err(err)) => logger::log_connection_error(&err),
                Err(_) => logger::log_warning(&format!(
                    "Connection from {peer_addr} timed out after {} seconds",
                    limit.as_secs()
                )),
            },
            None => {
                if let Err(err) = conn.await {
                    logger::log_connection_error(&err);
                }
            }
        }

        conn_counter.fetch_sub(1, Ordering::SeqCst);
    });
}
