// Server loop module
// Accepts connections until the shutdown future resolves

use std::future::Future;
use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

use tokio::net::TcpListener;

use super::connection::{accept_connection, ConnectionConfig};
use super::signal::ShutdownReason;
use crate::handler::Router;
use crate::logger;

/// Run the accept loop. Returns when `shutdown` resolves; connections
/// still in flight are dropped with the runtime.
pub async fn start_server_loop<S>(
    listener: TcpListener,
    router: Arc<Router>,
    config: ConnectionConfig,
    shutdown: S,
) -> ShutdownReason
where
    S: Future<Output = ShutdownReason>,
{
    let active_connections = Arc::new(AtomicUsize::new(0));
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            reason = &mut shutdown => return reason,

            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(
                            stream,
                            peer_addr,
                            &router,
                            &active_connections,
                            config,
                        );
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }
        }
    }
}
