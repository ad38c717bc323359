// Server module entry point
// Sequences startup: engine, content store, routes, bind, bounded run, serve

pub mod connection;
pub mod engine;
pub mod listener;
pub mod signal;

// `loop` is a keyword, so the module is mounted as server_loop
#[path = "loop.rs"]
pub mod server_loop;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::Settings;
use crate::content::ContentStore;
use crate::error::Result;
use crate::handler::{Router, REFERENCE_PATH};
use crate::logger;

// Re-export commonly used types
pub use connection::ConnectionConfig;
pub use engine::{Backend, Engine};
pub use listener::bind_listener;
pub use server_loop::start_server_loop;
pub use signal::{shutdown_signal, ShutdownReason};

/// A server whose listening endpoint is bound and whose routes are fixed
pub struct BoundServer {
    listener: TcpListener,
    router: Arc<Router>,
    connection: ConnectionConfig,
}

impl BoundServer {
    /// Bind `addr` for `router`. Must run inside the engine's runtime.
    pub fn bind(addr: SocketAddr, router: Router, connection: ConnectionConfig) -> Result<Self> {
        let listener = bind_listener(addr)?;
        Ok(Self {
            listener,
            router: Arc::new(router),
            connection,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve until `shutdown` resolves.
    pub async fn serve<S>(self, shutdown: S) -> ShutdownReason
    where
        S: Future<Output = ShutdownReason>,
    {
        start_server_loop(self.listener, self.router, self.connection, shutdown).await
    }
}

/// Build the route table over `content` and print one line per route.
pub fn register_routes(content: ContentStore, settings: &Settings) -> Result<Router> {
    let router = Router::with_default_routes(content, settings.http.clone(), &settings.logging)?;
    for route in router.routes() {
        logger::log_route(&route.path, route.strategy.description());
    }
    if router.lookup(REFERENCE_PATH).is_none() {
        logger::log_route_unavailable(REFERENCE_PATH);
    }
    Ok(router)
}

/// Run the whole server lifecycle; returns once the loop has exited.
pub fn run(settings: &Settings) -> Result<()> {
    let addr = settings.socket_addr()?;

    // Configured -> Ready
    let engine = Engine::new(&settings.server)?;
    let content = ContentStore::new(settings.content_length()?)?;

    // Ready -> Bound
    let router = register_routes(content, settings)?;
    logger::log_serving(content.len(), settings.server.port, engine.backend().method());
    let bounded_run = engine.bounded_run(&settings.server);
    let connection = ConnectionConfig::from_settings(settings);

    engine.block_on(async move {
        let server = BoundServer::bind(addr, router, connection)?;
        logger::log_listening(&server.local_addr()?);
        if let Some(limit) = bounded_run {
            logger::log_bounded_run(limit);
        }

        // Bound -> Serving -> Terminated
        let reason = server.serve(shutdown_signal(bounded_run)).await;
        logger::log_shutdown(&reason.to_string());
        Ok(())
    })
}
