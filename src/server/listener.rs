// Listener module
// Creates the TCP listener handed to the accept loop

use std::net::SocketAddr;

use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::TcpListener;

use crate::error::{Error, Result};

/// Pending-connection queue size
const BACKLOG: i32 = 1024;

/// Bind `addr` with `SO_REUSEADDR`, so repeated benchmark runs do not trip
/// over sockets in `TIME_WAIT`. A port held by another listener fails with
/// `Error::Bind`.
///
/// Must be called from within the engine's runtime.
pub fn bind_listener(addr: SocketAddr) -> Result<TcpListener> {
    create_listener(addr).map_err(|source| Error::Bind { addr, source })
}

fn create_listener(addr: SocketAddr) -> std::io::Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;

    socket.set_reuse_address(true)?;
    socket.set_nonblocking(true)?;

    socket.bind(&addr.into())?;
    socket.listen(BACKLOG)?;

    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}
