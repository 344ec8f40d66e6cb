//! Outbound TCP connects with a pre-connect socket hook.
//!
//! The hook receives a borrowed handle to the raw descriptor after the socket
//! is created and before `connect(2)` is issued. This is where the per-attempt
//! TTL is applied.

use socket2::SockRef;
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpSocket, TcpStream};

use crate::probe::socket::ttl_hook;

/// Open a TCP connection to `addr`, running `hook` on the unconnected socket
///
/// A hook error aborts the attempt and is returned unchanged; the socket is
/// closed when it drops.
pub async fn connect_with_hook<F>(addr: SocketAddr, hook: F) -> io::Result<TcpStream>
where
    F: FnOnce(SockRef<'_>) -> io::Result<()>,
{
    let socket = if addr.is_ipv6() {
        TcpSocket::new_v6()?
    } else {
        TcpSocket::new_v4()?
    };

    hook(SockRef::from(&socket))?;

    socket.connect(addr).await
}

/// An established connection produced by a [`Connector`]
pub trait Connection: Send {
    /// Remote address as reported by the local stack
    fn peer_addr(&self) -> io::Result<SocketAddr>;

    /// Release the connection
    fn close(self) -> impl Future<Output = io::Result<()>> + Send;
}

/// Opens one connection attempt at a given TTL
pub trait Connector {
    type Conn: Connection;

    fn connect(&self, addr: SocketAddr, ttl: u8)
        -> impl Future<Output = io::Result<Self::Conn>> + Send;
}

/// Kernel TCP connector; sets the TTL through [`ttl_hook`]
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpConnector;

impl Connector for TcpConnector {
    type Conn = TcpStream;

    async fn connect(&self, addr: SocketAddr, ttl: u8) -> io::Result<TcpStream> {
        connect_with_hook(addr, ttl_hook(ttl, addr.is_ipv6())).await
    }
}

impl Connection for TcpStream {
    fn peer_addr(&self) -> io::Result<SocketAddr> {
        TcpStream::peer_addr(self)
    }

    async fn close(mut self) -> io::Result<()> {
        self.shutdown().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_hook_runs_before_connect() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let stream = connect_with_hook(addr, |socket| socket.set_ttl(42))
            .await
            .unwrap();

        assert_eq!(stream.ttl().unwrap(), 42);
        assert_eq!(Connection::peer_addr(&stream).unwrap(), addr);
    }

    #[tokio::test]
    async fn test_hook_error_aborts_connect() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let err = connect_with_hook(addr, |_| {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "no"))
        })
        .await
        .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);

        // Nothing should have reached the listener
        let accepted = tokio::time::timeout(Duration::from_millis(100), listener.accept()).await;
        assert!(accepted.is_err());
    }

    #[tokio::test]
    async fn test_tcp_connector_close() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let stream = TcpConnector.connect(addr, 64).await.unwrap();
        assert_eq!(stream.ttl().unwrap(), 64);
        stream.close().await.unwrap();
    }
}
