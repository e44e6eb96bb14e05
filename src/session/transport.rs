//! Transport abstraction
//!
//! Lets the session run over real TCP or over any in-memory stream that can
//! be cloned into separate read and write handles.

use std::io::{self, ErrorKind, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

/// Port probed by `ping`. A refused connection still proves the host answered.
pub const ECHO_PORT: u16 = 7;

/// A connected, bidirectional byte stream
pub trait Transport: Read + Write + Sized {
    /// Second handle to the same stream
    fn try_clone(&self) -> io::Result<Self>;

    /// `None` blocks indefinitely
    fn set_read_timeout(&self, timeout: Option<Duration>) -> io::Result<()>;

    /// Close both directions
    fn shutdown(&self) -> io::Result<()>;
}

/// Produces transports for a session
pub trait Connector {
    type Stream: Transport;

    /// Resolve a host and port to candidate addresses
    fn resolve(&self, host: &str, port: u16) -> io::Result<Vec<SocketAddr>>;

    /// Open a stream to one address
    fn connect(&self, addr: SocketAddr) -> io::Result<Self::Stream>;

    /// Check whether the host at `addr` answers within `timeout`
    fn probe(&self, addr: SocketAddr, timeout: Duration) -> io::Result<bool>;
}

impl Transport for TcpStream {
    fn try_clone(&self) -> io::Result<Self> {
        TcpStream::try_clone(self)
    }

    fn set_read_timeout(&self, timeout: Option<Duration>) -> io::Result<()> {
        TcpStream::set_read_timeout(self, timeout)
    }

    fn shutdown(&self) -> io::Result<()> {
        match TcpStream::shutdown(self, Shutdown::Both) {
            // Peer already went away
            Err(e) if e.kind() == ErrorKind::NotConnected => Ok(()),
            other => other,
        }
    }
}

/// Connector over `std::net`
#[derive(Debug, Clone)]
pub struct TcpConnector {
    connect_timeout: Option<Duration>,
}

impl TcpConnector {
    /// A zero timeout leaves connect attempts to the OS default
    pub fn new(connect_timeout_ms: u64) -> Self {
        let connect_timeout = (connect_timeout_ms > 0).then(|| Duration::from_millis(connect_timeout_ms));
        Self { connect_timeout }
    }
}

impl Connector for TcpConnector {
    type Stream = TcpStream;

    fn resolve(&self, host: &str, port: u16) -> io::Result<Vec<SocketAddr>> {
        Ok((host, port).to_socket_addrs()?.collect())
    }

    fn connect(&self, addr: SocketAddr) -> io::Result<TcpStream> {
        let stream = match self.connect_timeout {
            Some(timeout) => TcpStream::connect_timeout(&addr, timeout)?,
            None => TcpStream::connect(addr)?,
        };

        // Every send is one small value; don't let Nagle hold it back
        stream.set_nodelay(true)?;
        Ok(stream)
    }

    fn probe(&self, addr: SocketAddr, timeout: Duration) -> io::Result<bool> {
        let target = SocketAddr::new(addr.ip(), ECHO_PORT);
        let timeout = timeout.max(Duration::from_millis(1));

        match TcpStream::connect_timeout(&target, timeout) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == ErrorKind::ConnectionRefused => Ok(true),
            Err(e) if matches!(e.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
