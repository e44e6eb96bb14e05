//! Session Manager
//!
//! Owns at most one connection and every operation that needs it.

use std::io;
use std::time::Duration;

use super::{Connection, Connector, Peer, TcpConnector};
use crate::codec::{TypeTag, Value};
use crate::config::Config;
use crate::error::{ProbeError, Result};

/// Result of a successful `connect`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connected {
    pub peer: Peer,

    /// Connection that was torn down to make room for this one
    pub replaced: Option<Peer>,
}

/// Parse a port argument (0-65535)
pub fn parse_port(literal: &str) -> Result<u16> {
    literal.parse().map_err(|e: std::num::ParseIntError| ProbeError::InvalidNumber {
        what: "port",
        literal: literal.to_string(),
        reason: e.to_string(),
    })
}

/// The single connection slot of an interactive session
///
/// ## State
/// - Disconnected: `connection` is `None`; every stream operation fails with
///   [`ProbeError::NotConnected`]
/// - Connected: exactly one [`Connection`] with its own read timeout
///
/// A `connect` while connected closes the current connection before the new
/// one is attempted, so two connections never coexist.
pub struct Session<C: Connector = TcpConnector> {
    config: Config,
    connector: C,
    connection: Option<Connection<C::Stream>>,
}

impl Session<TcpConnector> {
    /// Session over real TCP
    pub fn new(config: Config) -> Self {
        let connector = TcpConnector::new(config.connect_timeout_ms);
        Self::with_connector(config, connector)
    }
}

impl<C: Connector> Session<C> {
    pub fn with_connector(config: Config, connector: C) -> Self {
        Self {
            config,
            connector,
            connection: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// Current peer, if connected
    pub fn peer(&self) -> Option<&Peer> {
        self.connection.as_ref().map(Connection::peer)
    }

    fn connection(&mut self) -> Result<&mut Connection<C::Stream>> {
        self.connection.as_mut().ok_or(ProbeError::NotConnected)
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Connect to `host:port`, replacing any current connection
    ///
    /// The old connection is closed before the port is even parsed, so a
    /// failed attempt leaves the session disconnected.
    pub fn connect(&mut self, host: &str, port: &str) -> Result<Connected> {
        let replaced = self.connection.take().map(|old| {
            let peer = old.peer().clone();
            tracing::warn!("Replacing connection to {}", peer);
            if let Err(e) = old.close() {
                tracing::warn!("Error closing {}: {}", peer, e);
            }
            peer
        });

        let port = parse_port(port)?;

        let addrs = self
            .connector
            .resolve(host, port)
            .map_err(|source| ProbeError::Resolve {
                host: host.to_string(),
                source,
            })?;

        if addrs.is_empty() {
            return Err(ProbeError::Resolve {
                host: host.to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "no addresses found"),
            });
        }

        let mut last_error = None;
        for addr in addrs {
            tracing::debug!("Connecting to {} ({})", host, addr);
            match self.connector.connect(addr) {
                Ok(stream) => {
                    let peer = Peer::new(host, addr);
                    let connection =
                        Connection::new(stream, peer.clone(), self.config.default_read_timeout_ms)?;
                    self.connection = Some(connection);
                    tracing::debug!("Connected to {}", peer);
                    return Ok(Connected { peer, replaced });
                }
                Err(e) => {
                    tracing::debug!("Connect to {} failed: {}", addr, e);
                    last_error = Some(e);
                }
            }
        }

        Err(ProbeError::Connect {
            target: format!("{}:{}", host, port),
            source: last_error
                .unwrap_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "no address accepted")),
        })
    }

    /// Close the current connection
    ///
    /// The session is disconnected afterwards even if shutting down the
    /// stream reports an error.
    pub fn close(&mut self) -> Result<Peer> {
        let connection = self.connection.take().ok_or(ProbeError::NotConnected)?;
        let peer = connection.peer().clone();
        connection.close()?;
        tracing::debug!("Closed connection to {}", peer);
        Ok(peer)
    }

    /// Peer of the current connection
    pub fn status(&self) -> Result<&Peer> {
        self.peer().ok_or(ProbeError::NotConnected)
    }

    /// Probe whether the peer host is reachable
    ///
    /// A failed probe is returned as an error but leaves the connection open.
    pub fn ping(&self) -> Result<bool> {
        let peer = self.status()?;
        let timeout = Duration::from_millis(self.config.ping_timeout_ms);
        match self.connector.probe(peer.addr, timeout) {
            Ok(reachable) => Ok(reachable),
            Err(e) => {
                tracing::warn!("Reachability probe of {} failed: {}", peer, e);
                Err(e.into())
            }
        }
    }

    // =========================================================================
    // Read Timeout
    // =========================================================================

    /// Active read timeout in milliseconds
    pub fn timeout(&self) -> Result<u64> {
        self.connection
            .as_ref()
            .map(Connection::read_timeout_ms)
            .ok_or(ProbeError::NotConnected)
    }

    /// Parse and apply a new read timeout
    pub fn set_timeout(&mut self, literal: &str) -> Result<u64> {
        let connection = self.connection()?;

        let invalid = |reason: String| ProbeError::InvalidNumber {
            what: "timeout",
            literal: literal.to_string(),
            reason,
        };
        let ms: i64 = literal.parse().map_err(|e: std::num::ParseIntError| invalid(e.to_string()))?;
        let ms = u64::try_from(ms).map_err(|_| invalid("must not be negative".to_string()))?;

        connection.set_read_timeout_ms(ms)?;
        Ok(ms)
    }

    // =========================================================================
    // Values
    // =========================================================================

    /// Validate `literal` as `tag` and write it to the peer
    pub fn send(&mut self, tag: TypeTag, literal: &str) -> Result<Value> {
        let connection = self.connection()?;
        let value = Value::parse(tag, literal)?;
        connection.send(&value)?;
        tracing::debug!("Sent {} {:?} to {}", tag, literal, connection.peer());
        Ok(value)
    }

    /// Read one `tag` value from the peer
    pub fn read(&mut self, tag: TypeTag) -> Result<Value> {
        let connection = self.connection()?;
        match connection.read(tag) {
            Ok(value) => {
                tracing::debug!("Read {} {} from {}", tag, value, connection.peer());
                Ok(value)
            }
            Err(e) => {
                tracing::warn!("Read {} from {} failed: {}", tag, connection.peer(), e);
                Err(e)
            }
        }
    }
}
