//! Connection
//!
//! One established stream to a peer, plus its read timeout.

use std::fmt;
use std::io::{BufReader, BufWriter, ErrorKind as IoErrorKind, Write};
use std::net::SocketAddr;
use std::time::Duration;

use bytes::BytesMut;

use super::Transport;
use crate::codec::{read_and_decode_buffered, write_value, TypeTag, Value};
use crate::error::{ProbeError, Result};

/// Where a connection points
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Peer {
    /// Host as the operator typed it
    pub host: String,

    /// Address the connection actually reached
    pub addr: SocketAddr,
}

impl Peer {
    pub fn new(host: impl Into<String>, addr: SocketAddr) -> Self {
        Self {
            host: host.into(),
            addr,
        }
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }
}

impl fmt::Display for Peer {
    /// `host/ip:port`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.host, self.addr)
    }
}

/// An open stream to one peer
pub struct Connection<S: Transport> {
    /// Stream reader (buffered; unread bytes carry over between reads)
    reader: BufReader<S>,

    /// Start of a value whose read timed out before it was complete
    pending: BytesMut,

    /// Stream writer (buffered; flushed after every value)
    writer: BufWriter<S>,

    peer: Peer,

    /// Active read timeout (milliseconds, 0 = none)
    read_timeout_ms: u64,
}

impl<S: Transport> Connection<S> {
    /// Wrap a freshly connected stream
    ///
    /// Splits the stream into read and write handles and applies the read timeout.
    pub fn new(stream: S, peer: Peer, read_timeout_ms: u64) -> Result<Self> {
        let addr = peer.addr;
        let setup = move |source: std::io::Error| ProbeError::StreamSetup { peer: addr, source };

        let read_stream = stream.try_clone().map_err(setup)?;
        let write_stream = stream;

        let mut connection = Self {
            reader: BufReader::new(read_stream),
            pending: BytesMut::new(),
            writer: BufWriter::new(write_stream),
            peer,
            read_timeout_ms,
        };
        connection.apply_read_timeout(read_timeout_ms).map_err(setup)?;

        Ok(connection)
    }

    pub fn peer(&self) -> &Peer {
        &self.peer
    }

    pub fn read_timeout_ms(&self) -> u64 {
        self.read_timeout_ms
    }

    /// Change the read timeout for subsequent reads
    pub fn set_read_timeout_ms(&mut self, ms: u64) -> Result<()> {
        self.apply_read_timeout(ms)?;
        self.read_timeout_ms = ms;
        Ok(())
    }

    fn apply_read_timeout(&mut self, ms: u64) -> std::io::Result<()> {
        let timeout = (ms > 0).then(|| Duration::from_millis(ms));
        self.reader.get_ref().set_read_timeout(timeout)
    }

    /// Write one value and flush it
    pub fn send(&mut self, value: &Value) -> Result<()> {
        write_value(&mut self.writer, value)
    }

    /// Read one value, honoring the read timeout
    ///
    /// A timeout keeps whatever part of the value already arrived, and the
    /// next read continues from it.
    pub fn read(&mut self, tag: TypeTag) -> Result<Value> {
        match read_and_decode_buffered(tag, &mut self.reader, &mut self.pending) {
            // Unix reports an elapsed SO_RCVTIMEO as WouldBlock, Windows as TimedOut
            Err(ProbeError::Io(io))
                if matches!(io.kind(), IoErrorKind::WouldBlock | IoErrorKind::TimedOut) =>
            {
                tracing::debug!("Read timed out with {} bytes pending", self.pending.len());
                Err(ProbeError::ReadTimeout(self.read_timeout_ms))
            }
            result => result,
        }
    }

    /// Flush pending output and shut the stream down
    pub fn close(mut self) -> Result<()> {
        if let Err(e) = self.writer.flush() {
            tracing::debug!("Flush before close to {} failed: {}", self.peer, e);
        }
        self.reader.get_ref().shutdown()?;
        Ok(())
    }
}
