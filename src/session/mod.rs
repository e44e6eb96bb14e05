//! Session Module
//!
//! Connection lifecycle for the REPL.
//!
//! ## Architecture
//! - [`Session`] owns zero or one [`Connection`]
//! - [`Connection`] splits one [`Transport`] into buffered read/write halves
//! - [`Connector`] resolves, connects and probes; [`TcpConnector`] is the real one

mod connection;
mod manager;
mod transport;

pub use connection::{Connection, Peer};
pub use manager::{parse_port, Connected, Session};
pub use transport::{Connector, TcpConnector, Transport, ECHO_PORT};
