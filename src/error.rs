//! Error types for wireprobe
//!
//! Provides a unified error type for all operations. Every variant belongs to
//! exactly one [`ErrorKind`], which is what the interpreter reports on.

use std::net::SocketAddr;
use thiserror::Error;

use crate::codec::TypeTag;

/// Result type alias using ProbeError
pub type Result<T> = std::result::Result<T, ProbeError>;

/// Broad classification of a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input from the operator (arity, literal, tag, command)
    Argument,
    /// Connection state or establishment problems
    Connection,
    /// Failures while moving bytes over an established stream
    Io,
    /// Stream handles could not be set up
    Resource,
}

/// Unified error type for wireprobe operations
#[derive(Debug, Error)]
pub enum ProbeError {
    // -------------------------------------------------------------------------
    // Argument Errors
    // -------------------------------------------------------------------------
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Too {} arguments. Have: {have} expected: {expected}.", many_or_few(.have, .expected))]
    WrongArgumentCount { have: usize, expected: usize },

    #[error("Too {} arguments. Have: {have} expected: {}.", more_or_less(.have, .expected), either_of(.expected))]
    ArgumentChoice {
        have: usize,
        expected: &'static [usize],
    },

    #[error("Unrecognized data type: {0}")]
    UnknownType(String),

    #[error("Invalid {tag} literal '{literal}': {reason}")]
    InvalidLiteral {
        tag: TypeTag,
        literal: String,
        reason: String,
    },

    #[error("String too long: {len} bytes (max {max})")]
    StringTooLong { len: usize, max: usize },

    #[error("Invalid {what} '{literal}': {reason}")]
    InvalidNumber {
        what: &'static str,
        literal: String,
        reason: String,
    },

    // -------------------------------------------------------------------------
    // Connection Errors
    // -------------------------------------------------------------------------
    #[error("Not connected. Connect to a socket first.")]
    NotConnected,

    #[error("Could not resolve {host}: {source}")]
    Resolve {
        host: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not connect to {target}: {source}")]
    Connect {
        target: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Peer closed the connection")]
    PeerClosed,

    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Read timed out after {0} ms")]
    ReadTimeout(u64),

    #[error("Decode error: {0}")]
    Decode(String),

    // -------------------------------------------------------------------------
    // Resource Errors
    // -------------------------------------------------------------------------
    #[error("Stream unavailable for {peer}: {source}")]
    StreamSetup {
        peer: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

impl ProbeError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProbeError::UnknownCommand(_)
            | ProbeError::WrongArgumentCount { .. }
            | ProbeError::ArgumentChoice { .. }
            | ProbeError::UnknownType(_)
            | ProbeError::InvalidLiteral { .. }
            | ProbeError::StringTooLong { .. }
            | ProbeError::InvalidNumber { .. } => ErrorKind::Argument,

            ProbeError::NotConnected
            | ProbeError::Resolve { .. }
            | ProbeError::Connect { .. }
            | ProbeError::PeerClosed => ErrorKind::Connection,

            ProbeError::Io(_) | ProbeError::ReadTimeout(_) | ProbeError::Decode(_) => ErrorKind::Io,

            ProbeError::StreamSetup { .. } => ErrorKind::Resource,
        }
    }

    /// Build an `InvalidLiteral` error
    pub(crate) fn literal(tag: TypeTag, literal: &str, reason: impl ToString) -> Self {
        ProbeError::InvalidLiteral {
            tag,
            literal: literal.to_string(),
            reason: reason.to_string(),
        }
    }
}

fn many_or_few(have: &usize, expected: &usize) -> &'static str {
    if have > expected {
        "many"
    } else {
        "few"
    }
}

fn more_or_less(have: &usize, expected: &[usize]) -> &'static str {
    match expected.iter().max() {
        Some(max) if have > max => "many",
        _ => "few",
    }
}

fn either_of(counts: &[usize]) -> String {
    counts
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" or ")
}
