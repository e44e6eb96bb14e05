//! # wireprobe
//!
//! An interactive harness for poking at a raw TCP connection one typed
//! value at a time:
//! - Exact big-endian encodings for integers, floats, booleans, chars and strings
//! - At most one connection, with a per-connection read timeout
//! - Line-oriented commands with strict argument checking
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        REPL (stdin)                          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ line
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                   Command Interpreter                        │
//! │               (parse, arity, dispatch)                       │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                    Session Manager                           │
//! │        (connect / close / status / ping / timeout)           │
//! └──────────┬─────────────────────────────────┬────────────────┘
//!            │ send / read                     │
//!            ▼                                 ▼
//!   ┌─────────────────┐              ┌────────────────────┐
//!   │   Typed Codec   │─────────────▶│     TCP stream     │
//!   │ (tag + literal) │    bytes     │ (BufReader/Writer) │
//!   └─────────────────┘              └────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod codec;
pub mod session;
pub mod command;
pub mod interpreter;
pub mod repl;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{ErrorKind, ProbeError, Result};
pub use config::Config;
pub use codec::{TypeTag, Value};
pub use session::Session;
pub use interpreter::Interpreter;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of wireprobe
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
