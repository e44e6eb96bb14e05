//! Command definitions
//!
//! Turns one REPL line into a validated [`Command`].
//!
//! ## Line Grammar
//! ```text
//! <name> SP <remainder>
//! ```
//! The remainder is split on single spaces for every command except `send`,
//! whose remainder is `<type> SP <literal>` with the literal taken verbatim.

use crate::codec::TypeTag;
use crate::error::{ProbeError, Result};

/// Accepted argument counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    OneOf(&'static [usize]),

    /// `<type> SP <literal>`; the builder checks the shape itself
    Verbatim,
}

/// Static description of one command
pub struct CommandSpec {
    pub name: &'static str,
    pub arity: Arity,
    pub usage: &'static str,
    pub summary: &'static str,

    /// Builds the command from the raw remainder and its split arguments
    build: fn(&str, &[&str]) -> Result<Command>,
}

/// Command table, in `help` order
pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "help",
        arity: Arity::Exactly(0),
        usage: "help",
        summary: "show this message",
        build: |_, _| Ok(Command::Help),
    },
    CommandSpec {
        name: "connect",
        arity: Arity::Exactly(2),
        usage: "connect <host> <port>",
        summary: "open a connection, closing any current one",
        build: |_, args| {
            Ok(Command::Connect {
                host: args[0].to_string(),
                port: args[1].to_string(),
            })
        },
    },
    CommandSpec {
        name: "send",
        arity: Arity::Verbatim,
        usage: "send <type> <value>",
        summary: "write one value",
        build: |raw, _| parse_send(raw),
    },
    CommandSpec {
        name: "read",
        arity: Arity::Exactly(1),
        usage: "read <type>",
        summary: "read one value",
        build: |_, args| Ok(Command::Read { tag: args[0].parse()? }),
    },
    CommandSpec {
        name: "timeout",
        arity: Arity::OneOf(&[0, 1]),
        usage: "timeout [milliseconds]",
        summary: "show or set the read timeout (0 = wait forever)",
        build: |_, args| {
            Ok(Command::Timeout {
                value: args.first().map(|v| v.to_string()),
            })
        },
    },
    CommandSpec {
        name: "status",
        arity: Arity::Exactly(0),
        usage: "status",
        summary: "show the current peer",
        build: |_, _| Ok(Command::Status),
    },
    CommandSpec {
        name: "ping",
        arity: Arity::Exactly(0),
        usage: "ping",
        summary: "check whether the peer host is reachable",
        build: |_, _| Ok(Command::Ping),
    },
    CommandSpec {
        name: "close",
        arity: Arity::Exactly(0),
        usage: "close",
        summary: "close the current connection",
        build: |_, _| Ok(Command::Close),
    },
];

/// A parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,

    /// Port is validated by the session, after any old connection is closed
    Connect { host: String, port: String },

    Send { tag: TypeTag, literal: String },

    Read { tag: TypeTag },

    /// `None` reports the current value
    Timeout { value: Option<String> },

    Status,

    Ping,

    Close,
}

impl Command {
    /// Parse one input line
    ///
    /// Returns `Ok(None)` for blank lines.
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let line = line.trim_start();
        if line.trim_end().is_empty() {
            return Ok(None);
        }

        let (name, remainder) = match line.split_once(' ') {
            Some((name, remainder)) => (name, remainder),
            None => (line.trim_end(), ""),
        };

        let spec = COMMANDS
            .iter()
            .find(|spec| spec.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| ProbeError::UnknownCommand(name.to_string()))?;

        // The literal may contain spaces, so it is never split
        if spec.arity == Arity::Verbatim {
            return (spec.build)(remainder, &[]).map(Some);
        }

        let args = split_args(remainder);
        check_arity(spec.arity, args.len())?;
        (spec.build)(remainder, &args).map(Some)
    }

    /// Name of the command, as typed in the REPL
    pub fn name(&self) -> &'static str {
        match self {
            Command::Help => "help",
            Command::Connect { .. } => "connect",
            Command::Send { .. } => "send",
            Command::Read { .. } => "read",
            Command::Timeout { .. } => "timeout",
            Command::Status => "status",
            Command::Ping => "ping",
            Command::Close => "close",
        }
    }
}

/// Split on single spaces, dropping trailing empty pieces
///
/// Interior empty pieces are kept, so `a  b` is three arguments.
fn split_args(remainder: &str) -> Vec<&str> {
    let mut args: Vec<&str> = remainder.split(' ').collect();
    while args.last().is_some_and(|arg| arg.is_empty()) {
        args.pop();
    }
    args
}

fn check_arity(arity: Arity, have: usize) -> Result<()> {
    match arity {
        Arity::Exactly(expected) if have != expected => {
            Err(ProbeError::WrongArgumentCount { have, expected })
        }
        Arity::OneOf(expected) if !expected.contains(&have) => {
            Err(ProbeError::ArgumentChoice { have, expected })
        }
        _ => Ok(()),
    }
}

/// `<type> SP <literal>`, literal verbatim
fn parse_send(remainder: &str) -> Result<Command> {
    match remainder.split_once(' ') {
        Some((tag, literal)) => Ok(Command::Send {
            tag: tag.parse()?,
            literal: literal.to_string(),
        }),
        None => Err(ProbeError::WrongArgumentCount {
            have: usize::from(!remainder.is_empty()),
            expected: 2,
        }),
    }
}
