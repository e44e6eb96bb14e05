//! Command Interpreter
//!
//! Executes one REPL line against a [`Session`]. Results go to `out`,
//! diagnostics to `err`; no error ever escapes a single line.

use std::io::{self, Write};

use crate::codec::{TypeTag, TAGS};
use crate::command::{Command, COMMANDS};
use crate::error::{ProbeError, Result};
use crate::session::{parse_port, Connector, Session, TcpConnector};

/// Line-at-a-time executor over one session
pub struct Interpreter<C: Connector = TcpConnector> {
    session: Session<C>,
}

impl<C: Connector> Interpreter<C> {
    pub fn new(session: Session<C>) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Session<C> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session<C> {
        &mut self.session
    }

    /// Parse and run one input line
    ///
    /// Only failures writing to `out`/`err` themselves are returned.
    pub fn execute<O: Write, E: Write>(&mut self, line: &str, out: &mut O, err: &mut E) -> io::Result<()> {
        let result = match Command::parse(line) {
            Ok(Some(command)) => {
                tracing::trace!("Executing {:?}", command);
                self.dispatch(command, out, err)
            }
            Ok(None) => Ok(()),
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => Ok(()),
            Err(e) => {
                tracing::debug!(kind = ?e.kind(), "Command failed: {}", e);
                writeln!(err, "Error: {}", e)
            }
        }
    }

    fn dispatch<O: Write, E: Write>(&mut self, command: Command, out: &mut O, err: &mut E) -> Result<()> {
        match command {
            Command::Help => write_help(out)?,

            Command::Connect { host, port } => {
                if self.session.is_connected() {
                    writeln!(err, "Still connected to another socket. Closing...")?;
                    match self.session.close() {
                        Ok(_) => writeln!(out, "Closed.")?,
                        Err(e) => writeln!(err, "Error: {}", e)?,
                    }
                }
                parse_port(&port)?;
                writeln!(out, "Connecting to {}:{}...", host, port)?;
                self.session.connect(&host, &port)?;
                writeln!(out, "Socket established.")?;
            }

            Command::Send { tag, literal } => {
                self.session.send(tag, &literal)?;
                writeln!(out, "Sent '{}'.", literal)?;
            }

            Command::Read { tag } => {
                let value = self.session.read(tag)?;
                writeln!(out, "Read: {}", value)?;
            }

            Command::Timeout { value: None } => {
                let ms = self.session.timeout()?;
                writeln!(out, "Read timeout is {} ms.", ms)?;
            }

            Command::Timeout { value: Some(value) } => {
                let ms = self.session.set_timeout(&value)?;
                writeln!(out, "Timeout set to '{}'.", ms)?;
            }

            Command::Status => {
                let peer = self.session.status()?;
                writeln!(out, "Connected: true")?;
                writeln!(out, "Address: {}", peer)?;
            }

            Command::Ping => match self.session.ping() {
                Ok(reachable) => writeln!(out, "Socket reachable: {}", reachable)?,
                Err(ProbeError::NotConnected) => return Err(ProbeError::NotConnected),
                Err(e) => {
                    writeln!(err, "Error determining if socket is reachable: {}", e)?;
                    writeln!(err, "Recommend closing socket.")?;
                }
            },

            Command::Close => {
                self.session.close()?;
                writeln!(out, "Closed.")?;
            }
        }

        Ok(())
    }
}

fn write_help<O: Write>(out: &mut O) -> io::Result<()> {
    writeln!(out, "<> = required, [] = optional")?;
    writeln!(out, "Commands:")?;
    for spec in COMMANDS {
        writeln!(out, "    {:<26}{}", spec.usage, spec.summary)?;
    }
    writeln!(out, "Types:")?;
    for info in TAGS.iter() {
        let width = match info.tag.width() {
            Some(n) => format!("{} bytes", n),
            None if info.tag == TypeTag::Utf8String => "2 + N bytes".to_string(),
            None => "N + 1 bytes".to_string(),
        };
        if info.aliases.is_empty() {
            writeln!(out, "    {:<26}{}", info.name, width)?;
        } else {
            let names = format!("{} ({})", info.name, info.aliases.join(", "));
            writeln!(out, "    {:<26}{}", names, width)?;
        }
    }
    Ok(())
}
