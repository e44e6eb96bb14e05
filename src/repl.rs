//! REPL driver
//!
//! Prompt, read a line, execute it, repeat until end of input.

use std::io::{self, BufRead, ErrorKind, Write};

use crate::interpreter::Interpreter;
use crate::session::Connector;

/// Run the read-eval-print loop until `input` is exhausted
///
/// Returns `Ok(())` on end of input. Only failures of the output streams
/// or of `input` itself end the loop early.
pub fn run<C, R, O, E>(interpreter: &mut Interpreter<C>, mut input: R, out: &mut O, err: &mut E) -> io::Result<()>
where
    C: Connector,
    R: BufRead,
    O: Write,
    E: Write,
{
    let prompt = interpreter.session().config().prompt.clone();
    writeln!(out, "Try typing \"help\".")?;

    let mut line = String::new();
    loop {
        write!(out, "{}", prompt)?;
        out.flush()?;

        line.clear();
        match input.read_line(&mut line) {
            Ok(0) => {
                writeln!(out)?;
                tracing::debug!("End of input");
                return Ok(());
            }
            Ok(_) => {}
            // The offending line has been consumed; keep going
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                writeln!(err, "Error: input line is not valid UTF-8")?;
                continue;
            }
            Err(e) => return Err(e),
        }

        let trimmed = line.strip_suffix('\n').unwrap_or(&line);
        let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);

        interpreter.execute(trimmed, out, err)?;
        err.flush()?;
    }
}
