//! wireprobe CLI
//!
//! Interactive REPL over stdin/stdout for a single raw TCP connection.

use std::io;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};
use wireprobe::config::{
    Config, DEFAULT_CONNECT_TIMEOUT_MS, DEFAULT_PING_TIMEOUT_MS, DEFAULT_PROMPT,
    DEFAULT_READ_TIMEOUT_MS,
};
use wireprobe::{repl, Interpreter, Session};

/// wireprobe
#[derive(Parser, Debug)]
#[command(name = "wireprobe")]
#[command(about = "Send and read typed binary values over a raw TCP connection")]
#[command(version)]
struct Args {
    /// Read timeout applied to each new connection, in milliseconds (0 = none)
    #[arg(long, default_value_t = DEFAULT_READ_TIMEOUT_MS)]
    read_timeout_ms: u64,

    /// Timeout of the `ping` reachability probe, in milliseconds
    #[arg(long, default_value_t = DEFAULT_PING_TIMEOUT_MS)]
    ping_timeout_ms: u64,

    /// Connect timeout per resolved address, in milliseconds (0 = OS default)
    #[arg(long, default_value_t = DEFAULT_CONNECT_TIMEOUT_MS)]
    connect_timeout_ms: u64,

    /// Prompt shown before each command
    #[arg(long, default_value = DEFAULT_PROMPT)]
    prompt: String,
}

fn main() {
    // Logs go to stderr so they never interleave with read results on stdout
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    tracing::debug!("wireprobe v{}", wireprobe::VERSION);

    let config = Config::builder()
        .default_read_timeout_ms(args.read_timeout_ms)
        .ping_timeout_ms(args.ping_timeout_ms)
        .connect_timeout_ms(args.connect_timeout_ms)
        .prompt(args.prompt)
        .build();

    let mut interpreter = Interpreter::new(Session::new(config));

    let stdin = io::stdin();
    let stdout = io::stdout();
    let stderr = io::stderr();

    if let Err(e) = repl::run(&mut interpreter, stdin.lock(), &mut stdout.lock(), &mut stderr.lock()) {
        tracing::error!("Terminal I/O failed: {}", e);
        std::process::exit(1);
    }

    if interpreter.session().is_connected() {
        if let Err(e) = interpreter.session_mut().close() {
            tracing::debug!("Close on exit failed: {}", e);
        }
    }
}
