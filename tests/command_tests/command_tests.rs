//! Command Parsing Tests
//!
//! Tests for line splitting, arity checks and the verbatim send payload.

use wireprobe::command::{Arity, Command, COMMANDS};
use wireprobe::{ErrorKind, ProbeError, TypeTag};

fn parse(line: &str) -> Command {
    Command::parse(line)
        .unwrap_or_else(|e| panic!("{:?} failed: {}", line, e))
        .unwrap_or_else(|| panic!("{:?} parsed as blank", line))
}

fn parse_err(line: &str) -> ProbeError {
    match Command::parse(line) {
        Err(e) => e,
        Ok(c) => panic!("{:?} unexpectedly parsed as {:?}", line, c),
    }
}

// =============================================================================
// Blank and Unknown Lines
// =============================================================================

#[test]
fn test_blank_lines_are_no_ops() {
    assert_eq!(Command::parse("").unwrap(), None);
    assert_eq!(Command::parse("   ").unwrap(), None);
    assert_eq!(Command::parse("\t").unwrap(), None);
}

#[test]
fn test_unknown_command() {
    let err = parse_err("frobnicate now");
    assert!(matches!(err, ProbeError::UnknownCommand(ref name) if name == "frobnicate"));
    assert_eq!(err.kind(), ErrorKind::Argument);
    assert_eq!(err.to_string(), "Unknown command: frobnicate");
}

#[test]
fn test_command_names_are_case_insensitive() {
    assert_eq!(parse("HELP"), Command::Help);
    assert_eq!(parse("Status"), Command::Status);
    assert_eq!(parse("  close"), Command::Close);
}

// =============================================================================
// Arity Tests
// =============================================================================

#[test]
fn test_zero_argument_commands() {
    assert_eq!(parse("help"), Command::Help);
    assert_eq!(parse("close"), Command::Close);
    assert_eq!(parse("status"), Command::Status);
    assert_eq!(parse("ping"), Command::Ping);
    // Trailing spaces do not count as arguments
    assert_eq!(parse("close "), Command::Close);
    assert_eq!(parse("ping   "), Command::Ping);
}

#[test]
fn test_too_many_arguments() {
    let err = parse_err("help me");
    assert!(matches!(err, ProbeError::WrongArgumentCount { have: 1, expected: 0 }));
    assert_eq!(err.to_string(), "Too many arguments. Have: 1 expected: 0.");

    let err = parse_err("connect a 1 extra");
    assert_eq!(err.to_string(), "Too many arguments. Have: 3 expected: 2.");
}

#[test]
fn test_too_few_arguments() {
    let err = parse_err("connect localhost");
    assert_eq!(err.to_string(), "Too few arguments. Have: 1 expected: 2.");
    assert_eq!(err.kind(), ErrorKind::Argument);

    let err = parse_err("read");
    assert_eq!(err.to_string(), "Too few arguments. Have: 0 expected: 1.");
}

#[test]
fn test_double_space_makes_an_empty_argument() {
    let err = parse_err("connect host  80");
    assert!(matches!(err, ProbeError::WrongArgumentCount { have: 3, expected: 2 }));
}

#[test]
fn test_connect() {
    assert_eq!(
        parse("connect 127.0.0.1 8080"),
        Command::Connect {
            host: "127.0.0.1".to_string(),
            port: "8080".to_string(),
        }
    );
    // Port is validated later, by the session
    assert_eq!(
        parse("connect example.com http"),
        Command::Connect {
            host: "example.com".to_string(),
            port: "http".to_string(),
        }
    );
}

#[test]
fn test_timeout_forms() {
    assert_eq!(parse("timeout"), Command::Timeout { value: None });
    assert_eq!(parse("timeout 300"), Command::Timeout { value: Some("300".to_string()) });
    assert_eq!(parse("timeout -5"), Command::Timeout { value: Some("-5".to_string()) });

    let err = parse_err("timeout 1 2");
    assert!(matches!(err, ProbeError::ArgumentChoice { have: 2, .. }));
    assert_eq!(err.to_string(), "Too many arguments. Have: 2 expected: 0 or 1.");
}

// =============================================================================
// Read / Send Tests
// =============================================================================

#[test]
fn test_read_parses_tag() {
    assert_eq!(parse("read int"), Command::Read { tag: TypeTag::Int32 });
    assert_eq!(parse("read BYTESTRING"), Command::Read { tag: TypeTag::ByteString });

    let err = parse_err("read quaternion");
    assert!(matches!(err, ProbeError::UnknownType(ref t) if t == "quaternion"));
}

#[test]
fn test_send_literal_is_verbatim() {
    assert_eq!(
        parse("send utf8string hello  world "),
        Command::Send {
            tag: TypeTag::Utf8String,
            literal: "hello  world ".to_string(),
        }
    );
    assert_eq!(
        parse("send int 42"),
        Command::Send {
            tag: TypeTag::Int32,
            literal: "42".to_string(),
        }
    );
}

#[test]
fn test_send_empty_literal() {
    assert_eq!(
        parse("send bytestring "),
        Command::Send {
            tag: TypeTag::ByteString,
            literal: String::new(),
        }
    );
}

#[test]
fn test_send_missing_pieces() {
    let err = parse_err("send");
    assert!(matches!(err, ProbeError::WrongArgumentCount { have: 0, expected: 2 }));

    let err = parse_err("send int");
    assert!(matches!(err, ProbeError::WrongArgumentCount { have: 1, expected: 2 }));
}

#[test]
fn test_send_unknown_tag() {
    let err = parse_err("send int128 5");
    assert!(matches!(err, ProbeError::UnknownType(ref t) if t == "int128"));
}

// =============================================================================
// Command Table Tests
// =============================================================================

#[test]
fn test_command_table() {
    let arity = |name: &str| COMMANDS.iter().find(|c| c.name == name).unwrap().arity;

    assert_eq!(arity("help"), Arity::Exactly(0));
    assert_eq!(arity("close"), Arity::Exactly(0));
    assert_eq!(arity("status"), Arity::Exactly(0));
    assert_eq!(arity("ping"), Arity::Exactly(0));
    assert_eq!(arity("connect"), Arity::Exactly(2));
    assert_eq!(arity("read"), Arity::Exactly(1));
    assert_eq!(arity("timeout"), Arity::OneOf(&[0, 1]));
    assert_eq!(arity("send"), Arity::Verbatim);
}

#[test]
fn test_parsed_command_names() {
    for spec in COMMANDS {
        let line = match spec.name {
            "connect" => "connect h 1",
            "send" => "send int 1",
            "read" => "read int",
            other => other,
        };
        assert_eq!(parse(line).name(), spec.name);
    }
}
