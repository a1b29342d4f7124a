// ===== keyforge-protocol/src/error.rs =====
use thiserror::Error;

/// A lookup error in the line protocol: unknown command, unknown flag, or a
/// missing argument. Reported as a one-line usage message; the command
/// completes normally (this is not a fatal error).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("unknown flag: {0}")]
    UnknownFlag(String),

    #[error("missing argument: {0}")]
    MissingArgument(String),

    #[error("empty command line")]
    Empty,
}
