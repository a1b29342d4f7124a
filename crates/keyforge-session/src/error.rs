// ===== keyforge-session/src/error.rs =====
use keyforge_core::KeyForgeError;
use keyforge_protocol::ProtocolError;
use thiserror::Error;

/// Errors that abort the *current command* but never the session or the
/// process. The dispatcher catches these at the command boundary and
/// renders a textual error frame before returning to `[DONE]`/`[HOLD]`.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Core(#[from] KeyForgeError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("unknown layout {0:?}")]
    UnknownLayout(String),

    /// A worker thread panicked mid-optimization; caught via
    /// `catch_unwind` and rendered as a short trace, never propagated.
    #[error("worker panicked: {0}")]
    Worker(String),
}

pub type SessionResult<T> = Result<T, SessionError>;
