// ===== keyforge-protocol/src/lib.rs =====
//! The textual command/response line protocol shared between a session and
//! its peer: command parsing and the outbound sentinel frames.

pub mod command;
pub mod error;
pub mod frame;

pub use command::{take_flags, parse_interactive, parse_normal, ColumnRef, FlagSet, InteractiveCommand, NormalCommand};
pub use error::ProtocolError;
pub use frame::Sentinel;
