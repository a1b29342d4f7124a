// ===== keyforge-protocol/src/frame.rs =====
use std::fmt;

/// Outbound sentinel markers. Emitted on their own line after the rendered
/// text for a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentinel {
    /// Command complete, ready for the next command (normal mode).
    Done,
    /// Command complete, session remains in interactive mode.
    Hold,
    /// Peer should clear its display before rendering the following text.
    Clear,
}

impl Sentinel {
    pub fn as_str(self) -> &'static str {
        match self {
            Sentinel::Done => "[DONE]",
            Sentinel::Hold => "[HOLD]",
            Sentinel::Clear => "[CLEAR]",
        }
    }
}

impl fmt::Display for Sentinel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
