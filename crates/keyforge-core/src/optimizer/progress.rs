// ===== keyforge-core/src/optimizer/progress.rs =====

/// Which optimizer stage a progress sample belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Greedy,
    FullImprove,
}

/// Invoked roughly once per second from the session thread while optimizer
/// workers run. Implementations render a progress frame to the peer; they
/// must not block the calling thread for long, since the thread is also
/// what detects worker completion.
pub trait ProgressCallback: Send + Sync {
    fn on_progress(&self, stage: Stage, active_workers: u64, analyzed_per_sec: u64);
}

/// A callback that does nothing; useful for tests and batch/offline runs.
pub struct NullProgress;

impl ProgressCallback for NullProgress {
    fn on_progress(&self, _stage: Stage, _active_workers: u64, _analyzed_per_sec: u64) {}
}
