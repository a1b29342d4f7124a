// ===== keyforge-core/src/error.rs =====
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeyForgeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corpus JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("malformed layout: {0}")]
    Layout(String),
}

pub type KfResult<T> = Result<T, KeyForgeError>;
