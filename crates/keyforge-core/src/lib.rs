// ===== keyforge-core/src/lib.rs =====
//! Scoring, geometry, and optimization engine for keyboard layouts: the
//! corpus model, layout model, metrics, scorer, optimizer, and suggestion
//! search that a session drives interactively.

pub mod config;
pub mod consts;
pub mod corpus;
pub mod error;
pub mod layout;
pub mod metrics;
pub mod minimize;
pub mod optimizer;
pub mod pins;
pub mod scorer;
pub mod suggest;

pub use config::Config;
pub use corpus::TextData;
pub use error::{KeyForgeError, KfResult};
pub use layout::{Finger, Layout, Position, RowWidths};
pub use metrics::Flags;
pub use pins::PinGrid;
pub use scorer::Scorer;
