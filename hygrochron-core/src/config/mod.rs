//! Runtime configuration
//!
//! Per-cycle snapshots read from physical toggles, plus the fixed
//! per-build settings passed in by the firmware at startup.

pub mod provider;
pub mod types;

pub use provider::{ConfigSource, TogglePair, ToggleInput};
pub use types::{CycleConfig, NodeSettings, PowerMode};
