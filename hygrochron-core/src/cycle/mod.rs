//! Cycle execution
//!
//! One cycle is acquire -> (render) -> (report) -> signal, wrapped in a
//! single failure boundary.

pub mod executor;

pub use executor::{CycleError, CycleExecutor, CycleOutcome, ReportError};
