//! Power scheduling
//!
//! Drives the cycle executor under one of two fixed strategies: a single
//! cycle followed by hardware-timed deep sleep, or an endless software
//! loop with a plain delay between cycles.

pub mod scheduler;

pub use scheduler::{PowerScheduler, SchedulerState};
