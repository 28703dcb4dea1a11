//! Configuration type definitions
//!
//! All configuration is explicit values passed by the firmware at startup;
//! there is no ambient mutable configuration state.

use crate::reading::Unit;

/// Snapshot of the toggle inputs, taken once at cycle start
///
/// The snapshot is immutable for the duration of the cycle: a toggle
/// flipped mid-cycle only affects the next cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleConfig {
    /// Debug override: suppress sleep and halt further cycling
    pub debug_enabled: bool,
    /// Report the reading to the remote endpoint this cycle
    pub cloud_reporting_enabled: bool,
}

/// Power scheduling strategy, fixed for the process lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerMode {
    /// Run one cycle, then deep-sleep until the hardware wake timer fires.
    /// The process restarts from scratch on wake.
    DeepSleep { interval_s: u32 },
    /// Run cycles in a loop with a plain blocking delay in between.
    ContinuousLoop { interval_s: u32 },
}

/// Fixed per-build node settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NodeSettings {
    /// Unit the reading is converted to right after acquisition
    pub unit: Unit,
    /// How long the display stays powered after a render
    pub display_hold_s: u16,
    /// Upper bound on the network association polling wait
    pub association_timeout_s: u16,
}

impl Default for NodeSettings {
    fn default() -> Self {
        Self {
            unit: Unit::Celsius,
            display_hold_s: 10,
            association_timeout_s: 30,
        }
    }
}
