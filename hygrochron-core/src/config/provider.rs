//! Toggle-input configuration provider
//!
//! The node is configured in the field with physical jumpers: a toggle
//! wired to ground means "enabled", an open input floats high through the
//! pull-up and means "disabled". That polarity inversion is applied here,
//! once, so everything downstream sees plain booleans.

use super::types::CycleConfig;

/// Source of per-cycle configuration snapshots
///
/// Called exactly once per cycle, at cycle start.
pub trait ConfigSource {
    fn read(&mut self) -> CycleConfig;
}

/// Raw electrical level of one configuration toggle
///
/// Implementations read the pin as wired; they do not interpret polarity.
pub trait ToggleInput {
    /// True when the input is at the low electrical level
    fn is_low(&mut self) -> bool;
}

/// The canonical provider: one toggle per configuration flag
pub struct TogglePair<D, C> {
    debug: D,
    cloud: C,
}

impl<D, C> TogglePair<D, C> {
    pub fn new(debug: D, cloud: C) -> Self {
        Self { debug, cloud }
    }
}

impl<D: ToggleInput, C: ToggleInput> ConfigSource for TogglePair<D, C> {
    fn read(&mut self) -> CycleConfig {
        // Low = jumpered to ground = enabled
        let config = CycleConfig {
            debug_enabled: self.debug.is_low(),
            cloud_reporting_enabled: self.cloud.is_low(),
        };
        debug!("config snapshot: {:?}", config);
        config
    }
}
