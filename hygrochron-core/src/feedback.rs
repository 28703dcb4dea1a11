//! Visual status feedback
//!
//! Outcomes are encoded as blink patterns on the board indicator. Two
//! cadences are used by convention: "quick" for sub-step progress during
//! network association, "slow" for the whole-cycle outcome.

use embedded_hal_async::delay::DelayNs;

use crate::traits::Indicator;

/// One blink cadence: `repetitions` on/off toggles, each half a period long
///
/// Pure description; it is not tied to any particular output device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BlinkPattern {
    pub period_ms: u32,
    pub repetitions: u8,
}

impl BlinkPattern {
    /// Quick cadence, one full on/off per 100 ms
    pub const fn quick(repetitions: u8) -> Self {
        Self {
            period_ms: 100,
            repetitions,
        }
    }

    /// Slow cadence, one full on/off per second
    pub const fn slow(repetitions: u8) -> Self {
        Self {
            period_ms: 1000,
            repetitions,
        }
    }

    /// One quick blink per second of association waiting
    pub const ASSOCIATION_WAIT: Self = Self::quick(1);
    /// Association established
    pub const ASSOCIATION_OK: Self = Self::quick(3);
    /// Whole cycle completed
    pub const CYCLE_OK: Self = Self::slow(1);
    /// Cycle ended at the failure boundary
    pub const CYCLE_ERROR: Self = Self::slow(3);
}

/// Plays blink patterns on the indicator
pub struct StatusFeedback<I, T> {
    indicator: I,
    delay: T,
}

impl<I: Indicator, T: DelayNs> StatusFeedback<I, T> {
    pub fn new(indicator: I, delay: T) -> Self {
        Self { indicator, delay }
    }

    /// Play one pattern, ending with the indicator logically off
    pub async fn signal(&mut self, pattern: BlinkPattern) {
        let half = pattern.period_ms / 2;
        for _ in 0..pattern.repetitions {
            self.indicator.set_on(true);
            self.delay.delay_ms(half).await;
            self.indicator.set_on(false);
            self.delay.delay_ms(half).await;
        }
    }
}
