//! Board adapters
//!
//! Thin newtypes bridging embassy-rp peripherals to the driver and core
//! capability traits.

use cortex_m::peripheral::SCB;
use embassy_rp::gpio::{Flex, Input, Output, Pull};
use embassy_time::Timer;

use hygrochron_core::config::ToggleInput;
use hygrochron_core::traits::PowerControl;
use hygrochron_drivers::indicator::OutputPin;
use hygrochron_drivers::sensor::DataLine;

/// DHT22 data line on a direction-switching pin
///
/// The line idles as an input; driving low switches to output, releasing
/// hands it back to the pull-up.
pub struct DhtLine(Flex<'static>);

impl DhtLine {
    pub fn new(mut pin: Flex<'static>) -> Self {
        pin.set_pull(Pull::Up);
        pin.set_as_input();
        Self(pin)
    }
}

impl DataLine for DhtLine {
    fn set_low(&mut self) {
        self.0.set_low();
        self.0.set_as_output();
    }

    fn release(&mut self) {
        self.0.set_as_input();
    }

    fn is_high(&mut self) -> bool {
        self.0.is_high()
    }
}

/// Configuration toggle with the internal pull-up enabled
pub struct PullUpToggle(pub Input<'static>);

impl ToggleInput for PullUpToggle {
    fn is_low(&mut self) -> bool {
        self.0.is_low()
    }
}

/// Status LED pin
pub struct LedPin(pub Output<'static>);

impl OutputPin for LedPin {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }
}

/// Sleep/wake transitions for the power scheduler
///
/// embassy-rp does not expose the RP2040 dormant mode, so deep sleep is a
/// timed park followed by a full system reset: the node comes back exactly
/// as if the wake alarm had restarted it, with no surviving state.
pub struct BoardPower;

impl PowerControl for BoardPower {
    async fn deep_sleep(&mut self, interval_s: u32) {
        Timer::after_secs(u64::from(interval_s)).await;
        SCB::sys_reset();
    }

    async fn idle_delay(&mut self, interval_s: u32) {
        Timer::after_secs(u64::from(interval_s)).await;
    }
}
