//! GPIO blink indicator
//!
//! Drives the status LED. Board LEDs are commonly wired between the pin
//! and the supply rail, so "on" means driving the pin low; the wiring
//! polarity is handled here and nowhere else.

use hygrochron_core::traits::Indicator;

/// Trait for GPIO pin abstraction
pub trait OutputPin {
    /// Drive the pin high
    fn set_high(&mut self);

    /// Drive the pin low
    fn set_low(&mut self);
}

/// GPIO indicator LED
pub struct GpioIndicator<P> {
    pin: P,
    /// If true, LED ON = pin LOW
    inverted: bool,
}

impl<P: OutputPin> GpioIndicator<P> {
    /// Create a new GPIO indicator
    ///
    /// # Arguments
    /// - `pin`: The GPIO pin the LED is wired to
    /// - `inverted`: If true, the LED lights when the pin is LOW
    pub fn new(pin: P, inverted: bool) -> Self {
        let mut indicator = Self { pin, inverted };
        // Start dark
        indicator.set_on(false);
        indicator
    }

    /// LED between pin and ground
    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    /// LED between pin and the supply rail
    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, true)
    }
}

impl<P: OutputPin> Indicator for GpioIndicator<P> {
    fn set_on(&mut self, on: bool) {
        if on != self.inverted {
            self.pin.set_high();
        } else {
            self.pin.set_low();
        }
    }
}
