//! Status indicator trait

/// Trait for the blink indicator
///
/// `on` is logical: implementations apply the wiring polarity (the usual
/// board LED is active-low), so `set_on(false)` always means "dark".
pub trait Indicator {
    fn set_on(&mut self, on: bool);
}
