//! Power control trait

/// Trait for the sleep/wake transitions of the power scheduler
pub trait PowerControl {
    /// Arm the hardware wake timer for `interval_s` seconds and enter
    /// deep sleep.
    ///
    /// On real hardware this does not return: the node loses all state
    /// and restarts from scratch when the timer fires. Host fakes record
    /// the armed interval and return, which ends the scheduler run.
    async fn deep_sleep(&mut self, interval_s: u32);

    /// Plain blocking delay between continuous-loop iterations
    async fn idle_delay(&mut self, interval_s: u32);
}
