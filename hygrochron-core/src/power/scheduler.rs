//! Power scheduler state machine
//!
//! The mode is fixed at startup. Each cycle consumes exactly one
//! configuration snapshot; the debug override is observed only at cycle
//! boundaries, through that snapshot, never mid-cycle. Cycle failures do
//! not alter scheduling: the next interval runs (or the node sleeps)
//! regardless of the outcome.

use embedded_hal_async::delay::DelayNs;

use crate::config::{ConfigSource, PowerMode};
use crate::cycle::CycleExecutor;
use crate::traits::{
    CloudLink, EnvironmentSensor, Indicator, PowerControl, ReadingDisplay,
};

/// Scheduler state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SchedulerState {
    /// Not started yet
    Idle,
    /// A cycle is executing
    Running,
    /// Between cycles (or gone into deep sleep)
    Sleeping,
    /// Debug override asserted: halted for inspection, no further cycles
    DebugHold,
}

/// Drives the cycle executor under the configured power mode
pub struct PowerScheduler<P, G> {
    mode: PowerMode,
    state: SchedulerState,
    power: P,
    source: G,
}

impl<P, G> PowerScheduler<P, G>
where
    P: PowerControl,
    G: ConfigSource,
{
    pub fn new(mode: PowerMode, power: P, source: G) -> Self {
        Self {
            mode,
            state: SchedulerState::Idle,
            power,
            source,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn mode(&self) -> PowerMode {
        self.mode
    }

    /// Run the node under the configured mode
    ///
    /// Returns only when the debug override halts the machine in
    /// `DebugHold` (or, on hosts, when the deep-sleep fake returns).
    pub async fn run<S, D, C, I, T>(&mut self, executor: &mut CycleExecutor<S, D, C, I, T>)
    where
        S: EnvironmentSensor,
        D: ReadingDisplay,
        C: CloudLink,
        I: Indicator,
        T: DelayNs,
    {
        match self.mode {
            PowerMode::DeepSleep { interval_s } => self.run_deep_sleep(executor, interval_s).await,
            PowerMode::ContinuousLoop { interval_s } => self.run_loop(executor, interval_s).await,
        }
    }

    async fn run_deep_sleep<S, D, C, I, T>(
        &mut self,
        executor: &mut CycleExecutor<S, D, C, I, T>,
        interval_s: u32,
    ) where
        S: EnvironmentSensor,
        D: ReadingDisplay,
        C: CloudLink,
        I: Indicator,
        T: DelayNs,
    {
        info!("deep-sleep mode, interval {} s", interval_s);

        let config = self.source.read();
        self.state = SchedulerState::Running;
        executor.run_cycle(config).await;

        if config.debug_enabled {
            info!("debug override asserted, holding for inspection");
            self.state = SchedulerState::DebugHold;
            return;
        }

        self.state = SchedulerState::Sleeping;
        info!("entering deep sleep for {} s", interval_s);
        self.power.deep_sleep(interval_s).await;
        // On real hardware the node restarts from scratch instead of
        // reaching this point
    }

    async fn run_loop<S, D, C, I, T>(
        &mut self,
        executor: &mut CycleExecutor<S, D, C, I, T>,
        interval_s: u32,
    ) where
        S: EnvironmentSensor,
        D: ReadingDisplay,
        C: CloudLink,
        I: Indicator,
        T: DelayNs,
    {
        info!("continuous-loop mode, interval {} s", interval_s);

        loop {
            let config = self.source.read();
            if config.debug_enabled {
                info!("debug override asserted, leaving the loop");
                self.state = SchedulerState::DebugHold;
                return;
            }

            self.state = SchedulerState::Running;
            executor.run_cycle(config).await;

            self.state = SchedulerState::Sleeping;
            self.power.idle_delay(interval_s).await;
        }
    }
}
