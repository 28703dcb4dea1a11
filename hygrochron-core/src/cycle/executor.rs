//! Cycle executor
//!
//! Runs one full duty cycle against the configuration snapshot taken at
//! cycle start. The whole stage sequence sits behind a single failure
//! boundary: the first failing stage short-circuits the rest, gets logged,
//! and is reported as one slow error pattern. A failed cycle never
//! escalates past the boundary; the next scheduled cycle is the only
//! retry mechanism.

use embedded_hal_async::delay::DelayNs;

use crate::config::{CycleConfig, NodeSettings};
use crate::feedback::{BlinkPattern, StatusFeedback};
use crate::traits::{
    CloudError, CloudLink, DisplayError, EnvironmentSensor, Indicator, ReadingDisplay,
    RenderStyle, SensorError, StatusCode,
};

/// Why a report did not go through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReportError {
    /// Lost in transport
    Transport(CloudError),
    /// Endpoint answered with a failure status (>= 400)
    Rejected(StatusCode),
}

/// First failure of a cycle, tagged with the stage it happened in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleError {
    Acquisition(SensorError),
    Render(DisplayError),
    /// Association failed to start or did not come up within the bound
    Connectivity(CloudError),
    Reporting(ReportError),
}

/// Result of one cycle. Never persisted past the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleOutcome {
    Success,
    Failure(CycleError),
}

impl CycleOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CycleOutcome::Success)
    }
}

/// Owns the cycle collaborators and runs the stage sequence
pub struct CycleExecutor<S, D, C, I, T> {
    sensor: S,
    display: D,
    cloud: C,
    feedback: StatusFeedback<I, T>,
    delay: T,
    settings: NodeSettings,
}

impl<S, D, C, I, T> CycleExecutor<S, D, C, I, T>
where
    S: EnvironmentSensor,
    D: ReadingDisplay,
    C: CloudLink,
    I: Indicator,
    T: DelayNs,
{
    pub fn new(
        sensor: S,
        display: D,
        cloud: C,
        feedback: StatusFeedback<I, T>,
        delay: T,
        settings: NodeSettings,
    ) -> Self {
        Self {
            sensor,
            display,
            cloud,
            feedback,
            delay,
            settings,
        }
    }

    /// Run one full cycle and signal its outcome
    ///
    /// Emits exactly one whole-cycle pattern: slow x1 on success, slow x3
    /// on the first failure.
    pub async fn run_cycle(&mut self, config: CycleConfig) -> CycleOutcome {
        info!("cycle start: {:?}", config);
        match self.try_cycle(config).await {
            Ok(()) => {
                info!("cycle complete");
                self.feedback.signal(BlinkPattern::CYCLE_OK).await;
                CycleOutcome::Success
            }
            Err(err) => {
                warn!("cycle failed: {:?}", err);
                self.feedback.signal(BlinkPattern::CYCLE_ERROR).await;
                CycleOutcome::Failure(err)
            }
        }
    }

    async fn try_cycle(&mut self, config: CycleConfig) -> Result<(), CycleError> {
        let reading = self
            .sensor
            .measure()
            .await
            .map_err(CycleError::Acquisition)?;
        // Unit conversion happens exactly once, right here
        let reading = reading.into_unit(self.settings.unit);
        info!(
            "measured {} deg ({:?}), {} %RH",
            reading.temperature, reading.unit, reading.humidity
        );

        // Plain rendering leaves the network stack its memory headroom
        // whenever a report is due in the same cycle
        let style = if config.cloud_reporting_enabled {
            RenderStyle::Plain
        } else {
            RenderStyle::Rich
        };
        self.display
            .render(&reading, style)
            .await
            .map_err(CycleError::Render)?;
        self.delay
            .delay_ms(u32::from(self.settings.display_hold_s) * 1000)
            .await;
        self.display.power_off().await.map_err(CycleError::Render)?;

        if config.cloud_reporting_enabled {
            self.associate().await?;
            let status = self
                .cloud
                .report(&reading)
                .await
                .map_err(|e| CycleError::Reporting(ReportError::Transport(e)))?;
            if !status.is_success() {
                return Err(CycleError::Reporting(ReportError::Rejected(status)));
            }
            info!("report accepted with status {}", status.0);
        }

        Ok(())
    }

    /// Bring the link up, blinking progress once per polled second
    async fn associate(&mut self) -> Result<(), CycleError> {
        self.cloud
            .start_association()
            .await
            .map_err(CycleError::Connectivity)?;

        let mut waited_s: u16 = 0;
        while !self.cloud.poll_associated().await {
            if waited_s >= self.settings.association_timeout_s {
                warn!("association still down after {} s", waited_s);
                return Err(CycleError::Connectivity(CloudError::Timeout));
            }
            self.feedback.signal(BlinkPattern::ASSOCIATION_WAIT).await;
            self.delay.delay_ms(1000).await;
            waited_s += 1;
        }

        info!("associated after {} s", waited_s);
        self.feedback.signal(BlinkPattern::ASSOCIATION_OK).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use embassy_futures::block_on;

    use super::*;
    use crate::reading::{Reading, Unit};

    /// Everything observable, in call order, shared by all fakes
    #[derive(Debug, Clone, PartialEq)]
    enum Ev {
        Measure,
        Render(RenderStyle),
        PowerOff,
        StartAssociation,
        Poll,
        Report,
        Led(bool),
        Delay(u32),
    }

    type Log = Rc<RefCell<Vec<Ev>>>;

    struct FakeSensor {
        log: Log,
        result: Result<Reading, SensorError>,
    }

    impl EnvironmentSensor for FakeSensor {
        async fn measure(&mut self) -> Result<Reading, SensorError> {
            self.log.borrow_mut().push(Ev::Measure);
            self.result
        }
    }

    struct FakeDisplay {
        log: Log,
        result: Result<(), DisplayError>,
    }

    impl ReadingDisplay for FakeDisplay {
        async fn render(
            &mut self,
            _reading: &Reading,
            style: RenderStyle,
        ) -> Result<(), DisplayError> {
            self.log.borrow_mut().push(Ev::Render(style));
            self.result
        }

        async fn power_off(&mut self) -> Result<(), DisplayError> {
            self.log.borrow_mut().push(Ev::PowerOff);
            Ok(())
        }
    }

    struct FakeCloud {
        log: Log,
        /// Polls answered "not yet" before association comes up
        polls_until_up: u32,
        report_result: Result<StatusCode, CloudError>,
        reported: Rc<RefCell<Vec<Reading>>>,
    }

    impl CloudLink for FakeCloud {
        async fn start_association(&mut self) -> Result<(), CloudError> {
            self.log.borrow_mut().push(Ev::StartAssociation);
            Ok(())
        }

        async fn poll_associated(&mut self) -> bool {
            self.log.borrow_mut().push(Ev::Poll);
            if self.polls_until_up == 0 {
                true
            } else {
                self.polls_until_up -= 1;
                false
            }
        }

        async fn report(&mut self, reading: &Reading) -> Result<StatusCode, CloudError> {
            self.log.borrow_mut().push(Ev::Report);
            self.reported.borrow_mut().push(*reading);
            self.report_result
        }
    }

    struct SharedLed(Log);

    impl Indicator for SharedLed {
        fn set_on(&mut self, on: bool) {
            self.0.borrow_mut().push(Ev::Led(on));
        }
    }

    struct SharedDelay(Log);

    impl DelayNs for SharedDelay {
        async fn delay_ns(&mut self, ns: u32) {
            self.0.borrow_mut().push(Ev::Delay(ns / 1_000_000));
        }

        async fn delay_ms(&mut self, ms: u32) {
            self.0.borrow_mut().push(Ev::Delay(ms));
        }
    }

    struct Harness {
        log: Log,
        reported: Rc<RefCell<Vec<Reading>>>,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                log: Rc::new(RefCell::new(Vec::new())),
                reported: Rc::new(RefCell::new(Vec::new())),
            }
        }

        fn executor(
            &self,
            sensor_result: Result<Reading, SensorError>,
            display_result: Result<(), DisplayError>,
            polls_until_up: u32,
            report_result: Result<StatusCode, CloudError>,
            settings: NodeSettings,
        ) -> CycleExecutor<FakeSensor, FakeDisplay, FakeCloud, SharedLed, SharedDelay> {
            CycleExecutor::new(
                FakeSensor {
                    log: self.log.clone(),
                    result: sensor_result,
                },
                FakeDisplay {
                    log: self.log.clone(),
                    result: display_result,
                },
                FakeCloud {
                    log: self.log.clone(),
                    polls_until_up,
                    report_result,
                    reported: self.reported.clone(),
                },
                StatusFeedback::new(SharedLed(self.log.clone()), SharedDelay(self.log.clone())),
                SharedDelay(self.log.clone()),
                settings,
            )
        }

        fn events(&self) -> Vec<Ev> {
            self.log.borrow().clone()
        }
    }

    fn ok_reading() -> Result<Reading, SensorError> {
        Ok(Reading::celsius(21.5, 48.0))
    }

    /// Expected event tail for `n` repetitions at `half_ms` half-period
    fn blinks(n: usize, half_ms: u32) -> Vec<Ev> {
        let mut out = Vec::new();
        for _ in 0..n {
            out.extend([
                Ev::Led(true),
                Ev::Delay(half_ms),
                Ev::Led(false),
                Ev::Delay(half_ms),
            ]);
        }
        out
    }

    fn count_whole_cycle_signals(events: &[Ev]) -> usize {
        // Whole-cycle patterns are the only slow-cadence blinks
        events
            .iter()
            .filter(|e| matches!(e, Ev::Delay(500)))
            .count()
            / 2
    }

    #[test]
    fn test_success_without_cloud() {
        let h = Harness::new();
        let mut exec = h.executor(
            ok_reading(),
            Ok(()),
            0,
            Ok(StatusCode(200)),
            NodeSettings::default(),
        );

        let outcome = block_on(exec.run_cycle(CycleConfig::default()));

        assert_eq!(outcome, CycleOutcome::Success);
        let mut expected = vec![
            Ev::Measure,
            Ev::Render(RenderStyle::Rich),
            Ev::Delay(10_000),
            Ev::PowerOff,
        ];
        expected.extend(blinks(1, 500));
        assert_eq!(h.events(), expected);
        // No network traffic when cloud reporting is off
        assert!(h.reported.borrow().is_empty());
    }

    #[test]
    fn test_acquisition_failure_aborts_remaining_steps() {
        let h = Harness::new();
        let mut exec = h.executor(
            Err(SensorError::Checksum),
            Ok(()),
            0,
            Ok(StatusCode(200)),
            NodeSettings::default(),
        );

        let outcome = block_on(exec.run_cycle(CycleConfig {
            debug_enabled: false,
            cloud_reporting_enabled: true,
        }));

        assert_eq!(
            outcome,
            CycleOutcome::Failure(CycleError::Acquisition(SensorError::Checksum))
        );
        // No render, no association, no report - just the error pattern
        let mut expected = vec![Ev::Measure];
        expected.extend(blinks(3, 500));
        assert_eq!(h.events(), expected);
    }

    #[test]
    fn test_render_failure_skips_report() {
        let h = Harness::new();
        let mut exec = h.executor(
            ok_reading(),
            Err(DisplayError::NotDetected),
            0,
            Ok(StatusCode(200)),
            NodeSettings::default(),
        );

        let outcome = block_on(exec.run_cycle(CycleConfig {
            debug_enabled: false,
            cloud_reporting_enabled: true,
        }));

        assert_eq!(
            outcome,
            CycleOutcome::Failure(CycleError::Render(DisplayError::NotDetected))
        );
        assert!(!h.events().contains(&Ev::Report));
        assert_eq!(count_whole_cycle_signals(&h.events()), 3);
    }

    #[test]
    fn test_style_follows_cloud_flag() {
        for (cloud_enabled, style) in [(true, RenderStyle::Plain), (false, RenderStyle::Rich)] {
            let h = Harness::new();
            let mut exec = h.executor(
                ok_reading(),
                Ok(()),
                0,
                Ok(StatusCode(200)),
                NodeSettings::default(),
            );

            block_on(exec.run_cycle(CycleConfig {
                debug_enabled: false,
                cloud_reporting_enabled: cloud_enabled,
            }));

            assert!(h.events().contains(&Ev::Render(style)));
        }
    }

    #[test]
    fn test_association_progress_blinks() {
        let h = Harness::new();
        let mut exec = h.executor(
            ok_reading(),
            Ok(()),
            3,
            Ok(StatusCode(200)),
            NodeSettings::default(),
        );

        let outcome = block_on(exec.run_cycle(CycleConfig {
            debug_enabled: false,
            cloud_reporting_enabled: true,
        }));

        assert_eq!(outcome, CycleOutcome::Success);
        let mut expected = vec![
            Ev::Measure,
            Ev::Render(RenderStyle::Plain),
            Ev::Delay(10_000),
            Ev::PowerOff,
            Ev::StartAssociation,
        ];
        // Three polled seconds: quick waiting blink + 1 s delay each
        for _ in 0..3 {
            expected.push(Ev::Poll);
            expected.extend(blinks(1, 50));
            expected.push(Ev::Delay(1000));
        }
        expected.push(Ev::Poll);
        // Association success: quick x3, independent of the final outcome
        expected.extend(blinks(3, 50));
        expected.push(Ev::Report);
        expected.extend(blinks(1, 500));
        assert_eq!(h.events(), expected);
    }

    #[test]
    fn test_association_timeout_is_connectivity_failure() {
        let h = Harness::new();
        let settings = NodeSettings {
            association_timeout_s: 2,
            ..NodeSettings::default()
        };
        let mut exec = h.executor(ok_reading(), Ok(()), u32::MAX, Ok(StatusCode(200)), settings);

        let outcome = block_on(exec.run_cycle(CycleConfig {
            debug_enabled: false,
            cloud_reporting_enabled: true,
        }));

        assert_eq!(
            outcome,
            CycleOutcome::Failure(CycleError::Connectivity(CloudError::Timeout))
        );
        assert!(!h.events().contains(&Ev::Report));
        assert_eq!(count_whole_cycle_signals(&h.events()), 3);
    }

    #[test]
    fn test_rejected_status_equals_transport_failure() {
        for report_result in [Ok(StatusCode(400)), Err(CloudError::Transport)] {
            let h = Harness::new();
            let mut exec = h.executor(
                ok_reading(),
                Ok(()),
                0,
                report_result,
                NodeSettings::default(),
            );

            let outcome = block_on(exec.run_cycle(CycleConfig {
                debug_enabled: false,
                cloud_reporting_enabled: true,
            }));

            assert!(matches!(
                outcome,
                CycleOutcome::Failure(CycleError::Reporting(_))
            ));
            // Identical externally observable behavior: slow error x3
            assert_eq!(count_whole_cycle_signals(&h.events()), 3);
        }
    }

    #[test]
    fn test_unit_conversion_applied_before_reporting() {
        let h = Harness::new();
        let settings = NodeSettings {
            unit: Unit::Fahrenheit,
            ..NodeSettings::default()
        };
        let mut exec = h.executor(ok_reading(), Ok(()), 0, Ok(StatusCode(200)), settings);

        block_on(exec.run_cycle(CycleConfig {
            debug_enabled: false,
            cloud_reporting_enabled: true,
        }));

        let reported = h.reported.borrow();
        assert_eq!(reported.len(), 1);
        assert_eq!(reported[0].unit, Unit::Fahrenheit);
        assert!((reported[0].temperature - 70.7).abs() < 0.01);
    }

    #[test]
    fn test_exactly_one_outcome_signal_per_cycle() {
        for sensor_result in [ok_reading(), Err(SensorError::Timeout)] {
            for cloud_enabled in [false, true] {
                let h = Harness::new();
                let mut exec = h.executor(
                    sensor_result,
                    Ok(()),
                    0,
                    Ok(StatusCode(200)),
                    NodeSettings::default(),
                );

                let outcome = block_on(exec.run_cycle(CycleConfig {
                    debug_enabled: false,
                    cloud_reporting_enabled: cloud_enabled,
                }));

                let expected_reps = if outcome.is_success() { 1 } else { 3 };
                assert_eq!(count_whole_cycle_signals(&h.events()), expected_reps);
            }
        }
    }
}
