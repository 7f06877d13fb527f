//! Sensor report service: the per-report entry point and the sample queries.

use std::time::Duration;

use pumpctl_domain::error::{PumpError, ValidationError};
use pumpctl_domain::sensor::{SensorReading, SensorSample};

use crate::ports::{Clock, ControlStateStore, ScheduleStore, SensorLog};
use crate::services::decision_evaluator::DecisionEvaluator;
use crate::services::{DEFAULT_STORAGE_TIMEOUT, bounded};

/// Number of samples returned by [`SensorReportService::history`] by default.
pub const DEFAULT_HISTORY_LIMIT: usize = 7;

/// Largest history window a caller may ask for.
pub const MAX_HISTORY_LIMIT: usize = 500;

/// Handles one sensor report: resolve the command, then log it with the readings.
pub struct SensorReportService<CS, SS, SL, C> {
    evaluator: DecisionEvaluator<CS, SS>,
    log: SL,
    clock: C,
    timeout: Duration,
}

impl<CS, SS, SL, C> SensorReportService<CS, SS, SL, C>
where
    CS: ControlStateStore + Clone,
    SS: ScheduleStore,
    SL: SensorLog,
    C: Clock,
{
    /// Create a new service around an evaluator, a sample log and a clock.
    pub fn new(evaluator: DecisionEvaluator<CS, SS>, log: SL, clock: C) -> Self {
        Self {
            evaluator,
            log,
            clock,
            timeout: DEFAULT_STORAGE_TIMEOUT,
        }
    }

    /// Override the deadline for sample log calls.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolve the pump command for this report and persist the sample.
    ///
    /// The clock is read once; the same instant drives the decision and
    /// stamps the sample.
    ///
    /// # Errors
    ///
    /// Returns [`PumpError::StorageUnavailable`] if evaluation or the append
    /// fails. The caller chooses the fallback command.
    #[tracing::instrument(skip(self))]
    pub async fn report(&self, reading: SensorReading) -> Result<SensorSample, PumpError> {
        let now = self.clock.now();
        let command = self.evaluator.evaluate(now).await?;
        let sample = SensorSample::new(reading, command, now.timestamp);
        let sample = bounded(self.timeout, self.log.append(sample)).await?;
        tracing::info!(%command, sample_id = %sample.id, "sensor report recorded");
        Ok(sample)
    }

    /// The most recent sample, if any report was recorded yet.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the log.
    pub async fn latest(&self) -> Result<Option<SensorSample>, PumpError> {
        bounded(self.timeout, self.log.latest()).await
    }

    /// The last `limit` samples, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidLimit`] when `limit` is zero or above
    /// [`MAX_HISTORY_LIMIT`], or a storage error propagated from the log.
    pub async fn history(&self, limit: usize) -> Result<Vec<SensorSample>, PumpError> {
        if limit == 0 || limit > MAX_HISTORY_LIMIT {
            return Err(ValidationError::InvalidLimit {
                got: limit,
                max: MAX_HISTORY_LIMIT,
            }
            .into());
        }
        let mut samples = bounded(self.timeout, self.log.recent(limit)).await?;
        samples.reverse();
        Ok(samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::testing::{InMemoryControlStore, InMemoryScheduleStore, InMemorySensorLog};
    use chrono::{Duration as Delta, TimeZone, Utc};
    use pumpctl_domain::control::ControlState;
    use pumpctl_domain::pump::PumpCommand;
    use pumpctl_domain::schedule::Schedule;
    use pumpctl_domain::time::{TimeOfDay, Timestamp};
    use std::sync::Arc;

    type Service = SensorReportService<
        Arc<InMemoryControlStore>,
        Arc<InMemoryScheduleStore>,
        Arc<InMemorySensorLog>,
        Arc<ManualClock>,
    >;

    struct Fixture {
        control: Arc<InMemoryControlStore>,
        log: Arc<InMemorySensorLog>,
        clock: Arc<ManualClock>,
        service: Service,
    }

    fn t0() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 5, 1, 6, 15, 0).unwrap()
    }

    fn fixture(state: ControlState, schedules: Vec<Schedule>) -> Fixture {
        let control = Arc::new(InMemoryControlStore::provisioned(state));
        let schedules = Arc::new(InMemoryScheduleStore::with(schedules));
        let log = Arc::new(InMemorySensorLog::default());
        let clock = Arc::new(ManualClock::new(t0()));
        let evaluator = DecisionEvaluator::new(Arc::clone(&control), schedules);
        let service = SensorReportService::new(evaluator, Arc::clone(&log), Arc::clone(&clock));
        Fixture {
            control,
            log,
            clock,
            service,
        }
    }

    fn reading(moisture_level: f64) -> SensorReading {
        SensorReading {
            moisture_level,
            water_level: 75.0,
        }
    }

    fn morning_window() -> Schedule {
        Schedule::builder()
            .window(
                TimeOfDay::from_hms(6, 0, 0).unwrap(),
                TimeOfDay::from_hms(6, 30, 0).unwrap(),
            )
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn should_log_sample_with_resolved_command() {
        let fx = fixture(ControlState::default(), vec![morning_window()]);

        let sample = fx.service.report(reading(30.0)).await.unwrap();

        assert_eq!(sample.pump_status, PumpCommand::On);
        assert_eq!(sample.recorded_at, t0());
        assert_eq!(fx.log.all(), vec![sample]);
    }

    #[tokio::test]
    async fn should_reconcile_pause_as_clock_advances() {
        let fx = fixture(
            ControlState::new(PumpCommand::On).paused_until(t0() + Delta::minutes(10)),
            vec![],
        );

        let paused = fx.service.report(reading(30.0)).await.unwrap();
        fx.clock.advance(Delta::minutes(10));
        let resumed = fx.service.report(reading(31.0)).await.unwrap();

        assert_eq!(paused.pump_status, PumpCommand::Off);
        assert_eq!(resumed.pump_status, PumpCommand::On);
        assert_eq!(fx.control.snapshot().unwrap().pause_until, None);
    }

    #[tokio::test]
    async fn should_not_log_anything_when_evaluation_fails() {
        let fx = fixture(ControlState::default(), vec![]);
        fx.control.fail_reads();

        let result = fx.service.report(reading(30.0)).await;

        assert!(matches!(result, Err(PumpError::StorageUnavailable(_))));
        assert!(fx.log.all().is_empty());
    }

    #[tokio::test]
    async fn should_surface_append_failure() {
        let fx = fixture(ControlState::default(), vec![]);
        fx.log.fail();

        let result = fx.service.report(reading(30.0)).await;

        assert!(matches!(result, Err(PumpError::StorageUnavailable(_))));
    }

    #[tokio::test]
    async fn should_return_latest_sample() {
        let fx = fixture(ControlState::default(), vec![]);
        assert!(fx.service.latest().await.unwrap().is_none());

        fx.service.report(reading(10.0)).await.unwrap();
        fx.clock.advance(Delta::minutes(1));
        let second = fx.service.report(reading(20.0)).await.unwrap();

        assert_eq!(fx.service.latest().await.unwrap(), Some(second));
    }

    #[tokio::test]
    async fn should_return_history_oldest_first() {
        let fx = fixture(ControlState::default(), vec![]);
        for moisture in [10.0, 20.0, 30.0] {
            fx.service.report(reading(moisture)).await.unwrap();
            fx.clock.advance(Delta::minutes(1));
        }

        let history = fx.service.history(2).await.unwrap();

        let levels: Vec<f64> = history.iter().map(|s| s.moisture_level).collect();
        assert_eq!(levels, vec![20.0, 30.0]);
    }

    #[tokio::test]
    async fn should_reject_out_of_range_history_limit() {
        let fx = fixture(ControlState::default(), vec![]);

        for limit in [0, MAX_HISTORY_LIMIT + 1] {
            assert!(matches!(
                fx.service.history(limit).await,
                Err(PumpError::Validation(ValidationError::InvalidLimit { .. }))
            ));
        }
    }
}
