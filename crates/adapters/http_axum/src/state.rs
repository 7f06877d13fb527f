//! Shared application state for axum handlers.

use std::sync::Arc;

use chrono::{FixedOffset, Offset, Utc};

use pumpctl_app::ports::{Clock, ControlStateStore, ScheduleStore, SensorLog};
use pumpctl_app::services::control_mutator::ControlMutator;
use pumpctl_app::services::schedule_service::ScheduleService;
use pumpctl_app::services::sensor_service::SensorReportService;

/// Application state shared across all axum handlers.
///
/// Generic over the control store, schedule store, sensor log and clock to
/// avoid dynamic dispatch. `Clone` is implemented manually so the underlying
/// types themselves do not need to be `Clone`; only the `Arc` wrappers are
/// cloned.
pub struct AppState<CS, SS, SL, C> {
    /// Per-report decision and sample logging.
    pub sensor_service: Arc<SensorReportService<CS, SS, SL, C>>,
    /// Manual target and pause changes.
    pub control_mutator: Arc<ControlMutator<CS, C>>,
    /// Schedule window management.
    pub schedule_service: Arc<ScheduleService<SS, C>>,
    /// Offset used to label sample times for display.
    pub utc_offset: FixedOffset,
}

impl<CS, SS, SL, C> Clone for AppState<CS, SS, SL, C> {
    fn clone(&self) -> Self {
        Self {
            sensor_service: Arc::clone(&self.sensor_service),
            control_mutator: Arc::clone(&self.control_mutator),
            schedule_service: Arc::clone(&self.schedule_service),
            utc_offset: self.utc_offset,
        }
    }
}

impl<CS, SS, SL, C> AppState<CS, SS, SL, C>
where
    CS: ControlStateStore + Clone + Send + Sync + 'static,
    SS: ScheduleStore + Send + Sync + 'static,
    SL: SensorLog + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(
        sensor_service: SensorReportService<CS, SS, SL, C>,
        control_mutator: ControlMutator<CS, C>,
        schedule_service: ScheduleService<SS, C>,
    ) -> Self {
        Self {
            sensor_service: Arc::new(sensor_service),
            control_mutator: Arc::new(control_mutator),
            schedule_service: Arc::new(schedule_service),
            utc_offset: Utc.fix(),
        }
    }

    /// Label sample times in `offset` instead of UTC.
    #[must_use]
    pub fn with_utc_offset(mut self, offset: FixedOffset) -> Self {
        self.utc_offset = offset;
        self
    }
}
