//! Schedule service: use-cases for managing watering windows.

use std::time::Duration;

use pumpctl_domain::error::PumpError;
use pumpctl_domain::schedule::Schedule;
use pumpctl_domain::time::TimeOfDay;

use crate::ports::{Clock, ScheduleStore};
use crate::services::{DEFAULT_STORAGE_TIMEOUT, bounded};

/// Application service for schedule windows.
pub struct ScheduleService<SS, C> {
    store: SS,
    clock: C,
    timeout: Duration,
}

impl<SS, C> ScheduleService<SS, C>
where
    SS: ScheduleStore,
    C: Clock,
{
    /// Create a new service backed by the given store.
    pub fn new(store: SS, clock: C) -> Self {
        Self {
            store,
            clock,
            timeout: DEFAULT_STORAGE_TIMEOUT,
        }
    }

    /// Override the storage call deadline.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replace the active schedule with a new `[on_time, off_time]` window.
    ///
    /// Every previously stored schedule is deactivated in the same store
    /// transaction.
    ///
    /// # Errors
    ///
    /// Returns [`PumpError::Validation`] when the window wraps past midnight,
    /// or a storage error from the store.
    #[tracing::instrument(skip(self))]
    pub async fn add_schedule(
        &self,
        on_time: TimeOfDay,
        off_time: TimeOfDay,
    ) -> Result<Schedule, PumpError> {
        let schedule = Schedule::builder()
            .window(on_time, off_time)
            .created_at(self.clock.now().timestamp)
            .build()?;
        let schedule = bounded(self.timeout, self.store.activate_exclusive(schedule)).await?;
        tracing::info!(schedule_id = %schedule.id, "schedule activated");
        Ok(schedule)
    }

    /// The most recently added active schedule.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    pub async fn latest_active(&self) -> Result<Option<Schedule>, PumpError> {
        bounded(self.timeout, self.store.latest_active()).await
    }

    /// All schedules, newest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    pub async fn list_schedules(&self) -> Result<Vec<Schedule>, PumpError> {
        bounded(self.timeout, self.store.get_all()).await
    }
}
