//! Schedule store port: persistence for schedule windows.

use std::future::Future;

use pumpctl_domain::error::PumpError;
use pumpctl_domain::schedule::Schedule;
use pumpctl_domain::time::TimeOfDay;

/// Repository for persisting and querying [`Schedule`]s.
pub trait ScheduleStore {
    /// Whether at least one active schedule contains `time` (ends inclusive).
    fn has_active_match(
        &self,
        time: TimeOfDay,
    ) -> impl Future<Output = Result<bool, PumpError>> + Send;

    /// Deactivate every stored schedule and insert `schedule` as the active one,
    /// atomically.
    fn activate_exclusive(
        &self,
        schedule: Schedule,
    ) -> impl Future<Output = Result<Schedule, PumpError>> + Send;

    /// The most recently added active schedule, if any.
    fn latest_active(&self) -> impl Future<Output = Result<Option<Schedule>, PumpError>> + Send;

    /// Every stored schedule, newest first.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Schedule>, PumpError>> + Send;
}

impl<T: ScheduleStore + Send + Sync> ScheduleStore for std::sync::Arc<T> {
    fn has_active_match(
        &self,
        time: TimeOfDay,
    ) -> impl Future<Output = Result<bool, PumpError>> + Send {
        (**self).has_active_match(time)
    }

    fn activate_exclusive(
        &self,
        schedule: Schedule,
    ) -> impl Future<Output = Result<Schedule, PumpError>> + Send {
        (**self).activate_exclusive(schedule)
    }

    fn latest_active(&self) -> impl Future<Output = Result<Option<Schedule>, PumpError>> + Send {
        (**self).latest_active()
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Schedule>, PumpError>> + Send {
        (**self).get_all()
    }
}
