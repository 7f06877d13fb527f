//! Schedule: a daily time-of-day window during which the pump should run.

use serde::{Deserialize, Serialize};

use crate::error::{PumpError, ValidationError};
use crate::id::ScheduleId;
use crate::time::{TimeOfDay, Timestamp};

/// A daily `[on_time, off_time]` window.
///
/// Windows never wrap past midnight: `on_time <= off_time` always holds for a
/// validated schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: ScheduleId,
    pub on_time: TimeOfDay,
    pub off_time: TimeOfDay,
    pub is_active: bool,
    pub created_at: Timestamp,
}

impl Schedule {
    /// Create a builder for constructing a [`Schedule`].
    #[must_use]
    pub fn builder() -> ScheduleBuilder {
        ScheduleBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidWindow`] when `on_time > off_time`.
    pub fn validate(&self) -> Result<(), PumpError> {
        if self.on_time > self.off_time {
            return Err(ValidationError::InvalidWindow {
                on_time: self.on_time.to_string(),
                off_time: self.off_time.to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Whether `time` falls inside the window, both ends inclusive.
    #[must_use]
    pub fn contains(&self, time: TimeOfDay) -> bool {
        self.on_time <= time && time <= self.off_time
    }

    /// Whether this schedule is active and its window contains `time`.
    #[must_use]
    pub fn matches(&self, time: TimeOfDay) -> bool {
        self.is_active && self.contains(time)
    }
}

/// Step-by-step builder for [`Schedule`].
#[derive(Debug, Default)]
pub struct ScheduleBuilder {
    id: Option<ScheduleId>,
    on_time: Option<TimeOfDay>,
    off_time: Option<TimeOfDay>,
    is_active: Option<bool>,
    created_at: Option<Timestamp>,
}

impl ScheduleBuilder {
    #[must_use]
    pub fn id(mut self, id: ScheduleId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn window(mut self, on_time: TimeOfDay, off_time: TimeOfDay) -> Self {
        self.on_time = Some(on_time);
        self.off_time = Some(off_time);
        self
    }

    #[must_use]
    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    #[must_use]
    pub fn created_at(mut self, created_at: Timestamp) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Consume the builder, validate, and return a [`Schedule`].
    ///
    /// Missing times default to midnight and the schedule defaults to active.
    ///
    /// # Errors
    ///
    /// Returns [`PumpError::Validation`] if the window wraps past midnight.
    pub fn build(self) -> Result<Schedule, PumpError> {
        let schedule = Schedule {
            id: self.id.unwrap_or_default(),
            on_time: self.on_time.unwrap_or(TimeOfDay::MIDNIGHT),
            off_time: self.off_time.unwrap_or(TimeOfDay::MIDNIGHT),
            is_active: self.is_active.unwrap_or(true),
            created_at: self.created_at.unwrap_or_else(crate::time::now),
        };
        schedule.validate()?;
        Ok(schedule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tod(raw: &str) -> TimeOfDay {
        raw.parse().unwrap()
    }

    fn window(on: &str, off: &str) -> Schedule {
        Schedule::builder()
            .window(tod(on), tod(off))
            .build()
            .unwrap()
    }

    #[test]
    fn should_build_active_schedule_by_default() {
        let schedule = window("06:00", "06:30");
        assert!(schedule.is_active);
        assert_eq!(schedule.on_time, tod("06:00:00"));
    }

    #[test]
    fn should_contain_both_window_ends() {
        let schedule = window("06:00", "06:30");
        assert!(schedule.contains(tod("06:00:00")));
        assert!(schedule.contains(tod("06:15:00")));
        assert!(schedule.contains(tod("06:30:00")));
    }

    #[test]
    fn should_not_contain_times_outside_window() {
        let schedule = window("06:00", "06:30");
        assert!(!schedule.contains(tod("05:59:59")));
        assert!(!schedule.contains(tod("06:30:01")));
    }

    #[test]
    fn should_not_match_when_inactive() {
        let schedule = Schedule::builder()
            .window(tod("06:00"), tod("06:30"))
            .active(false)
            .build()
            .unwrap();
        assert!(!schedule.matches(tod("06:15")));
    }

    #[test]
    fn should_reject_window_wrapping_past_midnight() {
        let result = Schedule::builder()
            .window(tod("22:00"), tod("06:00"))
            .build();
        assert!(matches!(
            result,
            Err(PumpError::Validation(ValidationError::InvalidWindow { .. }))
        ));
    }

    #[test]
    fn should_accept_single_second_window() {
        let schedule = window("12:00:00", "12:00:00");
        assert!(schedule.matches(tod("12:00:00")));
    }
}
