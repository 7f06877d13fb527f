//! Decision evaluator: resolves the one pump command for the current moment.
//!
//! Inputs are combined with a fixed precedence, each later step overriding the
//! earlier ones:
//!
//! ```text
//! manual target  <  matching active schedule  <  pause in effect
//! ```
//!
//! A schedule wins over a forgotten manual OFF; a pause is a deliberate human
//! override and wins over everything.

use std::time::Duration;

use pumpctl_domain::control::ControlState;
use pumpctl_domain::error::PumpError;
use pumpctl_domain::pump::PumpCommand;
use pumpctl_domain::time::Now;

use crate::ports::{ControlStateStore, ScheduleStore};
use crate::services::reconciler::PauseExpiryReconciler;
use crate::services::{DEFAULT_STORAGE_TIMEOUT, bounded};

/// Combines control state, schedules and time into a single [`PumpCommand`].
pub struct DecisionEvaluator<CS, SS> {
    control: CS,
    schedules: SS,
    reconciler: PauseExpiryReconciler<CS>,
    timeout: Duration,
}

impl<CS, SS> DecisionEvaluator<CS, SS>
where
    CS: ControlStateStore + Clone,
    SS: ScheduleStore,
{
    /// Create a new evaluator. `control` is shared with the pause reconciler.
    pub fn new(control: CS, schedules: SS) -> Self {
        Self {
            reconciler: PauseExpiryReconciler::new(control.clone()),
            control,
            schedules,
            timeout: DEFAULT_STORAGE_TIMEOUT,
        }
    }

    /// Override the storage call deadline for every call this evaluator makes.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.reconciler = self.reconciler.with_timeout(timeout);
        self.timeout = timeout;
        self
    }

    /// Resolve the pump command at `now`.
    ///
    /// A missing control record resolves to OFF. An expired pause is cleared
    /// (and the clear persisted) before the pause is looked at.
    ///
    /// # Errors
    ///
    /// Returns [`PumpError::StorageUnavailable`] when any read or the pause
    /// clear fails or times out. No command is guessed in that case.
    #[tracing::instrument(skip(self), fields(time_of_day = %now.time_of_day))]
    pub async fn evaluate(&self, now: Now) -> Result<PumpCommand, PumpError> {
        let state = match self.load(now).await {
            Ok(state) => state,
            Err(PumpError::NotProvisioned) => {
                tracing::warn!("control record missing, resolving to OFF");
                return Ok(PumpCommand::Off);
            }
            Err(err) => return Err(err),
        };

        let schedule_matches =
            bounded(self.timeout, self.schedules.has_active_match(now.time_of_day)).await?;

        let decision = state.resolve(schedule_matches);
        tracing::debug!(
            manual_target = %state.manual_target,
            schedule_matches,
            paused = state.is_paused(),
            %decision,
            "pump decision resolved"
        );
        Ok(decision)
    }

    async fn load(&self, now: Now) -> Result<ControlState, PumpError> {
        let state = bounded(self.timeout, self.control.get()).await?;
        self.reconciler.reconcile(state, now.timestamp).await
    }
}
