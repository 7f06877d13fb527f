//! Control mutator: the two externally triggered changes to the control record.

use std::time::Duration;

use pumpctl_domain::control::ControlState;
use pumpctl_domain::error::{PumpError, ValidationError};
use pumpctl_domain::pump::PumpCommand;
use pumpctl_domain::time::Timestamp;

use crate::ports::{Clock, ControlStateStore};
use crate::services::reconciler::PauseExpiryReconciler;
use crate::services::{DEFAULT_STORAGE_TIMEOUT, bounded};

/// Applies manual-target and pause requests.
///
/// A manual request always cancels a pending pause. A pause never touches the
/// manual target, so once it expires the pump falls back to whatever target
/// was last set (or to schedule logic).
pub struct ControlMutator<CS, C> {
    store: CS,
    clock: C,
    reconciler: PauseExpiryReconciler<CS>,
    timeout: Duration,
}

impl<CS, C> ControlMutator<CS, C>
where
    CS: ControlStateStore + Clone,
    C: Clock,
{
    /// Create a new mutator writing through `store` and reading time from `clock`.
    pub fn new(store: CS, clock: C) -> Self {
        Self {
            reconciler: PauseExpiryReconciler::new(store.clone()),
            store,
            clock,
            timeout: DEFAULT_STORAGE_TIMEOUT,
        }
    }

    /// Override the storage call deadline.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.reconciler = self.reconciler.with_timeout(timeout);
        self.timeout = timeout;
        self
    }

    /// Set the manual target and cancel any pause.
    ///
    /// # Errors
    ///
    /// Returns [`PumpError::NotProvisioned`] when the control record is
    /// missing, or a storage error from the store.
    #[tracing::instrument(skip(self))]
    pub async fn set_manual(&self, target: PumpCommand) -> Result<(), PumpError> {
        bounded(self.timeout, self.store.set_manual_target(target)).await?;
        tracing::info!(%target, "manual target set, pause cancelled");
        Ok(())
    }

    /// Hold the pump OFF for `duration` from now. Returns the deadline.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDuration`] when `duration` is zero or
    /// negative (nothing is written), [`PumpError::NotProvisioned`] when the
    /// control record is missing, or a storage error from the store.
    #[tracing::instrument(skip(self), fields(seconds = duration.num_seconds()))]
    pub async fn pause_for(&self, duration: chrono::Duration) -> Result<Timestamp, PumpError> {
        if duration <= chrono::Duration::zero() {
            tracing::warn!("rejected non-positive pause");
            return Err(ValidationError::InvalidDuration(duration.num_seconds()).into());
        }

        let until = self
            .clock
            .now()
            .timestamp
            .checked_add_signed(duration)
            .ok_or(ValidationError::InvalidDuration(duration.num_seconds()))?;
        bounded(self.timeout, self.store.set_pause_until(until)).await?;
        tracing::info!(pause_until = %until, "pause set");
        Ok(until)
    }

    /// The control record as of now. A pause that has run out is cleared
    /// first, so it is never reported as pending.
    ///
    /// # Errors
    ///
    /// Returns [`PumpError::NotProvisioned`] when the record is missing, or a
    /// storage error from the store.
    pub async fn current(&self) -> Result<ControlState, PumpError> {
        let state = bounded(self.timeout, self.store.get()).await?;
        self.reconciler
            .reconcile(state, self.clock.now().timestamp)
            .await
    }
}
