//! Pause expiry reconciliation: clears a pause whose deadline has passed.

use std::time::Duration;

use pumpctl_domain::control::ControlState;
use pumpctl_domain::error::PumpError;
use pumpctl_domain::time::Timestamp;

use crate::ports::ControlStateStore;
use crate::services::{DEFAULT_STORAGE_TIMEOUT, bounded};

/// Normalises the pause part of a freshly loaded [`ControlState`].
///
/// Expiry is checked lazily whenever a decision is about to be made; nothing
/// wakes up on its own when a pause runs out.
pub struct PauseExpiryReconciler<CS> {
    store: CS,
    timeout: Duration,
}

impl<CS: ControlStateStore> PauseExpiryReconciler<CS> {
    /// Create a new reconciler writing through `store`.
    pub fn new(store: CS) -> Self {
        Self {
            store,
            timeout: DEFAULT_STORAGE_TIMEOUT,
        }
    }

    /// Override the storage call deadline.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Clear `state.pause_until` when `now` has reached it.
    ///
    /// The clear is persisted before this returns, so the caller never decides
    /// against a stale pause. A state with no pause, or a pause still in the
    /// future, is returned unchanged without touching the store. When the
    /// stored pause no longer matches the one read, the record is read again
    /// and returned as stored, pause included.
    ///
    /// # Errors
    ///
    /// Returns [`PumpError::StorageUnavailable`] if the clear cannot be written
    /// or the record cannot be read again.
    #[tracing::instrument(skip(self, state))]
    pub async fn reconcile(
        &self,
        state: ControlState,
        now: Timestamp,
    ) -> Result<ControlState, PumpError> {
        let Some(expired) = state.expired_pause(now) else {
            return Ok(state);
        };

        let cleared = bounded(self.timeout, self.store.clear_pause_until(expired)).await?;
        if cleared {
            tracing::info!(pause_until = %expired, "pause expired, cleared");
            return Ok(ControlState {
                pause_until: None,
                ..state
            });
        }

        // The record changed since it was read: decide on what is stored now.
        let fresh = bounded(self.timeout, self.store.get()).await?;
        if let Some(stale) = fresh.expired_pause(now) {
            tracing::warn!(pause_until = %stale, "pause replaced by an expired one, holding it");
        } else {
            tracing::debug!(
                pause_until = ?fresh.pause_until,
                "pause replaced after read, using stored record"
            );
        }
        Ok(fresh)
    }
}
