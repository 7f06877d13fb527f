//! Control store port: persistence for the singleton control record.

use std::future::Future;

use pumpctl_domain::control::ControlState;
use pumpctl_domain::error::PumpError;
use pumpctl_domain::pump::PumpCommand;
use pumpctl_domain::time::Timestamp;

/// Store holding the single [`ControlState`] record.
///
/// Every write touches one row in one statement, so writes to the record are
/// serialised by the backing store.
pub trait ControlStateStore {
    /// Load the control record.
    ///
    /// Fails with [`PumpError::NotProvisioned`] when the record is missing.
    fn get(&self) -> impl Future<Output = Result<ControlState, PumpError>> + Send;

    /// Set the manual target and clear any pause in the same update.
    fn set_manual_target(
        &self,
        target: PumpCommand,
    ) -> impl Future<Output = Result<(), PumpError>> + Send;

    /// Set the pause deadline, leaving the manual target untouched.
    fn set_pause_until(
        &self,
        until: Timestamp,
    ) -> impl Future<Output = Result<(), PumpError>> + Send;

    /// Clear the pause deadline if it still equals `expired`.
    ///
    /// Returns `true` when a row was changed. A deadline that was already
    /// cleared or replaced in the meantime is left alone, which makes the call
    /// safe to repeat.
    fn clear_pause_until(
        &self,
        expired: Timestamp,
    ) -> impl Future<Output = Result<bool, PumpError>> + Send;
}

impl<T: ControlStateStore + Send + Sync> ControlStateStore for std::sync::Arc<T> {
    fn get(&self) -> impl Future<Output = Result<ControlState, PumpError>> + Send {
        (**self).get()
    }

    fn set_manual_target(
        &self,
        target: PumpCommand,
    ) -> impl Future<Output = Result<(), PumpError>> + Send {
        (**self).set_manual_target(target)
    }

    fn set_pause_until(
        &self,
        until: Timestamp,
    ) -> impl Future<Output = Result<(), PumpError>> + Send {
        (**self).set_pause_until(until)
    }

    fn clear_pause_until(
        &self,
        expired: Timestamp,
    ) -> impl Future<Output = Result<bool, PumpError>> + Send {
        (**self).clear_pause_until(expired)
    }
}
