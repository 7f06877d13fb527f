//! Application services: use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.
//! Every storage call a service makes is bounded by a deadline; a call that
//! misses it fails with [`PumpError::StorageUnavailable`].

pub mod control_mutator;
pub mod decision_evaluator;
pub mod reconciler;
pub mod schedule_service;
pub mod sensor_service;

use std::future::Future;
use std::time::Duration;

use pumpctl_domain::error::PumpError;

/// Deadline applied to storage calls unless a service is told otherwise.
pub const DEFAULT_STORAGE_TIMEOUT: Duration = Duration::from_secs(2);

/// Await `call`, giving up after `limit`.
pub(crate) async fn bounded<T>(
    limit: Duration,
    call: impl Future<Output = Result<T, PumpError>>,
) -> Result<T, PumpError> {
    tokio::time::timeout(limit, call)
        .await
        .map_err(|_| PumpError::timed_out(limit))?
}
