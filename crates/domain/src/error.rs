//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`PumpError`]
//! via `From`, so port traits only ever speak this one type.

use std::time::Duration;

/// Top-level error returned by ports and services.
#[derive(Debug, thiserror::Error)]
pub enum PumpError {
    /// Input rejected before any state was touched.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// The singleton control record does not exist.
    #[error("control record is not provisioned")]
    NotProvisioned,

    /// A storage read or write failed or did not answer in time.
    #[error("storage unavailable")]
    StorageUnavailable(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl PumpError {
    /// Build a [`PumpError::StorageUnavailable`] for a call that exceeded `limit`.
    #[must_use]
    pub fn timed_out(limit: Duration) -> Self {
        Self::StorageUnavailable(Box::new(TimeoutError(limit)))
    }
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Pause requested for a zero or negative length of time.
    #[error("pause duration must be positive, got {0} seconds")]
    InvalidDuration(i64),

    /// Schedule window where `on_time` is after `off_time`.
    #[error("schedule window {on_time}..{off_time} must not wrap past midnight")]
    InvalidWindow { on_time: String, off_time: String },

    /// Text that is not `HH:MM` or `HH:MM:SS`.
    #[error("invalid time of day: {0}")]
    InvalidTimeOfDay(String),

    /// Text that is neither `ON` nor `OFF`.
    #[error("invalid pump command: {0}")]
    InvalidPumpCommand(String),

    /// A request field required by the chosen action is absent.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// Query limit outside the accepted range.
    #[error("limit must be between 1 and {max}, got {got}")]
    InvalidLimit { got: usize, max: usize },
}

/// A bounded storage call ran past its deadline.
#[derive(Debug, thiserror::Error)]
#[error("storage call timed out after {0:?}")]
pub struct TimeoutError(pub Duration);
