//! Sensor log port: append-only storage for sensor samples.

use std::future::Future;

use pumpctl_domain::error::PumpError;
use pumpctl_domain::sensor::SensorSample;

/// Append-only log of [`SensorSample`]s.
pub trait SensorLog {
    /// Persist a new sample.
    fn append(
        &self,
        sample: SensorSample,
    ) -> impl Future<Output = Result<SensorSample, PumpError>> + Send;

    /// The most recently recorded sample.
    fn latest(&self) -> impl Future<Output = Result<Option<SensorSample>, PumpError>> + Send;

    /// The `limit` most recent samples, ordered newest-first.
    fn recent(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<SensorSample>, PumpError>> + Send;
}

impl<T: SensorLog + Send + Sync> SensorLog for std::sync::Arc<T> {
    fn append(
        &self,
        sample: SensorSample,
    ) -> impl Future<Output = Result<SensorSample, PumpError>> + Send {
        (**self).append(sample)
    }

    fn latest(&self) -> impl Future<Output = Result<Option<SensorSample>, PumpError>> + Send {
        (**self).latest()
    }

    fn recent(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<SensorSample>, PumpError>> + Send {
        (**self).recent(limit)
    }
}
