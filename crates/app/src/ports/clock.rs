//! Clock port: the one place services read the current time from.

use pumpctl_domain::time::Now;

/// Supplies the current timestamp and local time of day.
pub trait Clock {
    /// Read the clock. Must have no side effects.
    fn now(&self) -> Now;
}

impl<T: Clock + ?Sized> Clock for std::sync::Arc<T> {
    fn now(&self) -> Now {
        (**self).now()
    }
}
