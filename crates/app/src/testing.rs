//! In-memory port doubles shared by the service tests.

use std::fmt;
use std::future::Future;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use pumpctl_domain::control::ControlState;
use pumpctl_domain::error::PumpError;
use pumpctl_domain::pump::PumpCommand;
use pumpctl_domain::schedule::Schedule;
use pumpctl_domain::sensor::SensorSample;
use pumpctl_domain::time::{TimeOfDay, Timestamp};

use crate::ports::{ControlStateStore, ScheduleStore, SensorLog};

/// Error raised by a double switched into failure mode.
#[derive(Debug)]
pub struct Offline;

impl fmt::Display for Offline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("store offline")
    }
}

impl std::error::Error for Offline {}

fn offline() -> PumpError {
    PumpError::StorageUnavailable(Box::new(Offline))
}

async fn settle<T>(delay: Option<Duration>, result: Result<T, PumpError>) -> Result<T, PumpError> {
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    result
}

#[derive(Default)]
pub struct InMemoryControlStore {
    state: Mutex<Option<ControlState>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    delay: Mutex<Option<Duration>>,
    writes: AtomicUsize,
    before_clear: Mutex<Option<Option<ControlState>>>,
}

impl InMemoryControlStore {
    pub fn provisioned(state: ControlState) -> Self {
        let store = Self::default();
        *store.state.lock().unwrap() = Some(state);
        store
    }

    pub fn unprovisioned() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Option<ControlState> {
        self.state.lock().unwrap().clone()
    }

    pub fn replace(&self, state: ControlState) {
        *self.state.lock().unwrap() = Some(state);
    }

    /// Swap the record right before the next pause clear runs, as a
    /// concurrent writer would.
    pub fn replace_before_next_clear(&self, state: ControlState) {
        *self.before_clear.lock().unwrap() = Some(Some(state));
    }

    pub fn remove_before_next_clear(&self) {
        *self.before_clear.lock().unwrap() = Some(None);
    }

    pub fn fail_reads(&self) {
        self.fail_reads.store(true, Ordering::SeqCst);
    }

    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    pub fn slow_down(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn delay(&self) -> Option<Duration> {
        *self.delay.lock().unwrap()
    }

    fn write(&self, apply: impl FnOnce(&mut ControlState) -> bool) -> Result<bool, PumpError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(offline());
        }
        let mut guard = self.state.lock().unwrap();
        let state = guard.as_mut().ok_or(PumpError::NotProvisioned)?;
        let changed = apply(state);
        if changed {
            self.writes.fetch_add(1, Ordering::SeqCst);
        }
        Ok(changed)
    }
}

impl ControlStateStore for InMemoryControlStore {
    fn get(&self) -> impl Future<Output = Result<ControlState, PumpError>> + Send {
        let result = if self.fail_reads.load(Ordering::SeqCst) {
            Err(offline())
        } else {
            self.snapshot().ok_or(PumpError::NotProvisioned)
        };
        settle(self.delay(), result)
    }

    fn set_manual_target(
        &self,
        target: PumpCommand,
    ) -> impl Future<Output = Result<(), PumpError>> + Send {
        let result = self
            .write(|state| {
                state.manual_target = target;
                state.pause_until = None;
                true
            })
            .map(|_| ());
        settle(self.delay(), result)
    }

    fn set_pause_until(
        &self,
        until: Timestamp,
    ) -> impl Future<Output = Result<(), PumpError>> + Send {
        let result = self
            .write(|state| {
                state.pause_until = Some(until);
                true
            })
            .map(|_| ());
        settle(self.delay(), result)
    }

    fn clear_pause_until(
        &self,
        expired: Timestamp,
    ) -> impl Future<Output = Result<bool, PumpError>> + Send {
        if let Some(next) = self.before_clear.lock().unwrap().take() {
            *self.state.lock().unwrap() = next;
        }
        let result = self.write(|state| {
            if state.pause_until == Some(expired) {
                state.pause_until = None;
                true
            } else {
                false
            }
        });
        settle(self.delay(), result)
    }
}

#[derive(Default)]
pub struct InMemoryScheduleStore {
    schedules: Mutex<Vec<Schedule>>,
    fail: AtomicBool,
}

impl InMemoryScheduleStore {
    pub fn with(schedules: Vec<Schedule>) -> Self {
        Self {
            schedules: Mutex::new(schedules),
            fail: AtomicBool::new(false),
        }
    }

    pub fn fail(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub fn all(&self) -> Vec<Schedule> {
        self.schedules.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), PumpError> {
        if self.fail.load(Ordering::SeqCst) {
            Err(offline())
        } else {
            Ok(())
        }
    }
}

impl ScheduleStore for InMemoryScheduleStore {
    fn has_active_match(
        &self,
        time: TimeOfDay,
    ) -> impl Future<Output = Result<bool, PumpError>> + Send {
        let result = self
            .check()
            .map(|()| self.schedules.lock().unwrap().iter().any(|s| s.matches(time)));
        async { result }
    }

    fn activate_exclusive(
        &self,
        schedule: Schedule,
    ) -> impl Future<Output = Result<Schedule, PumpError>> + Send {
        let result = self.check().map(|()| {
            let mut schedules = self.schedules.lock().unwrap();
            for existing in schedules.iter_mut() {
                existing.is_active = false;
            }
            schedules.push(schedule.clone());
            schedule
        });
        async { result }
    }

    fn latest_active(&self) -> impl Future<Output = Result<Option<Schedule>, PumpError>> + Send {
        let result = self.check().map(|()| {
            self.schedules
                .lock()
                .unwrap()
                .iter()
                .rev()
                .find(|s| s.is_active)
                .cloned()
        });
        async { result }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Schedule>, PumpError>> + Send {
        let result = self
            .check()
            .map(|()| self.schedules.lock().unwrap().iter().rev().cloned().collect());
        async { result }
    }
}

#[derive(Default)]
pub struct InMemorySensorLog {
    samples: Mutex<Vec<SensorSample>>,
    fail: AtomicBool,
}

impl InMemorySensorLog {
    pub fn fail(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub fn all(&self) -> Vec<SensorSample> {
        self.samples.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), PumpError> {
        if self.fail.load(Ordering::SeqCst) {
            Err(offline())
        } else {
            Ok(())
        }
    }
}

impl SensorLog for InMemorySensorLog {
    fn append(
        &self,
        sample: SensorSample,
    ) -> impl Future<Output = Result<SensorSample, PumpError>> + Send {
        let result = self.check().map(|()| {
            self.samples.lock().unwrap().push(sample.clone());
            sample
        });
        async { result }
    }

    fn latest(&self) -> impl Future<Output = Result<Option<SensorSample>, PumpError>> + Send {
        let result = self
            .check()
            .map(|()| self.samples.lock().unwrap().last().cloned());
        async { result }
    }

    fn recent(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<SensorSample>, PumpError>> + Send {
        let result = self.check().map(|()| {
            self.samples
                .lock()
                .unwrap()
                .iter()
                .rev()
                .take(limit)
                .cloned()
                .collect()
        });
        async { result }
    }
}
