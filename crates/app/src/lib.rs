//! # pumpctl-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `Clock`: the single source of "now"
//!   - `ControlStateStore`: the singleton control record
//!   - `ScheduleStore`: schedule windows
//!   - `SensorLog`: append & query sensor samples
//! - Define **driving/inbound** use-case structs:
//!   - `PauseExpiryReconciler`: lazily clears an expired pause
//!   - `DecisionEvaluator`: resolves one pump command per report
//!   - `ControlMutator`: manual target and pause requests
//!   - `SensorReportService`: evaluate + persist a sensor report
//!   - `ScheduleService`: add, list and look up schedules
//! - Provide **in-process infrastructure** that doesn't need IO (clocks)
//!
//! ## Dependency rule
//! Depends on `pumpctl-domain` only (plus `tokio::time` for call deadlines).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod clock;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;
