//! # pumpctl-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the API used by the field node and the operator
//!   (`/api/sensor/save`, `/api/control/update`, `/api/schedule/add`, …),
//!   accepting form-encoded or JSON bodies
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results and [`PumpError`](pumpctl_domain::error::PumpError)s
//!   into HTTP responses
//!
//! ## Fail-safe
//! When a sensor report cannot be evaluated the node is told `OFF` with a
//! `503`. The adapter never answers `ON` without a successful evaluation.
//!
//! ## Dependency rule
//! Depends on `pumpctl-app` (for port traits and services) and `pumpctl-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod extract;
pub mod router;
pub mod state;
