//! # pumpctl-domain
//!
//! Pure domain model for the pumpctl irrigation controller.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps and
//!   time-of-day values
//! - Define the **pump command** (`ON` / `OFF`) every decision resolves to
//! - Define the **control record** (manual target + pause deadline)
//! - Define **schedule windows** and their containment rule
//! - Define **sensor samples** (the log the resolved commands are written to)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod control;
pub mod pump;
pub mod schedule;
pub mod sensor;
