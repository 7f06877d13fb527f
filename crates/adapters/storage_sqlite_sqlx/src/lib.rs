//! # pumpctl-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the store port traits defined in `pumpctl-app::ports`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations), which also
//!   provision the singleton control record
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `pumpctl-app` (for port traits) and `pumpctl-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod codec;
pub mod control_store;
pub mod error;
pub mod pool;
pub mod sample_repo;
pub mod schedule_repo;

pub use control_store::SqliteControlStore;
pub use error::StorageError;
pub use pool::{Config, Database};
pub use sample_repo::SqliteSensorLog;
pub use schedule_repo::SqliteScheduleRepository;
