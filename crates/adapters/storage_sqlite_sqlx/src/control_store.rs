//! `SQLite` implementation of [`ControlStateStore`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use pumpctl_app::ports::ControlStateStore;
use pumpctl_domain::control::ControlState;
use pumpctl_domain::error::PumpError;
use pumpctl_domain::pump::PumpCommand;
use pumpctl_domain::time::Timestamp;

use crate::codec::{decode, decode_ts, encode_ts};
use crate::error::StorageError;

struct Wrapper(ControlState);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let manual_target: String = row.try_get("manual_target")?;
        let pause_until: Option<String> = row.try_get("pause_until")?;

        let manual_target: PumpCommand = decode(&manual_target)?;
        let pause_until = pause_until.as_deref().map(decode_ts).transpose()?;

        Ok(Self(ControlState {
            manual_target,
            pause_until,
        }))
    }
}

const SELECT: &str = "SELECT manual_target, pause_until FROM pump_control WHERE id = 1";
const UPDATE_MANUAL: &str =
    "UPDATE pump_control SET manual_target = ?, pause_until = NULL WHERE id = 1";
const UPDATE_PAUSE: &str = "UPDATE pump_control SET pause_until = ? WHERE id = 1";
const CLEAR_PAUSE: &str =
    "UPDATE pump_control SET pause_until = NULL WHERE id = 1 AND pause_until = ?";

/// `SQLite`-backed store for the singleton control row.
#[derive(Clone)]
pub struct SqliteControlStore {
    pool: SqlitePool,
}

impl SqliteControlStore {
    /// Create a new store using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ControlStateStore for SqliteControlStore {
    fn get(&self) -> impl Future<Output = Result<ControlState, PumpError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT)
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            row.map(|w| w.0).ok_or(PumpError::NotProvisioned)
        }
    }

    fn set_manual_target(
        &self,
        target: PumpCommand,
    ) -> impl Future<Output = Result<(), PumpError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(UPDATE_MANUAL)
                .bind(target.as_str())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            if result.rows_affected() == 0 {
                return Err(PumpError::NotProvisioned);
            }
            Ok(())
        }
    }

    fn set_pause_until(
        &self,
        until: Timestamp,
    ) -> impl Future<Output = Result<(), PumpError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(UPDATE_PAUSE)
                .bind(encode_ts(until))
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            if result.rows_affected() == 0 {
                return Err(PumpError::NotProvisioned);
            }
            Ok(())
        }
    }

    fn clear_pause_until(
        &self,
        expired: Timestamp,
    ) -> impl Future<Output = Result<bool, PumpError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(CLEAR_PAUSE)
                .bind(encode_ts(expired))
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(result.rows_affected() > 0)
        }
    }
}
