//! `SQLite` implementation of [`ScheduleStore`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use pumpctl_app::ports::ScheduleStore;
use pumpctl_domain::error::PumpError;
use pumpctl_domain::id::ScheduleId;
use pumpctl_domain::schedule::Schedule;
use pumpctl_domain::time::TimeOfDay;

use crate::codec::{decode, decode_ts, encode_ts};
use crate::error::StorageError;

struct Wrapper(Schedule);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Schedule> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: uuid::Uuid = row.try_get("id")?;
        let on_time: String = row.try_get("on_time")?;
        let off_time: String = row.try_get("off_time")?;
        let is_active: bool = row.try_get("is_active")?;
        let created_at: String = row.try_get("created_at")?;

        Ok(Self(Schedule {
            id: ScheduleId::from(id),
            on_time: decode(&on_time)?,
            off_time: decode(&off_time)?,
            is_active,
            created_at: decode_ts(&created_at)?,
        }))
    }
}

const DEACTIVATE_ALL: &str = "UPDATE pump_schedules SET is_active = 0 WHERE is_active = 1";
const INSERT: &str = r"
    INSERT INTO pump_schedules (id, on_time, off_time, is_active, created_at)
    VALUES (?, ?, ?, ?, ?)
";
const SELECT_ACTIVE: &str =
    "SELECT * FROM pump_schedules WHERE is_active = 1 ORDER BY created_at DESC, rowid DESC";
const SELECT_ALL: &str = "SELECT * FROM pump_schedules ORDER BY created_at DESC, rowid DESC";

/// `SQLite`-backed schedule repository.
#[derive(Clone)]
pub struct SqliteScheduleRepository {
    pool: SqlitePool,
}

impl SqliteScheduleRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ScheduleStore for SqliteScheduleRepository {
    fn has_active_match(
        &self,
        time: TimeOfDay,
    ) -> impl Future<Output = Result<bool, PumpError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ACTIVE)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.iter().any(|w| w.0.matches(time)))
        }
    }

    fn activate_exclusive(
        &self,
        schedule: Schedule,
    ) -> impl Future<Output = Result<Schedule, PumpError>> + Send {
        let pool = self.pool.clone();
        async move {
            let mut tx = pool.begin().await.map_err(StorageError::from)?;

            let deactivated = sqlx::query(DEACTIVATE_ALL)
                .execute(&mut *tx)
                .await
                .map_err(StorageError::from)?;

            sqlx::query(INSERT)
                .bind(uuid::Uuid::from(schedule.id))
                .bind(schedule.on_time.to_string())
                .bind(schedule.off_time.to_string())
                .bind(schedule.is_active)
                .bind(encode_ts(schedule.created_at))
                .execute(&mut *tx)
                .await
                .map_err(StorageError::from)?;

            tx.commit().await.map_err(StorageError::from)?;
            tracing::debug!(
                deactivated = deactivated.rows_affected(),
                "previous schedules deactivated"
            );

            Ok(schedule)
        }
    }

    fn latest_active(&self) -> impl Future<Output = Result<Option<Schedule>, PumpError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_ACTIVE)
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Schedule>, PumpError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }
}
