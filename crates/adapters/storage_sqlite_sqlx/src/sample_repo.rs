//! `SQLite` implementation of [`SensorLog`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use pumpctl_app::ports::SensorLog;
use pumpctl_domain::error::PumpError;
use pumpctl_domain::id::SampleId;
use pumpctl_domain::sensor::SensorSample;

use crate::codec::{decode, decode_ts, encode_ts};
use crate::error::StorageError;

struct Wrapper(SensorSample);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: uuid::Uuid = row.try_get("id")?;
        let moisture_level: f64 = row.try_get("moisture_level")?;
        let water_level: f64 = row.try_get("water_level")?;
        let pump_status: String = row.try_get("pump_status")?;
        let created_at: String = row.try_get("created_at")?;

        Ok(Self(SensorSample {
            id: SampleId::from(id),
            moisture_level,
            water_level,
            pump_status: decode(&pump_status)?,
            recorded_at: decode_ts(&created_at)?,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO sensor_data (id, moisture_level, water_level, pump_status, created_at)
    VALUES (?, ?, ?, ?, ?)
";
const SELECT_RECENT: &str = "SELECT * FROM sensor_data ORDER BY created_at DESC, rowid DESC LIMIT ?";

/// `SQLite`-backed sensor sample log.
#[derive(Clone)]
pub struct SqliteSensorLog {
    pool: SqlitePool,
}

impl SqliteSensorLog {
    /// Create a new log using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl SensorLog for SqliteSensorLog {
    fn append(
        &self,
        sample: SensorSample,
    ) -> impl Future<Output = Result<SensorSample, PumpError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(uuid::Uuid::from(sample.id))
                .bind(sample.moisture_level)
                .bind(sample.water_level)
                .bind(sample.pump_status.as_str())
                .bind(encode_ts(sample.recorded_at))
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(sample)
        }
    }

    fn latest(&self) -> impl Future<Output = Result<Option<SensorSample>, PumpError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_RECENT)
                .bind(1_i64)
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.map(|w| w.0))
        }
    }

    fn recent(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<SensorSample>, PumpError>> + Send {
        let pool = self.pool.clone();
        async move {
            let limit = i64::try_from(limit).unwrap_or(i64::MAX);
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_RECENT)
                .bind(limit)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }
}
