//! REST handlers for the field node's sensor reports.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use pumpctl_app::ports::{Clock, ControlStateStore, ScheduleStore, SensorLog};
use pumpctl_app::services::sensor_service::DEFAULT_HISTORY_LIMIT;
use pumpctl_domain::error::PumpError;
use pumpctl_domain::pump::PumpCommand;
use pumpctl_domain::sensor::{SensorReading, SensorSample};
use pumpctl_domain::time::{TimeOfDay, Timestamp};

use crate::error::ApiError;
use crate::extract::Payload;
use crate::state::AppState;

/// Request body posted by the field node with each reading. A missing
/// reading counts as zero.
#[derive(Deserialize)]
pub struct SaveSensorRequest {
    #[serde(default, alias = "moisture_level")]
    pub moisture: f64,
    #[serde(default, alias = "water_level")]
    pub water: f64,
}

/// Body of a sensor report answer. `command` is what the pump must do now.
#[derive(Serialize)]
pub struct CommandBody {
    pub status: &'static str,
    pub command: PumpCommand,
}

/// Possible responses from the save endpoint.
pub enum SaveResponse {
    Created(Json<CommandBody>),
    /// Storage could not be reached; the node is told to stay OFF.
    FailSafe,
}

impl IntoResponse for SaveResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
            Self::FailSafe => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(CommandBody {
                    status: "error",
                    command: PumpCommand::Off,
                }),
            )
                .into_response(),
        }
    }
}

/// Latest sample as served to dashboards.
#[derive(Serialize)]
pub struct LatestBody {
    pub moisture_level: f64,
    pub water_level: f64,
    pub pump_status: PumpCommand,
    pub created_at: Option<Timestamp>,
}

impl From<Option<SensorSample>> for LatestBody {
    fn from(sample: Option<SensorSample>) -> Self {
        match sample {
            Some(sample) => Self {
                moisture_level: sample.moisture_level,
                water_level: sample.water_level,
                pump_status: sample.pump_status,
                created_at: Some(sample.recorded_at),
            },
            None => Self {
                moisture_level: 0.0,
                water_level: 0.0,
                pump_status: PumpCommand::Off,
                created_at: None,
            },
        }
    }
}

/// Possible responses from the latest endpoint.
pub enum LatestResponse {
    Ok(Json<LatestBody>),
}

impl IntoResponse for LatestResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Query parameters for the history endpoint.
#[derive(Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

/// One point of the history chart.
#[derive(Serialize)]
pub struct HistoryPoint {
    pub moisture: f64,
    pub water: f64,
    pub pump_status: PumpCommand,
    /// `HH:MM` in the configured offset.
    pub time: String,
}

/// Possible responses from the history endpoint.
pub enum HistoryResponse {
    Ok(Json<Vec<HistoryPoint>>),
}

impl IntoResponse for HistoryResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `POST /api/sensor/save`
pub async fn save<CS, SS, SL, C>(
    State(state): State<AppState<CS, SS, SL, C>>,
    Payload(req): Payload<SaveSensorRequest>,
) -> Result<SaveResponse, ApiError>
where
    CS: ControlStateStore + Clone + Send + Sync + 'static,
    SS: ScheduleStore + Send + Sync + 'static,
    SL: SensorLog + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    let reading = SensorReading {
        moisture_level: req.moisture,
        water_level: req.water,
    };
    match state.sensor_service.report(reading).await {
        Ok(sample) => Ok(SaveResponse::Created(Json(CommandBody {
            status: "success",
            command: sample.pump_status,
        }))),
        Err(PumpError::StorageUnavailable(err)) => {
            tracing::error!(error = %err, "sensor report failed, answering OFF");
            Ok(SaveResponse::FailSafe)
        }
        Err(err) => Err(err.into()),
    }
}

/// `GET /api/sensor/latest`
pub async fn latest<CS, SS, SL, C>(
    State(state): State<AppState<CS, SS, SL, C>>,
) -> Result<LatestResponse, ApiError>
where
    CS: ControlStateStore + Clone + Send + Sync + 'static,
    SS: ScheduleStore + Send + Sync + 'static,
    SL: SensorLog + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    let sample = state.sensor_service.latest().await?;
    Ok(LatestResponse::Ok(Json(sample.into())))
}

/// `GET /api/sensor/history?limit=N`
pub async fn history<CS, SS, SL, C>(
    State(state): State<AppState<CS, SS, SL, C>>,
    Query(query): Query<HistoryQuery>,
) -> Result<HistoryResponse, ApiError>
where
    CS: ControlStateStore + Clone + Send + Sync + 'static,
    SS: ScheduleStore + Send + Sync + 'static,
    SL: SensorLog + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    let samples = state.sensor_service.history(limit).await?;
    let points = samples
        .into_iter()
        .map(|sample| HistoryPoint {
            moisture: sample.moisture_level,
            water: sample.water_level,
            pump_status: sample.pump_status,
            time: TimeOfDay::of(sample.recorded_at, state.utc_offset).to_hh_mm(),
        })
        .collect();
    Ok(HistoryResponse::Ok(Json(points)))
}
