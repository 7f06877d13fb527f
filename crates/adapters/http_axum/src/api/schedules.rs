//! REST handlers for schedule windows.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use pumpctl_app::ports::{Clock, ControlStateStore, ScheduleStore, SensorLog};
use pumpctl_domain::schedule::Schedule;
use pumpctl_domain::time::TimeOfDay;

use crate::error::ApiError;
use crate::extract::Payload;
use crate::state::AppState;

/// Request body for adding a schedule. Times are `HH:MM` or `HH:MM:SS`.
#[derive(Deserialize)]
pub struct AddScheduleRequest {
    pub on_time: String,
    pub off_time: String,
}

#[derive(Serialize)]
pub struct AddedBody {
    pub status: &'static str,
    pub schedule: Schedule,
}

/// Possible responses from the add endpoint.
pub enum AddResponse {
    Created(Json<AddedBody>),
}

impl IntoResponse for AddResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

#[derive(Serialize)]
pub struct WindowLabel {
    pub on_time: String,
    pub off_time: String,
}

#[derive(Serialize)]
pub struct LatestBody {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<WindowLabel>,
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

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Schedule>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `POST /api/schedule/add`
pub async fn add<CS, SS, SL, C>(
    State(state): State<AppState<CS, SS, SL, C>>,
    Payload(req): Payload<AddScheduleRequest>,
) -> Result<AddResponse, ApiError>
where
    CS: ControlStateStore + Clone + Send + Sync + 'static,
    SS: ScheduleStore + Send + Sync + 'static,
    SL: SensorLog + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    let on_time: TimeOfDay = req.on_time.parse()?;
    let off_time: TimeOfDay = req.off_time.parse()?;
    let schedule = state
        .schedule_service
        .add_schedule(on_time, off_time)
        .await?;
    Ok(AddResponse::Created(Json(AddedBody {
        status: "schedule added",
        schedule,
    })))
}

/// `GET /api/schedule/latest`
pub async fn latest<CS, SS, SL, C>(
    State(state): State<AppState<CS, SS, SL, C>>,
) -> Result<LatestResponse, ApiError>
where
    CS: ControlStateStore + Clone + Send + Sync + 'static,
    SS: ScheduleStore + Send + Sync + 'static,
    SL: SensorLog + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    let body = match state.schedule_service.latest_active().await? {
        Some(schedule) => LatestBody {
            status: "success",
            data: Some(WindowLabel {
                on_time: schedule.on_time.to_hh_mm(),
                off_time: schedule.off_time.to_hh_mm(),
            }),
        },
        None => LatestBody {
            status: "empty",
            data: None,
        },
    };
    Ok(LatestResponse::Ok(Json(body)))
}

/// `GET /api/schedules`
pub async fn list<CS, SS, SL, C>(
    State(state): State<AppState<CS, SS, SL, C>>,
) -> Result<ListResponse, ApiError>
where
    CS: ControlStateStore + Clone + Send + Sync + 'static,
    SS: ScheduleStore + Send + Sync + 'static,
    SL: SensorLog + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    let schedules = state.schedule_service.list_schedules().await?;
    Ok(ListResponse::Ok(Json(schedules)))
}
