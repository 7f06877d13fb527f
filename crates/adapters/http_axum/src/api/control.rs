//! REST handlers for the control record.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use pumpctl_app::ports::{Clock, ControlStateStore, ScheduleStore, SensorLog};
use pumpctl_domain::control::ControlState;
use pumpctl_domain::error::ValidationError;
use pumpctl_domain::pump::PumpCommand;
use pumpctl_domain::time::Timestamp;

use crate::error::ApiError;
use crate::extract::Payload;
use crate::state::AppState;

/// Request body for changing the control record.
///
/// Kept flat so the same shape reads from a form or from JSON.
#[derive(Deserialize)]
pub struct UpdateControlRequest {
    #[serde(rename = "type")]
    pub kind: UpdateKind,
    /// `ON` or `OFF`, any case. Required for [`UpdateKind::Manual`].
    #[serde(default)]
    pub target: Option<String>,
    /// Required for [`UpdateKind::Pause`].
    #[serde(default)]
    pub minutes: Option<i64>,
}

#[derive(Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateKind {
    /// Set the manual target, cancelling any pause.
    Manual,
    /// Hold the pump OFF for `minutes` from now.
    Pause,
}

#[derive(Serialize)]
pub struct UpdateBody {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pause_until: Option<Timestamp>,
}

/// Possible responses from the update endpoint.
pub enum UpdateResponse {
    Ok(Json<UpdateBody>),
}

impl IntoResponse for UpdateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<ControlState>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/control`
pub async fn get<CS, SS, SL, C>(
    State(state): State<AppState<CS, SS, SL, C>>,
) -> Result<GetResponse, ApiError>
where
    CS: ControlStateStore + Clone + Send + Sync + 'static,
    SS: ScheduleStore + Send + Sync + 'static,
    SL: SensorLog + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    let control = state.control_mutator.current().await?;
    Ok(GetResponse::Ok(Json(control)))
}

/// `POST /api/control/update`
pub async fn update<CS, SS, SL, C>(
    State(state): State<AppState<CS, SS, SL, C>>,
    Payload(req): Payload<UpdateControlRequest>,
) -> Result<UpdateResponse, ApiError>
where
    CS: ControlStateStore + Clone + Send + Sync + 'static,
    SS: ScheduleStore + Send + Sync + 'static,
    SL: SensorLog + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    let pause_until = match req.kind {
        UpdateKind::Manual => {
            let target: PumpCommand = req
                .target
                .ok_or(ValidationError::MissingField("target"))?
                .parse()?;
            state.control_mutator.set_manual(target).await?;
            None
        }
        UpdateKind::Pause => {
            let minutes = req.minutes.ok_or(ValidationError::MissingField("minutes"))?;
            let duration = chrono::Duration::try_minutes(minutes)
                .ok_or(ValidationError::InvalidDuration(minutes.saturating_mul(60)))?;
            Some(state.control_mutator.pause_for(duration).await?)
        }
    };
    Ok(UpdateResponse::Ok(Json(UpdateBody {
        status: "success",
        pause_until,
    })))
}
