//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod control;
#[allow(clippy::missing_errors_doc)]
pub mod schedules;
#[allow(clippy::missing_errors_doc)]
pub mod sensor;

use axum::Router;
use axum::routing::{get, post};

use pumpctl_app::ports::{Clock, ControlStateStore, ScheduleStore, SensorLog};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<CS, SS, SL, C>() -> Router<AppState<CS, SS, SL, C>>
where
    CS: ControlStateStore + Clone + Send + Sync + 'static,
    SS: ScheduleStore + Send + Sync + 'static,
    SL: SensorLog + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        // Sensor node
        .route("/sensor/save", post(sensor::save::<CS, SS, SL, C>))
        .route("/sensor/latest", get(sensor::latest::<CS, SS, SL, C>))
        .route("/sensor/history", get(sensor::history::<CS, SS, SL, C>))
        // Control record
        .route("/control", get(control::get::<CS, SS, SL, C>))
        .route("/control/update", post(control::update::<CS, SS, SL, C>))
        // Schedules
        .route("/schedule/add", post(schedules::add::<CS, SS, SL, C>))
        .route("/schedule/latest", get(schedules::latest::<CS, SS, SL, C>))
        .route("/schedules", get(schedules::list::<CS, SS, SL, C>))
}
