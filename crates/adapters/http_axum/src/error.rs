//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use pumpctl_domain::error::{PumpError, ValidationError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`PumpError`] to an HTTP response with appropriate status code.
pub struct ApiError(PumpError);

impl From<PumpError> for ApiError {
    fn from(err: PumpError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(PumpError::Validation(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            PumpError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            PumpError::NotProvisioned => (StatusCode::CONFLICT, self.0.to_string()),
            PumpError::StorageUnavailable(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "storage unavailable".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: PumpError) -> StatusCode {
        ApiError::from(err).into_response().status()
    }

    #[test]
    fn should_map_validation_to_bad_request() {
        let err = PumpError::Validation(ValidationError::InvalidDuration(0));
        assert_eq!(status_of(err), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn should_map_not_provisioned_to_conflict() {
        assert_eq!(status_of(PumpError::NotProvisioned), StatusCode::CONFLICT);
    }

    #[test]
    fn should_map_storage_failure_to_service_unavailable() {
        let err = PumpError::timed_out(std::time::Duration::from_secs(2));
        assert_eq!(status_of(err), StatusCode::SERVICE_UNAVAILABLE);
    }
}
