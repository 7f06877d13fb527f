//! Request body extractor accepting both form-encoded and JSON bodies.

use axum::extract::{FromRequest, Request};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use serde::de::DeserializeOwned;

/// Body deserialized as a form when sent as
/// `application/x-www-form-urlencoded`, as JSON otherwise.
///
/// The field node posts forms; dashboards post JSON.
pub struct Payload<T>(pub T);

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"))
}

impl<T, S> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(&req) {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            Ok(Self(value))
        } else {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            Ok(Self(value))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::StatusCode;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Reading {
        level: f64,
        #[serde(default)]
        note: Option<String>,
    }

    fn request(content_type: &str, body: &'static str) -> Request {
        axum::http::Request::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .unwrap()
    }

    async fn extract(req: Request) -> Result<Reading, StatusCode> {
        Payload::<Reading>::from_request(req, &())
            .await
            .map(|Payload(value)| value)
            .map_err(|rejection| rejection.status())
    }

    #[tokio::test]
    async fn should_read_form_encoded_body() {
        let req = request(
            "application/x-www-form-urlencoded; charset=utf-8",
            "level=41.5&note=dry",
        );

        assert_eq!(
            extract(req).await,
            Ok(Reading {
                level: 41.5,
                note: Some("dry".to_string()),
            })
        );
    }

    #[tokio::test]
    async fn should_read_json_body() {
        let req = request("application/json", r#"{"level": 12.0}"#);

        assert_eq!(
            extract(req).await,
            Ok(Reading {
                level: 12.0,
                note: None,
            })
        );
    }

    #[tokio::test]
    async fn should_reject_other_content_types() {
        let req = request("text/plain", "level=1");

        assert_eq!(
            extract(req).await,
            Err(StatusCode::UNSUPPORTED_MEDIA_TYPE)
        );
    }
}
