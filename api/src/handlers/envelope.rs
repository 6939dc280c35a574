//! Success envelope and request plumbing shared by the resource handlers

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::AppError;

/// Body of every successful JSON response.
///
/// `statusCode` is always "200"; the HTTP status line alone distinguishes
/// a creation (201).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope<T> {
    pub status_code: String,
    pub status_msg: String,
    pub data: Option<T>,
    pub response_time: DateTime<Utc>,
    #[serde(skip)]
    status: StatusCode,
}

impl<T> ResponseEnvelope<T> {
    fn new(status: StatusCode, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            status_code: StatusCode::OK.as_u16().to_string(),
            status_msg: message.into(),
            data,
            response_time: Utc::now(),
            status,
        }
    }

    /// 200 with "Success"
    pub fn ok(data: T) -> Self {
        Self::new(StatusCode::OK, "Success", Some(data))
    }

    /// 200 with a custom message, used for updates
    pub fn ok_with(message: impl Into<String>, data: T) -> Self {
        Self::new(StatusCode::OK, message, Some(data))
    }

    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self::new(StatusCode::CREATED, message, Some(data))
    }
}

impl ResponseEnvelope<()> {
    /// 200 with no payload, used for deletes
    pub fn empty(message: impl Into<String>) -> Self {
        Self::new(StatusCode::OK, message, None)
    }
}

impl<T: Serialize> IntoResponse for ResponseEnvelope<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Unwrap a JSON body, turning extractor rejections into `InvalidInput`
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Rejected request body");
            Err(AppError::InvalidInput(rejection.body_text()))
        }
    }
}

/// Parse a numeric path segment.
///
/// An undecodable segment or non-numeric input is an `InvalidParameter`;
/// zero or negative values are a `ConstraintViolation` naming the parameter
/// by `label`.
pub fn path_id(
    path: Result<Path<String>, PathRejection>,
    param: &str,
    label: &str,
) -> Result<i64, AppError> {
    match path {
        Ok(Path(raw)) => positive_id(&raw, param, label),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Rejected path parameter");
            Err(AppError::InvalidParameter(format!(
                "Invalid value for parameter '{}': {}",
                param,
                rejection.body_text()
            )))
        }
    }
}

fn positive_id(raw: &str, param: &str, label: &str) -> Result<i64, AppError> {
    let value: i64 = raw.parse().map_err(|_| {
        AppError::InvalidParameter(format!(
            "Invalid value '{}' for parameter '{}'. Expected type: Long",
            raw, param
        ))
    })?;

    if value <= 0 {
        return Err(AppError::ConstraintViolation(format!(
            "{} must be positive",
            label
        )));
    }
    Ok(value)
}
