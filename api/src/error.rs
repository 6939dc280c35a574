//! Unified error types for the accounts API
//!
//! This module defines error types for each layer:
//! - `ErrorCode`: The failure taxonomy with its HTTP status and default message
//! - `DomainError`: Business rule and persistence failures
//! - `AppError`: HTTP boundary errors (wraps domain errors for responses)

use std::collections::BTreeMap;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// Every failure the API reports, keyed by the code clients see
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ValidationFailed,
    ConstraintValidationFailed,
    InvalidInput,
    InvalidParameter,
    ResourceNotFound,
    ResourceAlreadyExists,
    OperationNotAllowed,
    GenerationFailed,
    InternalServerError,
}

impl ErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::ValidationFailed
            | ErrorCode::ConstraintValidationFailed
            | ErrorCode::InvalidInput
            | ErrorCode::InvalidParameter
            | ErrorCode::OperationNotAllowed => StatusCode::BAD_REQUEST,
            ErrorCode::ResourceNotFound => StatusCode::NOT_FOUND,
            ErrorCode::ResourceAlreadyExists => StatusCode::CONFLICT,
            ErrorCode::GenerationFailed | ErrorCode::InternalServerError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn default_message(self) -> &'static str {
        match self {
            ErrorCode::ValidationFailed => "Validation failed for the request",
            ErrorCode::ConstraintValidationFailed => "Constraint validation failed",
            ErrorCode::InvalidInput => "Invalid input provided",
            ErrorCode::InvalidParameter => "Invalid parameter provided",
            ErrorCode::ResourceNotFound => "Resource not found",
            ErrorCode::ResourceAlreadyExists => "Resource already exists",
            ErrorCode::OperationNotAllowed => "Operation not allowed",
            ErrorCode::GenerationFailed => "Generation operation failed",
            ErrorCode::InternalServerError => "An unexpected error occurred",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::ConstraintValidationFailed => "CONSTRAINT_VALIDATION_FAILED",
            ErrorCode::InvalidInput => "INVALID_INPUT",
            ErrorCode::InvalidParameter => "INVALID_PARAMETER",
            ErrorCode::ResourceNotFound => "RESOURCE_NOT_FOUND",
            ErrorCode::ResourceAlreadyExists => "RESOURCE_ALREADY_EXISTS",
            ErrorCode::OperationNotAllowed => "OPERATION_NOT_ALLOWED",
            ErrorCode::GenerationFailed => "GENERATION_FAILED",
            ErrorCode::InternalServerError => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field-level validation failures, kept in the order they were found.
/// At most one message per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<(&'static str, String)>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        if !self.0.iter().any(|(f, _)| *f == field) {
            self.0.push((field, message.into()));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, m)| m.as_str())
    }

    /// `Ok(value)` when nothing was recorded, otherwise a validation error
    pub fn into_result<T>(self, value: T) -> Result<T, DomainError> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(DomainError::Validation(self))
        }
    }

    fn details(&self) -> BTreeMap<String, String> {
        self.0
            .iter()
            .map(|(f, m)| (f.to_string(), m.clone()))
            .collect()
    }

    fn messages(&self) -> Vec<String> {
        self.0.iter().map(|(f, m)| format!("{}: {}", f, m)).collect()
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.messages().join("; "))
    }
}

/// Domain layer errors - business rules and persistence
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    AlreadyExists(String),

    #[error("{0}")]
    OperationNotAllowed(String),

    #[error("{0}")]
    GenerationFailed(String),

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Database error: {0}")]
    Database(String),
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Unreadable request body
    #[error("{0}")]
    InvalidInput(String),

    /// Path parameter of the wrong type
    #[error("{0}")]
    InvalidParameter(String),

    /// Well-typed parameter outside its allowed values
    #[error("{0}")]
    ConstraintViolation(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Domain(DomainError::NotFound(_)) => ErrorCode::ResourceNotFound,
            AppError::Domain(DomainError::AlreadyExists(_)) => ErrorCode::ResourceAlreadyExists,
            AppError::Domain(DomainError::OperationNotAllowed(_)) => {
                ErrorCode::OperationNotAllowed
            }
            AppError::Domain(DomainError::GenerationFailed(_)) => ErrorCode::GenerationFailed,
            AppError::Domain(DomainError::Validation(_)) => ErrorCode::ValidationFailed,
            AppError::Domain(DomainError::Database(_)) => ErrorCode::InternalServerError,
            AppError::InvalidInput(_) => ErrorCode::InvalidInput,
            AppError::InvalidParameter(_) => ErrorCode::InvalidParameter,
            AppError::ConstraintViolation(_) => ErrorCode::ConstraintValidationFailed,
            AppError::Internal(_) => ErrorCode::InternalServerError,
        }
    }
}

/// Error response body for JSON responses
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub api_path: String,
    pub error_code: String,
    pub error_message: String,
    pub error_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_details: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_errors: Option<Vec<String>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();

        let (message, details, validation_errors) = match &self {
            AppError::Domain(DomainError::Validation(fields)) => (
                code.default_message().to_string(),
                Some(fields.details()),
                Some(fields.messages()),
            ),
            AppError::Domain(DomainError::Database(msg)) => {
                tracing::error!("Database error: {}", msg);
                (code.default_message().to_string(), None, None)
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (code.default_message().to_string(), None, None)
            }
            AppError::Domain(DomainError::GenerationFailed(msg)) => {
                tracing::error!("Account number generation failed: {}", msg);
                (msg.clone(), None, None)
            }
            other => (other.to_string(), None, None),
        };

        let body = ErrorResponse {
            api_path: String::new(),
            error_code: code.as_str().to_string(),
            error_message: message,
            error_time: Utc::now(),
            error_details: details,
            validation_errors,
        };

        let mut response = (code.status(), Json(body.clone())).into_response();
        response.extensions_mut().insert(body);
        response
    }
}

/// Response middleware that stamps the request path into error bodies.
///
/// `AppError` cannot see the request, so it leaves its `ErrorResponse` in the
/// response extensions and this layer re-renders it with `apiPath` filled in.
/// Axum's bare 405 for a known path with an unsupported method is turned into
/// an `OperationNotAllowed` error first, keeping its `Allow` header.
pub async fn error_envelope(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let mut response = next.run(request).await;

    if response.status() == StatusCode::METHOD_NOT_ALLOWED
        && response.extensions().get::<ErrorResponse>().is_none()
    {
        let allow = response.headers().get(header::ALLOW).cloned();
        response = AppError::Domain(DomainError::OperationNotAllowed(format!(
            "Request method '{}' is not supported for {}",
            method, path
        )))
        .into_response();
        if let Some(allow) = allow {
            response.headers_mut().insert(header::ALLOW, allow);
        }
    }

    match response.extensions_mut().remove::<ErrorResponse>() {
        Some(mut body) => {
            body.api_path = path;
            let allow = response.headers().get(header::ALLOW).cloned();
            let mut rendered = (response.status(), Json(body)).into_response();
            if let Some(allow) = allow {
                rendered.headers_mut().insert(header::ALLOW, allow);
            }
            rendered
        }
        None => response,
    }
}
