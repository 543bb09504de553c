//! HTTP error handling and response conversion.
//!
//! Domain errors are mapped to HTTP status codes and a JSON body of the form
//! `{"error": "<message>"}`. Client errors are logged at `warn`, server errors
//! at `error` with their full source chain.

use crate::domain::car::errors::DomainError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// Application-level errors returned from handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found (404).
    NotFound(String),

    /// Malformed request (400).
    BadRequest(String),

    /// Request data failed validation (400).
    ValidationError(String),

    /// Request conflicts with existing data (409).
    Conflict(String),

    /// Uploaded payload exceeds a size limit (413).
    PayloadTooLarge(String),

    /// Database operation failed (500).
    Database(String),

    /// Storage upload failed (500).
    Storage(String),

    /// Object store not configured (503).
    ExternalService(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(msg) => write!(f, "Not found: {}", msg),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            Self::Conflict(msg) => write!(f, "Conflict: {}", msg),
            Self::PayloadTooLarge(msg) => write!(f, "Payload too large: {}", msg),
            Self::Database(msg) => write!(f, "Database error: {}", msg),
            Self::Storage(msg) => write!(f, "Storage error: {}", msg),
            Self::ExternalService(msg) => write!(f, "External service error: {}", msg),
        }
    }
}

impl AppError {
    /// Get the appropriate HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) | Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Database(_) | Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ExternalService(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Get a user-safe error message (without implementation details).
    fn user_message(&self) -> String {
        match self {
            Self::NotFound(msg) => msg.clone(),
            Self::BadRequest(msg) => msg.clone(),
            Self::ValidationError(msg) => msg.clone(),
            Self::Conflict(msg) => msg.clone(),
            Self::PayloadTooLarge(msg) => msg.clone(),
            Self::Database(_) => "Database operation failed".into(),
            Self::Storage(_) => "Image upload failed".into(),
            Self::ExternalService(_) => "Image storage is not configured".into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.user_message();

        if status.is_server_error() {
            tracing::error!("error={}", self);
        } else {
            tracing::warn!("error={}", self);
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}

// === Domain Error Conversion ===

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound(_) => AppError::NotFound("Car not found".into()),
            DomainError::DuplicateKey(_) => AppError::Conflict(err.to_string()),
            DomainError::ValidationError(msg) => AppError::ValidationError(msg),
            DomainError::InvalidContentType(_) => AppError::BadRequest("File must be an image".into()),
            DomainError::TooLarge { .. } => AppError::PayloadTooLarge(err.to_string()),
            DomainError::StoreUnavailable => AppError::ExternalService(err.to_string()),
            DomainError::UploadFailed(cause) => AppError::Storage(format!("{:#}", cause)),
            DomainError::InfrastructureError(msg) => {
                tracing::error!(infrastructure_error = %msg);
                AppError::Database(msg)
            }
        }
    }
}

// === Request Body Error Conversion ===

impl From<axum::extract::multipart::MultipartError> for AppError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(err.body_text())
        } else {
            AppError::BadRequest(err.body_text())
        }
    }
}

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}
