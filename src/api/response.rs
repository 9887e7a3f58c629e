//! Response types for the Shift Planner API.
//!
//! This module defines the error response structures and error handling
//! for the HTTP API.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::scheduling::ValidationIssue;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Per-field validation issues.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<ValidationIssue>,
    /// Whether the client may retry the same request.
    #[serde(default)]
    pub retryable: bool,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            issues: Vec::new(),
            retryable: false,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            details: Some(details.into()),
            ..Self::new(code, message)
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a validation error listing every issue found.
    pub fn invalid_pattern(issues: Vec<ValidationIssue>) -> Self {
        Self {
            issues,
            ..Self::new("VALIDATION_ERROR", "Shift pattern is invalid")
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates an invalid query string error response.
    pub fn invalid_query(message: impl Into<String>) -> Self {
        Self::new("INVALID_QUERY", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a 400 response carrying the error.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let retryable = error.is_retryable();
        let (status, mut api_error) = match error {
            EngineError::ConfigNotFound { path } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            ),
            EngineError::ConfigParseError { path, message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            ),
            EngineError::ValidationFailed { issues } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError::invalid_pattern(issues),
            ),
            err @ EngineError::ConstraintViolation { .. } => (
                StatusCode::CONFLICT,
                ApiError::with_details(
                    "CONSTRAINT_VIOLATION",
                    err.to_string(),
                    "A shift already exists for this team member, venue and date",
                ),
            ),
            err @ EngineError::PartialFailure { retryable: true, .. } => (
                StatusCode::SERVICE_UNAVAILABLE,
                ApiError::with_details(
                    "PARTIAL_FAILURE",
                    err.to_string(),
                    "Existing shifts were removed but the new shifts were not saved; retry the request",
                ),
            ),
            err @ EngineError::PartialFailure { retryable: false, .. } => (
                StatusCode::CONFLICT,
                ApiError::with_details(
                    "PARTIAL_FAILURE",
                    err.to_string(),
                    "Existing shifts were removed but the new shifts were rejected by the store",
                ),
            ),
            EngineError::StoreUnavailable { message } => (
                StatusCode::SERVICE_UNAVAILABLE,
                ApiError::with_details("STORE_UNAVAILABLE", "Shift store unavailable", message),
            ),
            EngineError::ClosureLookupFailed { venue_id, message } => (
                StatusCode::SERVICE_UNAVAILABLE,
                ApiError::with_details(
                    "CLOSURE_LOOKUP_FAILED",
                    format!("Could not load closures for venue '{}'", venue_id),
                    message,
                ),
            ),
        };
        api_error.retryable = retryable;

        ApiErrorResponse {
            status,
            error: api_error,
        }
    }
}
