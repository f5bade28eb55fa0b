//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

use core_kernel::{CoreError, PortError};
use domain_claims::ClaimError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Detail is logged, never returned to the client
    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Validation error: {0}")]
    Validation(String, Vec<String>),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message, details) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized", "Unauthorized".to_string(), None),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg, None),
            ApiError::Internal(detail) => {
                error!(detail = %detail, "Request failed with internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An unexpected error occurred".to_string(),
                    None,
                )
            }
            ApiError::Validation(msg, fields) => {
                (StatusCode::BAD_REQUEST, "validation_error", msg, Some(fields))
            }
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ClaimError> for ApiError {
    fn from(err: ClaimError) -> Self {
        match err {
            ClaimError::NotFound(msg) => ApiError::NotFound(msg),
            ClaimError::Forbidden(msg) => ApiError::Forbidden(msg),
            ClaimError::InvalidState { message, .. } => ApiError::BadRequest(message),
            ClaimError::InvalidArgument(msg) => ApiError::BadRequest(msg),
            ClaimError::Internal(detail) => ApiError::Internal(detail),
        }
    }
}

impl From<PortError> for ApiError {
    fn from(err: PortError) -> Self {
        ClaimError::from(err).into()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ClaimError::from(err).into()
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort();
        ApiError::Validation("Request validation failed".to_string(), fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_items::ItemStatus;

    #[test]
    fn test_claim_errors_map_to_status_codes() {
        let cases = [
            (ClaimError::item_not_found(), StatusCode::NOT_FOUND),
            (ClaimError::not_authorized(), StatusCode::FORBIDDEN),
            (
                ClaimError::InvalidState {
                    message: "Item is already claimed".to_string(),
                    status: Some(ItemStatus::Claimed),
                },
                StatusCode::BAD_REQUEST,
            ),
            (ClaimError::invalid_argument("Invalid action"), StatusCode::BAD_REQUEST),
            (ClaimError::internal("db down"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).into_response().status(), expected);
        }
    }

    #[test]
    fn test_port_not_found_maps_to_404() {
        let err = ApiError::from(PortError::not_found("Item", "ITM-1"));
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn test_port_outage_maps_to_internal() {
        let err = ApiError::from(PortError::connection("pool timed out"));
        assert!(matches!(err, ApiError::Internal(_)));
    }
}
