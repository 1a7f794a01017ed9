//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::{DomainError, OrderError};
use worklist::WorklistError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Bad request from the client.
    BadRequest(String),
    /// The requested status edge is never legal.
    Conflict(String),
    /// Domain logic error.
    Domain(DomainError),
    /// View read error.
    Worklist(WorklistError),
    /// Internal server error.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Domain(err) => domain_error_to_response(err),
            ApiError::Worklist(err) => {
                tracing::error!(error = %err, "view read failed");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn domain_error_to_response(err: DomainError) -> (StatusCode, String) {
    match &err {
        DomainError::OrderNotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
        DomainError::Order(order_err) => match order_err {
            OrderError::InvalidTransition { .. } => (StatusCode::CONFLICT, err.to_string()),
            OrderError::ServiceTypeRequired
            | OrderError::CustomerNameRequired
            | OrderError::ArtifactRefRequired => (StatusCode::BAD_REQUEST, err.to_string()),
        },
        DomainError::Store(_) | DomainError::Serialization(_) => {
            tracing::error!(error = %err, "storage failure");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::Domain(err)
    }
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        ApiError::Domain(DomainError::Order(err))
    }
}

impl From<WorklistError> for ApiError {
    fn from(err: WorklistError) -> Self {
        ApiError::Worklist(err)
    }
}
