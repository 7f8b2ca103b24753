use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Customer not found with ID: {0}")]
    NotFound(Uuid),

    /// Lookup miss on a read or contact patch; answered with a bare 404.
    #[error("no customer with {0}")]
    Absent(String),

    #[error("Email already in use: {0}")]
    DuplicateEmail(String),

    /// Comma-separated `field: message` pairs.
    #[error("{0}")]
    Validation(String),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: u16,
    pub error: String,
    pub message: String,
}

impl ServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::NotFound(_) | ServiceError::Absent(_) => StatusCode::NOT_FOUND,
            ServiceError::DuplicateEmail(_) => StatusCode::CONFLICT,
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ServiceError::Absent(_) => {
                tracing::info!("not found: {self}");
                return status.into_response();
            }
            ServiceError::NotFound(_) => tracing::info!("not found: {self}"),
            ServiceError::DuplicateEmail(_) => tracing::warn!("conflict: {self}"),
            ServiceError::Validation(_) => tracing::warn!("validation failed: {self}"),
        }
        let body = ErrorBody {
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or_default().to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
