//! API Errors
//!
//! Every failure leaves the service as `{"message": ...}` with the status
//! code that matches the store outcome.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::constants::STUDENT_NOT_FOUND_MESSAGE;
use crate::storage::StoreError;

/// Request-level errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The id does not resolve to a student.
    #[error("{}", STUDENT_NOT_FOUND_MESSAGE)]
    NotFound,

    /// Validation failure or undecodable body.
    #[error("{0}")]
    BadRequest(String),

    /// Unexpected store failure.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Status code for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => Self::NotFound,
            StoreError::Validation(message) => Self::BadRequest(message),
            StoreError::Failure(message) => Self::Internal(message),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}
