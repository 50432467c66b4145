//! API error types with IntoResponse
//!
//! Errors are converted to `{"error": "..."}` JSON bodies with the status
//! code for their class. Store failures are logged and replaced by a
//! generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::StoreError;

/// Body message for a rejected create payload
pub const ALL_FIELDS_REQUIRED: &str = "All fields are required";

/// Body message for a rejected update payload or unreadable JSON
pub const INVALID_DATA: &str = "Invalid data";

/// Body message for every 500
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Missing or malformed input (400). `reason` is logged, not returned.
    InvalidInput { message: &'static str, reason: String },

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Store failure (500, logged)
    Persistence(StoreError),
}

impl ApiError {
    pub fn invalid(message: &'static str, reason: impl ToString) -> Self {
        Self::InvalidInput {
            message,
            reason: reason.to_string(),
        }
    }

    pub fn agent_not_found(agent_code: impl Into<String>) -> Self {
        Self::NotFound {
            resource: "Agent",
            id: agent_code.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::InvalidInput { message, reason } => {
                tracing::debug!(%reason, "rejected request input");
                (*message).to_owned()
            }
            Self::NotFound { resource, id } => {
                tracing::debug!(%resource, %id, "not found");
                format!("{} not found", resource)
            }
            Self::Persistence(e) => {
                // Log the actual error, return generic message
                tracing::error!(error = %e, "store error");
                INTERNAL_SERVER_ERROR.to_owned()
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        Self::Persistence(e)
    }
}
