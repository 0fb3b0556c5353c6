use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use studio_core::ValidationErrors;

/// The only failure text a caller ever sees for a server-side problem.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(ValidationErrors),

    #[error("malformed request body: {0}")]
    MalformedBody(String),

    /// Details are logged where the failure happened, never returned.
    #[error("internal error")]
    Internal,
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "validation", "fields": errors.fields() })),
            )
                .into_response(),
            ApiError::MalformedBody(message) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "validation",
                    "fields": [{ "field": "body", "message": message }],
                })),
            )
                .into_response(),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": GENERIC_FAILURE_MESSAGE })),
            )
                .into_response(),
        }
    }
}
