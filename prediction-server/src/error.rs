//! Error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::handlers::timestamp;
use crate::model::ModelError;
use crate::validation::ValidationError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    // Model errors
    ModelUnavailable,

    // Request errors
    InvalidJson(String),
    PayloadTooLarge,
    Validation(ValidationError),

    // Routing errors
    NotFound,
    MethodNotAllowed,

    // Inference errors
    PredictionFailed(ModelError),

    // Generic errors
    InternalError(String),
}

#[derive(Serialize)]
struct ErrorBody {
    status: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
    timestamp: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, detail) = match self {
            AppError::ModelUnavailable => {
                (StatusCode::SERVICE_UNAVAILABLE, "Model not loaded".to_string(), None)
            }
            AppError::InvalidJson(msg) => {
                tracing::debug!("Rejected non-JSON body: {}", msg);
                (StatusCode::BAD_REQUEST, "Request body must be valid JSON".to_string(), None)
            }
            AppError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "Request body is too large".to_string(),
                None,
            ),
            AppError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string(), None),
            AppError::NotFound => {
                (StatusCode::NOT_FOUND, "Endpoint not found".to_string(), None)
            }
            AppError::MethodNotAllowed => {
                (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed".to_string(), None)
            }
            AppError::PredictionFailed(err) => {
                tracing::error!("Prediction error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error processing the prediction".to_string(),
                    Some(err.to_string()),
                )
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string(), None)
            }
        };

        let body = Json(ErrorBody {
            status: "error",
            message,
            detail,
            timestamp: timestamp(),
        });

        (status, body).into_response()
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err)
    }
}

impl From<ModelError> for AppError {
    fn from(err: ModelError) -> Self {
        AppError::PredictionFailed(err)
    }
}
