//! Prediction handler

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::service::{PredictionResult, PredictionService};
use crate::validation;
use crate::{AppError, AppResult, AppState};
use super::timestamp;

#[derive(Serialize)]
pub struct PredictResponse {
    status: &'static str,
    prediction: PredictionResult,
    timestamp: String,
}

/// Classify one sample.
///
/// Expects `{"features": [v1, ..., vN]}` with N equal to the model's
/// feature count. The body is parsed here rather than through the `Json`
/// extractor so every malformed body gets the same 400 response.
pub async fn predict(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> AppResult<Json<PredictResponse>> {
    let Some(model) = state.model.get() else {
        tracing::error!("Prediction attempted without a loaded model");
        return Err(AppError::ModelUnavailable);
    };

    let body = body.map_err(|rejection| {
        tracing::warn!("Rejected request body: {}", rejection.body_text());
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge
        } else {
            AppError::InvalidJson(rejection.body_text())
        }
    })?;

    let payload = validation::parse_body(&body).map_err(AppError::InvalidJson)?;

    let row = validation::validate(&payload, model.feature_count()).map_err(|e| {
        tracing::warn!("Validation failed: {}", e);
        AppError::Validation(e)
    })?;

    let prediction = PredictionService::new(model).predict(&row)?;

    Ok(Json(PredictResponse {
        status: "success",
        prediction,
        timestamp: timestamp(),
    }))
}
