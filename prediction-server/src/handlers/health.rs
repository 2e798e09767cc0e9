//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::{json, Value};

use crate::{AppError, AppResult, AppState};
use super::timestamp;

#[derive(Serialize)]
pub struct ModelSummary {
    trained_at: Value,
    test_auc: Value,
    features_count: usize,
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    message: &'static str,
    model_info: ModelSummary,
    timestamp: String,
}

pub async fn check(State(state): State<AppState>) -> AppResult<Json<HealthResponse>> {
    let model = state.model.get().ok_or(AppError::ModelUnavailable)?;
    let metadata = model.metadata();

    let response = HealthResponse {
        status: "healthy",
        message: "Breast cancer prediction service is operational",
        model_info: ModelSummary {
            trained_at: metadata
                .trained_at
                .as_ref()
                .map_or_else(|| json!("unknown"), |t| json!(t)),
            test_auc: metadata
                .test_auc
                .map_or_else(|| json!("unknown"), |auc| json!(auc)),
            features_count: metadata.features_count(),
        },
        timestamp: timestamp(),
    };

    tracing::info!("Health check succeeded");
    Ok(Json(response))
}
