//! Model information handler

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::Value;

use crate::model::ArtifactSource;
use crate::{AppError, AppResult, AppState};
use super::timestamp;

#[derive(Serialize)]
pub struct ModelInfoResponse {
    status: &'static str,
    model_metadata: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    artifact: Option<ArtifactSource>,
    timestamp: String,
}

/// Full training metadata plus where the bundle was loaded from
pub async fn describe(State(state): State<AppState>) -> AppResult<Json<ModelInfoResponse>> {
    let model = state.model.get().ok_or(AppError::ModelUnavailable)?;

    let model_metadata = serde_json::to_value(model.metadata())
        .map_err(|e| AppError::InternalError(format!("Failed to serialize model metadata: {}", e)))?;

    Ok(Json(ModelInfoResponse {
        status: "success",
        model_metadata,
        artifact: model.source().cloned(),
        timestamp: timestamp(),
    }))
}
