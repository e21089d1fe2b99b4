use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use super::{error::ApiError, AppState};

#[derive(Debug, Clone, Deserialize)]
pub struct PredictionRequest {
    pub id: i64,
    pub query: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictionResponse {
    pub id: i64,
    /// String or number as produced by the model, null when undetermined.
    pub answer: Value,
    pub reasoning: String,
    pub sources: Vec<String>,
}

pub async fn health_check() -> Json<Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn predict(
    State(state): State<AppState>,
    Json(request): Json<PredictionRequest>,
) -> Result<Json<PredictionResponse>, ApiError> {
    info!(id = request.id, "processing prediction request");

    if request.query.trim().is_empty() {
        return Err(ApiError::BadRequest("Query cannot be empty".to_string()));
    }

    let parsed = state.pipeline.process(&request.query).await?;

    info!(id = request.id, "successfully processed request");

    Ok(Json(PredictionResponse {
        id: request.id,
        answer: parsed.answer,
        reasoning: parsed.reasoning,
        sources: parsed.urls,
    }))
}
