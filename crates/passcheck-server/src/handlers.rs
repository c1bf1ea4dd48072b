//! Route handlers.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use passcheck_ai::ModelGateway;
use passcheck_core::{FeatureVector, PREVIOUS_SCORE, PredictionResult, STUDY_HOURS};
use serde::Serialize;
use serde_json::Value;

use crate::ApiError;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// GET /health. Liveness only; the model is not consulted.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// POST /predict
///
/// Parse → check both fields are present → coerce to numbers → classify.
/// The content type is not checked; the body only has to be JSON.
pub async fn predict(
    State(gateway): State<ModelGateway>,
    body: Bytes,
) -> Result<Json<PredictionResult>, ApiError> {
    let payload = parse_body(&body)?;
    let (study_hours, previous_score) = required_fields(&payload)?;
    let features = FeatureVector::from_json(study_hours, previous_score)?;

    let prediction = gateway.predict(&features)?;
    let result = PredictionResult::from_prediction(&prediction).ok_or_else(|| {
        ApiError::Internal(format!(
            "class {} has no probability in a {}-class distribution",
            prediction.class_id,
            prediction.probabilities.len()
        ))
    })?;

    Ok(Json(result))
}

fn parse_body(body: &[u8]) -> Result<Value, ApiError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Null) | Err(_) => Err(ApiError::InvalidJson),
        Ok(v) => Ok(v),
    }
}

fn required_fields(payload: &Value) -> Result<(&Value, &Value), ApiError> {
    let obj = payload.as_object().ok_or(ApiError::MissingFields)?;
    match (obj.get(STUDY_HOURS), obj.get(PREVIOUS_SCORE)) {
        (Some(h), Some(s)) => Ok((h, s)),
        _ => Err(ApiError::MissingFields),
    }
}
