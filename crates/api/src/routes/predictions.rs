//! Prediction Routes

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use feature_engine::{FeatureError, RawInput};
use inference_engine::PricePrediction;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::error::ApiError;
use crate::telemetry;
use crate::AppState;

/// Body of a prediction request. Categorical fields arrive as free text and
/// are checked against their closed sets here.
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub year: i32,
    pub present_price: f64,
    pub kms_driven: u32,
    pub owner: u8,
    pub fuel_type: String,
    pub seller_type: String,
    pub transmission: String,
}

impl PredictRequest {
    /// Parse the categorical fields
    pub fn into_raw_input(self) -> Result<RawInput, FeatureError> {
        Ok(RawInput {
            year: self.year,
            present_price: self.present_price,
            kms_driven: self.kms_driven,
            owner: self.owner,
            fuel_type: self.fuel_type.parse()?,
            seller_type: self.seller_type.parse()?,
            transmission: self.transmission.parse()?,
        })
    }
}

/// Estimate the selling price of one car
pub async fn predict(
    State(state): State<Arc<AppState>>,
    body: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PricePrediction>, ApiError> {
    let result = body
        .map_err(ApiError::from)
        .and_then(|Json(request)| run_prediction(&state, request));
    match &result {
        Ok(prediction) => telemetry::record_success(prediction.latency_us),
        Err(err) => telemetry::record_failure(err),
    }
    result.map(Json)
}

fn run_prediction(state: &AppState, request: PredictRequest) -> Result<PricePrediction, ApiError> {
    let raw = request.into_raw_input()?;
    let current_year = state.reference_year();

    if let Some(validator) = &state.validator {
        let validation = validator.validate(&raw, current_year);
        if !validation.valid {
            return Err(ApiError::Validation(validation.messages()));
        }
    }

    let prediction = state.predictor.predict(&raw, current_year)?;
    info!(
        "Predicted {} for {} {} {} ({})",
        prediction.display, raw.year, raw.fuel_type, raw.transmission, raw.seller_type
    );
    Ok(prediction)
}
