//! Sample Car Routes

use axum::Json;
use feature_engine::{default_input, sample_cars, RawInput, SampleCar};
use serde::Serialize;

/// Response for samples endpoint
#[derive(Debug, Serialize)]
pub struct SamplesResponse {
    /// Input used when no sample is picked
    pub default: RawInput,
    pub samples: Vec<SampleCar>,
}

/// List the preset cars
pub async fn get_samples() -> Json<SamplesResponse> {
    Json(SamplesResponse {
        default: default_input(),
        samples: sample_cars(),
    })
}
