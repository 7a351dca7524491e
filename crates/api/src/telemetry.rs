//! Prediction metrics
//!
//! Recorded through the `metrics` facade; calls are no-ops until a recorder
//! is installed.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

use crate::error::ApiError;

/// Install the Prometheus recorder for this process
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

pub fn record_success(latency_us: u64) {
    counter!("price_predictions_total").increment(1);
    histogram!("price_prediction_latency_seconds").record(latency_us as f64 / 1_000_000.0);
}

pub fn record_failure(err: &ApiError) {
    let reason = match err {
        ApiError::InvalidCategory(_) => "invalid_category",
        ApiError::Validation(_) => "validation",
        ApiError::Inference(_) => "inference",
        ApiError::MalformedBody { .. } => "malformed_body",
    };
    counter!("price_prediction_failures_total", "reason" => reason).increment(1);
}
