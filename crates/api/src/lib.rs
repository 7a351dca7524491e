//! Car Price API Server
//!
//! HTTP front end for the price estimator: sample listings, predictions,
//! health and metrics.

use axum::{
    extract::State, http::StatusCode, response::IntoResponse, routing::get, routing::post, Json,
    Router,
};
use chrono::Datelike;
use data_validator::Validator;
use inference_engine::PricePredictor;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use std::str::FromStr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod error;
mod routes;
pub mod settings;
mod telemetry;

pub use error::{ApiError, ErrorBody};
pub use routes::predictions::PredictRequest;
pub use settings::Settings;

use settings::LogSettings;

/// Application state shared across handlers. Immutable after startup.
pub struct AppState {
    /// Loaded model and schema
    pub predictor: PricePredictor,
    /// Input range checks; `None` when disabled
    pub validator: Option<Validator>,
    /// Fixed reference year, if configured
    pub current_year: Option<i32>,
    /// Prometheus handle when metrics are exported
    pub metrics: Option<PrometheusHandle>,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(predictor: PricePredictor, settings: &Settings) -> Self {
        let validator = settings
            .validation
            .enabled
            .then(|| Validator::new(settings.validation.limits.clone()));

        Self {
            predictor,
            validator,
            current_year: settings.current_year,
            metrics: None,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }

    /// Attach a metrics handle for the `/metrics` route
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Year car ages are measured against
    pub fn reference_year(&self) -> i32 {
        self.current_year
            .unwrap_or_else(|| chrono::Local::now().year())
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: u64,
    pub version: String,
    pub uptime_seconds: u64,
    pub model: String,
    pub schema_columns: usize,
    pub reference_year: i32,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/samples", get(routes::samples::get_samples))
        .route("/api/v1/predict", post(routes::predictions::predict))
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp,
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        model: state.predictor.model_name().to_string(),
        schema_columns: state.predictor.schema().len(),
        reference_year: state.reference_year(),
    })
}

/// Prometheus exposition
async fn metrics_handler(State(state): State<Arc<AppState>>) -> Result<String, StatusCode> {
    state
        .metrics
        .as_ref()
        .map(PrometheusHandle::render)
        .ok_or(StatusCode::NOT_FOUND)
}

/// Initialize logging
pub fn init_logging(settings: &LogSettings) -> Result<(), Box<dyn std::error::Error>> {
    let level = Level::from_str(&settings.level)?;
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    if settings.json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

/// Load artifacts and run the server until it stops
pub async fn run_server(settings: Settings) -> Result<(), Box<dyn std::error::Error>> {
    let predictor = PricePredictor::from_artifacts(
        &settings.artifacts.model_path,
        &settings.artifacts.schema_path,
    )?;

    let mut state = AppState::new(predictor, &settings);
    if settings.server.metrics {
        state = state.with_metrics(telemetry::install_recorder()?);
    }
    let app = create_router(Arc::new(state));

    info!("Starting API server on {}", settings.server.bind_addr);

    let listener = tokio::net::TcpListener::bind(&settings.server.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
