//! API Error Responses

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use feature_engine::FeatureError;
use inference_engine::InferenceError;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// Errors surfaced by request handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    InvalidCategory(#[from] FeatureError),
    #[error("Input failed validation")]
    Validation(Vec<String>),
    #[error("Prediction failed")]
    Inference(#[source] InferenceError),
    #[error("Malformed request body")]
    MalformedBody { status: StatusCode, reason: String },
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedBody {
            status: rejection.status(),
            reason: rejection.body_text(),
        }
    }
}

impl From<InferenceError> for ApiError {
    fn from(err: InferenceError) -> Self {
        match err {
            InferenceError::Feature(err) => ApiError::InvalidCategory(err),
            other => ApiError::Inference(other),
        }
    }
}

/// JSON error body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, details) = match &self {
            ApiError::InvalidCategory(err) => {
                warn!("Rejected input: {}", err);
                (StatusCode::UNPROCESSABLE_ENTITY, vec![err.to_string()])
            }
            ApiError::Validation(messages) => {
                warn!("Rejected input: {:?}", messages);
                (StatusCode::UNPROCESSABLE_ENTITY, messages.clone())
            }
            ApiError::Inference(err) => {
                // Details stay in the logs
                error!("Inference error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, Vec::new())
            }
            ApiError::MalformedBody { status, reason } => {
                warn!("Rejected body: {}", reason);
                (*status, vec![reason.clone()])
            }
        };

        let body = ErrorBody {
            error: self.to_string(),
            details,
        };
        (status, Json(body)).into_response()
    }
}
