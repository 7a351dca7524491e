//! Price Inference Engine
//!
//! Loads the trained model and its expected column list, and runs the
//! build → align → predict pipeline for a single listing.

mod artifacts;
mod engine;
mod model;
mod onnx;

pub use artifacts::{load_model, load_schema};
pub use engine::{format_price, PricePrediction, PricePredictor};
pub use model::{LinearPriceModel, PriceModel};
pub use onnx::OnnxPriceModel;

use feature_engine::FeatureError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors during artifact loading and inference
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Artifact {} could not be read: {source}", .path.display())]
    ArtifactMissing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Artifact {} is invalid: {reason}", .path.display())]
    ArtifactFormat { path: PathBuf, reason: String },
    #[error("Schema mismatch: model expects {expected:?}, schema lists {actual:?}")]
    SchemaMismatch {
        expected: Vec<String>,
        actual: Vec<String>,
    },
    #[error("Invalid input shape: expected {expected} columns, got {actual}")]
    InvalidInputShape { expected: usize, actual: usize },
    #[error("Inference failed: {0}")]
    InferenceFailed(String),
    #[error(transparent)]
    Feature(#[from] FeatureError),
}
