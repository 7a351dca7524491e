//! Artifact Loading
//!
//! Both artifacts are read once at startup. Any failure here is fatal to the
//! caller; nothing is retried.

use crate::model::{LinearPriceModel, PriceModel};
use crate::onnx::OnnxPriceModel;
use crate::InferenceError;
use feature_engine::ExpectedSchema;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

fn read_bytes(path: &Path) -> Result<Vec<u8>, InferenceError> {
    fs::read(path).map_err(|source| InferenceError::ArtifactMissing {
        path: path.to_path_buf(),
        source,
    })
}

fn format_error(path: &Path, reason: impl ToString) -> InferenceError {
    InferenceError::ArtifactFormat {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

/// Load the expected column list (a JSON array of names)
pub fn load_schema(path: impl AsRef<Path>) -> Result<ExpectedSchema, InferenceError> {
    let path = path.as_ref();
    let bytes = read_bytes(path)?;
    let schema: ExpectedSchema =
        serde_json::from_slice(&bytes).map_err(|e| format_error(path, e))?;

    if schema.is_empty() {
        warn!("Schema {} lists no columns; every prediction sees an empty row", path.display());
    }
    let duplicates = schema.duplicate_columns();
    if !duplicates.is_empty() {
        warn!("Schema {} repeats columns: {:?}", path.display(), duplicates);
    }
    let unknown: Vec<&str> = schema.unknown_columns().collect();
    if !unknown.is_empty() {
        info!("Columns always zero-filled: {:?}", unknown);
    }

    info!("Loaded schema {} ({} columns)", path.display(), schema.len());
    Ok(schema)
}

/// Load a price model, choosing the format by file extension.
///
/// `.json` is a linear model whose columns must match `schema`; `.onnx` is a
/// graph taking `schema.len()` inputs.
pub fn load_model(
    path: impl AsRef<Path>,
    schema: &ExpectedSchema,
) -> Result<Box<dyn PriceModel>, InferenceError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let model: Box<dyn PriceModel> = match extension.as_deref() {
        Some("json") => {
            let bytes = read_bytes(path)?;
            let model: LinearPriceModel =
                serde_json::from_slice(&bytes).map_err(|e| format_error(path, e))?;
            model.check_shape().map_err(|e| format_error(path, e))?;
            model.check_schema(schema)?;
            Box::new(model)
        }
        Some("onnx") => {
            let bytes = read_bytes(path)?;
            let name = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or("onnx");
            let model = OnnxPriceModel::from_bytes(&bytes, schema.len(), name)
                .map_err(|e| format_error(path, e))?;
            Box::new(model)
        }
        other => {
            return Err(format_error(
                path,
                format!("unsupported model format {:?}, expected .json or .onnx", other),
            ))
        }
    };

    info!("Loaded model {} from {}", model.name(), path.display());
    Ok(model)
}
