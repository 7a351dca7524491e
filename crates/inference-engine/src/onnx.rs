//! ONNX Price Model
//!
//! Runs a regression graph exported from the training environment (for
//! example with skl2onnx) through tract. The graph takes a `[1, n]` f32
//! tensor and its first output holds the predicted price.

use crate::model::{finite_price, PriceModel};
use crate::InferenceError;
use feature_engine::AlignedRow;
use tracing::{debug, info};
use tract_onnx::prelude::*;

/// Optimized, runnable ONNX regressor
pub struct OnnxPriceModel {
    plan: TypedRunnableModel<TypedModel>,
    width: usize,
    name: String,
}

impl OnnxPriceModel {
    /// Parse and optimize a serialized ONNX graph taking `width` input columns
    pub fn from_bytes(bytes: &[u8], width: usize, name: &str) -> TractResult<Self> {
        let plan = tract_onnx::onnx()
            .model_for_read(&mut &bytes[..])?
            .with_input_fact(0, f32::fact([1, width]).into())?
            .into_optimized()?
            .into_runnable()?;

        info!("ONNX model {} ready ({} inputs)", name, width);

        Ok(Self {
            plan,
            width,
            name: name.to_string(),
        })
    }

    fn run(&self, row: &AlignedRow) -> TractResult<f64> {
        let values: Vec<f32> = row.values().iter().map(|v| *v as f32).collect();
        let input: Tensor = tract_ndarray::Array2::from_shape_vec((1, self.width), values)?.into();

        let outputs = self.plan.run(tvec!(input.into()))?;
        let output = outputs
            .first()
            .ok_or_else(|| anyhow::anyhow!("model produced no outputs"))?;
        let output = output.cast_to::<f32>()?;
        let price = output
            .as_slice::<f32>()?
            .first()
            .copied()
            .ok_or_else(|| anyhow::anyhow!("model output is empty"))?;

        Ok(f64::from(price))
    }
}

impl PriceModel for OnnxPriceModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, row: &AlignedRow) -> Result<f64, InferenceError> {
        if row.len() != self.width {
            return Err(InferenceError::InvalidInputShape {
                expected: self.width,
                actual: row.len(),
            });
        }

        let price = self
            .run(row)
            .map_err(|e| InferenceError::InferenceFailed(e.to_string()))
            .and_then(finite_price)?;

        debug!("ONNX prediction: {:.4}", price);
        Ok(price)
    }
}
