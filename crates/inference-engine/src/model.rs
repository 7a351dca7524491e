//! Price Models

use crate::InferenceError;
use feature_engine::{AlignedRow, ExpectedSchema};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A trained regressor that maps an aligned row to a price in lakhs.
///
/// Models are read-only once loaded and may be shared across threads.
pub trait PriceModel: Send + Sync {
    /// Short identifier for logs and health output
    fn name(&self) -> &str;

    /// Predict the selling price for one row
    fn predict(&self, row: &AlignedRow) -> Result<f64, InferenceError>;
}

/// Reject NaN and infinite model outputs
pub(crate) fn finite_price(price: f64) -> Result<f64, InferenceError> {
    if price.is_finite() {
        Ok(price)
    } else {
        Err(InferenceError::InferenceFailed(format!(
            "non-finite prediction {price}"
        )))
    }
}

/// Ordinary least-squares regressor stored as JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearPriceModel {
    /// Columns the coefficients were fitted on, in order
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LinearPriceModel {
    pub fn new(
        feature_names: Vec<String>,
        coefficients: Vec<f64>,
        intercept: f64,
    ) -> Result<Self, InferenceError> {
        let model = Self {
            feature_names,
            coefficients,
            intercept,
        };
        model.check_shape()?;
        Ok(model)
    }

    /// Ensure there is one coefficient per named column
    pub fn check_shape(&self) -> Result<(), InferenceError> {
        if self.feature_names.len() != self.coefficients.len() {
            return Err(InferenceError::InvalidInputShape {
                expected: self.feature_names.len(),
                actual: self.coefficients.len(),
            });
        }
        Ok(())
    }

    /// Ensure the model was fitted on exactly `schema`'s columns
    pub fn check_schema(&self, schema: &ExpectedSchema) -> Result<(), InferenceError> {
        if !self.feature_names.iter().map(String::as_str).eq(schema.names()) {
            return Err(InferenceError::SchemaMismatch {
                expected: self.feature_names.clone(),
                actual: schema.names().map(str::to_string).collect(),
            });
        }
        Ok(())
    }
}

impl PriceModel for LinearPriceModel {
    fn name(&self) -> &str {
        "linear"
    }

    fn predict(&self, row: &AlignedRow) -> Result<f64, InferenceError> {
        if row.len() != self.coefficients.len() {
            return Err(InferenceError::InvalidInputShape {
                expected: self.coefficients.len(),
                actual: row.len(),
            });
        }

        let price = self.intercept
            + self
                .coefficients
                .iter()
                .zip(row.values())
                .map(|(coef, value)| coef * value)
                .sum::<f64>();

        let price = finite_price(price)?;
        debug!("Linear prediction: {:.4}", price);
        Ok(price)
    }
}
