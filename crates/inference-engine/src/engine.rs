//! Price Prediction Pipeline

use crate::artifacts::{load_model, load_schema};
use crate::model::PriceModel;
use crate::InferenceError;
use feature_engine::{align, ExpectedSchema, FeatureBuilder, FeatureVector, RawInput};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

/// Render a price for display, e.g. `₹ 3.45 Lakhs`
pub fn format_price(price_lakhs: f64) -> String {
    format!("₹ {:.2} Lakhs", price_lakhs)
}

/// Prediction result for one listing
#[derive(Debug, Clone, Serialize)]
pub struct PricePrediction {
    /// Estimated selling price (lakhs)
    pub price_lakhs: f64,
    /// Formatted price
    pub display: String,
    /// Reference year the car age was computed against
    pub current_year: i32,
    /// Features the model saw, before alignment
    pub features: FeatureVector,
    /// Inference latency in microseconds
    pub latency_us: u64,
}

/// Model plus the column order it expects
pub struct PricePredictor {
    model: Box<dyn PriceModel>,
    schema: ExpectedSchema,
}

impl PricePredictor {
    /// Create a predictor from an already loaded model and schema
    pub fn new(model: Box<dyn PriceModel>, schema: ExpectedSchema) -> Self {
        Self { model, schema }
    }

    /// Load both artifacts from disk
    pub fn from_artifacts(
        model_path: impl AsRef<Path>,
        schema_path: impl AsRef<Path>,
    ) -> Result<Self, InferenceError> {
        let schema = load_schema(schema_path)?;
        let model = load_model(model_path, &schema)?;
        info!(
            "Price predictor ready: model={}, columns={}",
            model.name(),
            schema.len()
        );
        Ok(Self::new(model, schema))
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    pub fn schema(&self) -> &ExpectedSchema {
        &self.schema
    }

    /// Build, align and run the model for one listing
    pub fn predict(
        &self,
        raw: &RawInput,
        current_year: i32,
    ) -> Result<PricePrediction, InferenceError> {
        let start = std::time::Instant::now();

        let features = FeatureBuilder::new(current_year).build(raw)?;
        let row = align(&features, &self.schema);
        let price_lakhs = self.model.predict(&row)?;

        let latency_us = start.elapsed().as_micros() as u64;
        debug!("Inference completed in {}us", latency_us);

        Ok(PricePrediction {
            price_lakhs,
            display: format_price(price_lakhs),
            current_year,
            features,
            latency_us,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LinearPriceModel;
    use feature_engine::{sample_cars, AlignedRow};

    fn linear_predictor() -> PricePredictor {
        let schema = ExpectedSchema::new(["Present_Price", "Car_Age", "Seller_Type_Individual"]);
        let model = LinearPriceModel::new(
            schema.names().map(str::to_string).collect(),
            vec![0.6, -0.1, -0.5],
            0.5,
        )
        .unwrap();
        PricePredictor::new(Box::new(model), schema)
    }

    struct FailingModel;

    impl PriceModel for FailingModel {
        fn name(&self) -> &str {
            "failing"
        }

        fn predict(&self, _row: &AlignedRow) -> Result<f64, InferenceError> {
            Err(InferenceError::InferenceFailed("boom".to_string()))
        }
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(3.456), "₹ 3.46 Lakhs");
        assert_eq!(format_price(12.0), "₹ 12.00 Lakhs");
    }

    #[test]
    fn test_budget_petrol_prediction() {
        let budget = &sample_cars()[0];
        let prediction = linear_predictor().predict(&budget.input, 2024).unwrap();

        // 0.5 + 0.6*3.5 - 0.1*12 - 0.5*1
        assert!((prediction.price_lakhs - 0.9).abs() < 1e-9);
        assert_eq!(prediction.display, "₹ 0.90 Lakhs");
        assert_eq!(prediction.features.car_age, 12);
        assert_eq!(prediction.current_year, 2024);
    }

    #[test]
    fn test_invalid_owner_propagates() {
        let raw = RawInput {
            owner: 9,
            ..sample_cars()[0].input.clone()
        };
        let err = linear_predictor().predict(&raw, 2024).unwrap_err();
        assert!(matches!(err, InferenceError::Feature(_)));
    }

    #[test]
    fn test_demo_artifacts() {
        let models = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../models");
        let predictor = PricePredictor::from_artifacts(
            models.join("linear_model.json"),
            models.join("model_features.json"),
        )
        .unwrap();

        assert_eq!(predictor.schema().len(), 8);
        assert_eq!(predictor.schema().unknown_columns().count(), 0);
        let prediction = predictor.predict(&sample_cars()[2].input, 2024).unwrap();
        assert!(prediction.price_lakhs.is_finite());
    }

    #[test]
    fn test_model_failure_propagates() {
        let predictor = PricePredictor::new(Box::new(FailingModel), ExpectedSchema::canonical());
        let err = predictor.predict(&sample_cars()[1].input, 2024).unwrap_err();
        assert!(matches!(err, InferenceError::InferenceFailed(_)));
        assert_eq!(predictor.model_name(), "failing");
    }
}
