//! Feature Engineering Engine
//!
//! Turns raw used-car attributes into the fixed feature vector a price model
//! consumes, and projects that vector onto a model's expected column order.

mod error;
mod features;
mod input;
mod samples;
mod schema;

pub use error::FeatureError;
pub use features::{Feature, FeatureBuilder, FeatureVector, FEATURE_DIMENSION};
pub use input::{FuelType, RawInput, SellerType, Transmission, MAX_OWNER};
pub use samples::{default_input, sample_cars, SampleCar};
pub use schema::{align, AlignedRow, Column, ExpectedSchema, FeatureSource};
