//! Feature Vector Assembly

use crate::input::{FuelType, RawInput, SellerType, Transmission, MAX_OWNER};
use crate::FeatureError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Number of features in the vector
pub const FEATURE_DIMENSION: usize = 8;

/// The closed set of features a price model can be trained on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    PresentPrice,
    KmsDriven,
    Owner,
    CarAge,
    FuelTypeDiesel,
    FuelTypePetrol,
    SellerTypeIndividual,
    TransmissionManual,
}

impl Feature {
    /// All features, in canonical order
    pub const ALL: [Feature; FEATURE_DIMENSION] = [
        Feature::PresentPrice,
        Feature::KmsDriven,
        Feature::Owner,
        Feature::CarAge,
        Feature::FuelTypeDiesel,
        Feature::FuelTypePetrol,
        Feature::SellerTypeIndividual,
        Feature::TransmissionManual,
    ];

    /// Column name used by trained models
    pub fn name(&self) -> &'static str {
        match self {
            Feature::PresentPrice => "Present_Price",
            Feature::KmsDriven => "Kms_Driven",
            Feature::Owner => "Owner",
            Feature::CarAge => "Car_Age",
            Feature::FuelTypeDiesel => "Fuel_Type_Diesel",
            Feature::FuelTypePetrol => "Fuel_Type_Petrol",
            Feature::SellerTypeIndividual => "Seller_Type_Individual",
            Feature::TransmissionManual => "Transmission_Manual",
        }
    }

    /// Resolve a column name to a feature (exact match)
    pub fn from_name(name: &str) -> Option<Feature> {
        Self::ALL.into_iter().find(|feature| feature.name() == name)
    }
}

/// Feature vector for price inference
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    #[serde(rename = "Present_Price")]
    pub present_price: f64,
    #[serde(rename = "Kms_Driven")]
    pub kms_driven: u32,
    #[serde(rename = "Owner")]
    pub owner: u8,
    /// Years since purchase; negative when the purchase year is in the future
    #[serde(rename = "Car_Age")]
    pub car_age: i64,
    #[serde(rename = "Fuel_Type_Diesel")]
    pub fuel_type_diesel: u8,
    #[serde(rename = "Fuel_Type_Petrol")]
    pub fuel_type_petrol: u8,
    #[serde(rename = "Seller_Type_Individual")]
    pub seller_type_individual: u8,
    #[serde(rename = "Transmission_Manual")]
    pub transmission_manual: u8,
}

impl FeatureVector {
    /// Numeric value of a single feature
    pub fn get(&self, feature: Feature) -> f64 {
        match feature {
            Feature::PresentPrice => self.present_price,
            Feature::KmsDriven => f64::from(self.kms_driven),
            Feature::Owner => f64::from(self.owner),
            Feature::CarAge => self.car_age as f64,
            Feature::FuelTypeDiesel => f64::from(self.fuel_type_diesel),
            Feature::FuelTypePetrol => f64::from(self.fuel_type_petrol),
            Feature::SellerTypeIndividual => f64::from(self.seller_type_individual),
            Feature::TransmissionManual => f64::from(self.transmission_manual),
        }
    }

    /// Iterate `(column name, value)` pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        Feature::ALL
            .into_iter()
            .map(move |feature| (feature.name(), self.get(feature)))
    }
}

fn flag(set: bool) -> u8 {
    u8::from(set)
}

/// Builds feature vectors relative to a fixed reference year
#[derive(Debug, Clone, Copy)]
pub struct FeatureBuilder {
    current_year: i32,
}

impl FeatureBuilder {
    /// Create a builder that measures car age against `current_year`
    pub fn new(current_year: i32) -> Self {
        Self { current_year }
    }

    /// Reference year used for `Car_Age`
    pub fn current_year(&self) -> i32 {
        self.current_year
    }

    /// Derive the feature vector for one car.
    ///
    /// Car age is not clamped: a purchase year after the reference year gives
    /// a negative age. The only failure is an owner count outside `0..=3`.
    pub fn build(&self, raw: &RawInput) -> Result<FeatureVector, FeatureError> {
        if raw.owner > MAX_OWNER {
            return Err(FeatureError::InvalidCategory {
                field: "owner",
                value: raw.owner.to_string(),
            });
        }

        let features = FeatureVector {
            present_price: raw.present_price,
            kms_driven: raw.kms_driven,
            owner: raw.owner,
            car_age: i64::from(self.current_year) - i64::from(raw.year),
            fuel_type_diesel: flag(raw.fuel_type == FuelType::Diesel),
            fuel_type_petrol: flag(raw.fuel_type == FuelType::Petrol),
            seller_type_individual: flag(raw.seller_type == SellerType::Individual),
            transmission_manual: flag(raw.transmission == Transmission::Manual),
        };

        debug!(
            "Built features: age={}, fuel={}, seller={}, transmission={}",
            features.car_age, raw.fuel_type, raw.seller_type, raw.transmission
        );

        Ok(features)
    }
}
