//! Sample Cars

use crate::input::{FuelType, RawInput, SellerType, Transmission};
use serde::Serialize;

/// A named preset listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleCar {
    pub name: &'static str,
    pub input: RawInput,
}

/// Input used when no sample is selected
pub fn default_input() -> RawInput {
    RawInput {
        year: 2015,
        present_price: 5.0,
        kms_driven: 30_000,
        owner: 0,
        fuel_type: FuelType::Petrol,
        seller_type: SellerType::Dealer,
        transmission: Transmission::Manual,
    }
}

/// Preset listings covering the common segments
pub fn sample_cars() -> Vec<SampleCar> {
    vec![
        SampleCar {
            name: "Budget Petrol Car",
            input: RawInput {
                year: 2012,
                present_price: 3.5,
                kms_driven: 60_000,
                owner: 1,
                fuel_type: FuelType::Petrol,
                seller_type: SellerType::Individual,
                transmission: Transmission::Manual,
            },
        },
        SampleCar {
            name: "Family Diesel Car",
            input: RawInput {
                year: 2016,
                present_price: 7.5,
                kms_driven: 45_000,
                owner: 0,
                fuel_type: FuelType::Diesel,
                seller_type: SellerType::Dealer,
                transmission: Transmission::Manual,
            },
        },
        SampleCar {
            name: "Premium Automatic Car",
            input: RawInput {
                year: 2019,
                present_price: 14.0,
                kms_driven: 20_000,
                owner: 0,
                fuel_type: FuelType::Petrol,
                seller_type: SellerType::Dealer,
                transmission: Transmission::Automatic,
            },
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FeatureBuilder;

    #[test]
    fn test_samples_build() {
        let builder = FeatureBuilder::new(2024);
        for sample in sample_cars() {
            assert!(builder.build(&sample.input).is_ok(), "{} failed to build", sample.name);
        }
        assert!(builder.build(&default_input()).is_ok());
    }

    #[test]
    fn test_premium_automatic_encoding() {
        let premium = sample_cars()
            .into_iter()
            .find(|sample| sample.name == "Premium Automatic Car")
            .unwrap();
        let features = FeatureBuilder::new(2024).build(&premium.input).unwrap();
        assert_eq!(features.transmission_manual, 0);
        assert_eq!(features.seller_type_individual, 0);
        assert_eq!(features.fuel_type_petrol, 1);
        assert_eq!(features.car_age, 5);
    }
}
