//! Raw Car Attributes

use crate::FeatureError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Highest previous-owner count a listing can carry
pub const MAX_OWNER: u8 = 3;

/// Fuel type of the car. CNG is the encoding baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FuelType {
    Petrol,
    Diesel,
    #[serde(rename = "CNG")]
    Cng,
}

/// Who is selling the car. Dealer is the encoding baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SellerType {
    Dealer,
    Individual,
}

/// Gearbox type. Automatic is the encoding baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transmission {
    Manual,
    Automatic,
}

impl FuelType {
    pub const ALL: [FuelType; 3] = [FuelType::Petrol, FuelType::Diesel, FuelType::Cng];

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            FuelType::Petrol => "Petrol",
            FuelType::Diesel => "Diesel",
            FuelType::Cng => "CNG",
        }
    }
}

impl SellerType {
    pub const ALL: [SellerType; 2] = [SellerType::Dealer, SellerType::Individual];

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            SellerType::Dealer => "Dealer",
            SellerType::Individual => "Individual",
        }
    }
}

impl Transmission {
    pub const ALL: [Transmission; 2] = [Transmission::Manual, Transmission::Automatic];

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Transmission::Manual => "Manual",
            Transmission::Automatic => "Automatic",
        }
    }
}

/// Matches `value` case-insensitively against the display names of `all`.
fn parse_category<T: Copy>(
    field: &'static str,
    value: &str,
    all: &[T],
    name: impl Fn(&T) -> &'static str,
) -> Result<T, FeatureError> {
    let trimmed = value.trim();
    all.iter()
        .find(|candidate| name(*candidate).eq_ignore_ascii_case(trimmed))
        .copied()
        .ok_or_else(|| FeatureError::InvalidCategory {
            field,
            value: value.to_string(),
        })
}

impl FromStr for FuelType {
    type Err = FeatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_category("fuel_type", s, &Self::ALL, FuelType::as_str)
    }
}

impl FromStr for SellerType {
    type Err = FeatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_category("seller_type", s, &Self::ALL, SellerType::as_str)
    }
}

impl FromStr for Transmission {
    type Err = FeatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_category("transmission", s, &Self::ALL, Transmission::as_str)
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SellerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Transmission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attributes of a single car, as entered by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawInput {
    /// Calendar year of purchase
    pub year: i32,
    /// Current ex-showroom price (lakhs)
    pub present_price: f64,
    /// Odometer reading (km)
    pub kms_driven: u32,
    /// Number of previous owners (0..=3)
    pub owner: u8,
    pub fuel_type: FuelType,
    pub seller_type: SellerType,
    pub transmission: Transmission,
}
