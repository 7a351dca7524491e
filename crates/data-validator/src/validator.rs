//! Data Validator for Range Checking

use crate::error::ValidationError;
use feature_engine::{RawInput, MAX_OWNER};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Number of numeric fields checked per input
const FIELDS_CHECKED: usize = 4;

/// Validation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Earliest accepted purchase year
    pub min_year: i32,
    /// Latest accepted purchase year (`None` = the reference year)
    pub max_year: Option<i32>,
    /// Present price valid range (lakhs)
    pub present_price_range: (f64, f64),
    /// Kilometers driven valid range
    pub kms_range: (f64, f64),
    /// Previous owners valid range
    pub owner_range: (f64, f64),
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_year: 2000,
            max_year: None,
            present_price_range: (0.1, 50.0),
            kms_range: (0.0, 500_000.0),
            owner_range: (0.0, f64::from(MAX_OWNER)),
        }
    }
}

/// Result of validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether all values are valid
    pub valid: bool,
    /// List of validation errors
    pub errors: Vec<ValidationError>,
    /// Number of fields validated
    pub fields_checked: usize,
}

impl ValidationResult {
    /// Create a valid result
    pub fn valid(fields_checked: usize) -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            fields_checked,
        }
    }

    /// Create an invalid result with errors
    pub fn invalid(errors: Vec<ValidationError>, fields_checked: usize) -> Self {
        Self {
            valid: false,
            errors,
            fields_checked,
        }
    }

    /// Human-readable error messages
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

/// Validator for user-entered car attributes
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate a single value against a range
    pub fn validate_range(
        &self,
        field: &'static str,
        value: f64,
        range: (f64, f64),
    ) -> Result<(), ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::InvalidFormat(format!(
                "{field} must be a finite number"
            )));
        }
        if value < range.0 || value > range.1 {
            Err(ValidationError::OutOfRange {
                field,
                value,
                min: range.0,
                max: range.1,
            })
        } else {
            Ok(())
        }
    }

    /// Validate purchase year against `[min_year, max_year or current_year]`
    pub fn validate_year(&self, year: i32, current_year: i32) -> Result<(), ValidationError> {
        let max = self.config.max_year.unwrap_or(current_year);
        self.validate_range(
            "year",
            f64::from(year),
            (f64::from(self.config.min_year), f64::from(max)),
        )
    }

    /// Validate present price
    pub fn validate_present_price(&self, price: f64) -> Result<(), ValidationError> {
        self.validate_range("present_price", price, self.config.present_price_range)
    }

    /// Validate kilometers driven
    pub fn validate_kms_driven(&self, kms: u32) -> Result<(), ValidationError> {
        self.validate_range("kms_driven", f64::from(kms), self.config.kms_range)
    }

    /// Validate previous owner count
    pub fn validate_owner(&self, owner: u8) -> Result<(), ValidationError> {
        self.validate_range("owner", f64::from(owner), self.config.owner_range)
    }

    /// Check every field of `raw`, collecting all failures
    pub fn validate(&self, raw: &RawInput, current_year: i32) -> ValidationResult {
        let errors: Vec<ValidationError> = [
            self.validate_year(raw.year, current_year),
            self.validate_present_price(raw.present_price),
            self.validate_kms_driven(raw.kms_driven),
            self.validate_owner(raw.owner),
        ]
        .into_iter()
        .filter_map(Result::err)
        .collect();

        if errors.is_empty() {
            ValidationResult::valid(FIELDS_CHECKED)
        } else {
            debug!("Input rejected with {} validation errors", errors.len());
            ValidationResult::invalid(errors, FIELDS_CHECKED)
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feature_engine::{default_input, sample_cars};
    use proptest::prelude::*;

    #[test]
    fn test_samples_are_valid() {
        let validator = Validator::default();
        for sample in sample_cars() {
            assert!(validator.validate(&sample.input, 2024).valid, "{}", sample.name);
        }
        assert!(validator.validate(&default_input(), 2024).valid);
    }

    #[test]
    fn test_year_bounds() {
        let validator = Validator::default();
        assert!(validator.validate_year(2000, 2024).is_ok());
        assert!(validator.validate_year(2024, 2024).is_ok());
        assert!(validator.validate_year(1999, 2024).is_err());
        assert!(validator.validate_year(2025, 2024).is_err());
    }

    #[test]
    fn test_fixed_max_year() {
        let validator = Validator::new(ValidationConfig {
            max_year: Some(2030),
            ..Default::default()
        });
        assert!(validator.validate_year(2028, 2024).is_ok());
    }

    #[test]
    fn test_present_price_range() {
        let validator = Validator::default();
        assert!(validator.validate_present_price(0.1).is_ok());
        assert!(validator.validate_present_price(50.0).is_ok());
        assert!(validator.validate_present_price(0.0).is_err());
        assert!(matches!(
            validator.validate_present_price(f64::NAN),
            Err(ValidationError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_collects_all_errors() {
        let validator = Validator::default();
        let raw = RawInput {
            year: 1999,
            present_price: 0.0,
            kms_driven: 600_000,
            owner: 4,
            ..default_input()
        };

        let result = validator.validate(&raw, 2024);
        assert!(!result.valid);
        assert_eq!(result.fields_checked, 4);
        assert_eq!(result.errors.len(), 4);
        assert_eq!(
            result.errors[3],
            ValidationError::OutOfRange {
                field: "owner",
                value: 4.0,
                min: 0.0,
                max: 3.0,
            }
        );
        assert_eq!(result.messages()[2], "kms_driven value 600000 is out of range [0, 500000]");
    }

    proptest! {
        #[test]
        fn in_range_kms_always_pass(kms in 0u32..=500_000) {
            prop_assert!(Validator::default().validate_kms_driven(kms).is_ok());
        }

        #[test]
        fn out_of_range_kms_always_fail(kms in 500_001u32..) {
            prop_assert!(Validator::default().validate_kms_driven(kms).is_err());
        }
    }
}
