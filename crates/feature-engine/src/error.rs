//! Feature Error Types

use thiserror::Error;

/// Errors during feature construction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeatureError {
    /// A categorical field holds a value outside its closed set
    #[error("Invalid {field} category: {value}")]
    InvalidCategory { field: &'static str, value: String },
}
