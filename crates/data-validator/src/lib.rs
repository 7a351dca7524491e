//! Input Validation
//!
//! Range checks for car attributes before they reach the feature builder.

mod error;
mod validator;

pub use error::ValidationError;
pub use validator::{Validator, ValidationConfig, ValidationResult};
