//! Core traits for validators
//!
//! These traits define the interface all field validators implement.
//! Keep them simple: a reading is one scalar, validated on its own.

use crate::errors::ValidationResult;
use crate::metadata::MetadataField;

/// Core validator trait - implement this for each reading type
pub trait Validator {
    /// The type of value this validator handles
    type Value;

    /// Validate a single reading
    fn validate(&self, value: Self::Value) -> ValidationResult<()>;

    /// Get accepted limits for this validator
    fn constraints(&self) -> ValidatorConstraints;
}

/// Accepted limits for a validator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatorConstraints {
    /// Field being validated
    pub field: MetadataField,

    /// Minimum valid value (inclusive)
    pub min_value: f32,

    /// Maximum valid value (inclusive)
    pub max_value: f32,
}

/// Trait for values that can be validated
pub trait Validatable {
    /// Check if the value is a usable number (not NaN, infinite, etc)
    fn is_valid(&self) -> bool;
}

impl Validatable for f32 {
    fn is_valid(&self) -> bool {
        self.is_finite()
    }
}

impl Validatable for f64 {
    fn is_valid(&self) -> bool {
        self.is_finite()
    }
}
