//! Common Validation Utilities
//!
//! Shared checks used by every field validator so they report failures
//! identically. All functions are pure and allocation-free.

use crate::{
    errors::{ValidationError, ValidationResult},
    metadata::MetadataField,
    traits::Validatable,
};

/// Reject NaN and infinity
pub fn check_finite(field: MetadataField, value: f32) -> ValidationResult<()> {
    if value.is_valid() {
        Ok(())
    } else {
        Err(ValidationError::InvalidValue { field })
    }
}

/// Check that a value lies within `[min, max]`
pub fn check_range(field: MetadataField, value: f32, min: f32, max: f32) -> ValidationResult<()> {
    if value < min || value > max {
        Err(ValidationError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    } else {
        Ok(())
    }
}

/// Order a pair of limits so `min <= max`
pub fn ordered(a: f32, b: f32) -> (f32, f32) {
    if a > b { (b, a) } else { (a, b) }
}
