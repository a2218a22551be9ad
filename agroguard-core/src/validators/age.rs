//! Age validator for subject age in days
//!
//! Age counts days since fruit set (fruit samples) or planting (leaf
//! samples). Negative ages are impossible; the upper limit covers the
//! longest greenhouse cycle.

use crate::{
    constants::fields::{AGE_MAX_DAYS, AGE_MIN_DAYS},
    errors::ValidationResult,
    metadata::MetadataField,
    traits::{Validator, ValidatorConstraints},
};

use super::utils;

/// Age validator for day counts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgeValidator {
    min_days: f32,
    max_days: f32,
}

impl Default for AgeValidator {
    fn default() -> Self {
        Self {
            min_days: AGE_MIN_DAYS,
            max_days: AGE_MAX_DAYS,
        }
    }
}

impl AgeValidator {
    /// Create validator with custom limits; ages are never negative
    pub fn new_with_limits(min: f32, max: f32) -> Self {
        let (min, max) = utils::ordered(min, max);

        Self {
            min_days: min.max(0.0),
            max_days: max,
        }
    }

    /// Accept any finite value
    pub fn unbounded() -> Self {
        Self {
            min_days: f32::MIN,
            max_days: f32::MAX,
        }
    }
}

impl Validator for AgeValidator {
    type Value = f32;

    fn validate(&self, value: Self::Value) -> ValidationResult<()> {
        utils::check_finite(MetadataField::Age, value)?;
        utils::check_range(MetadataField::Age, value, self.min_days, self.max_days)
    }

    fn constraints(&self) -> ValidatorConstraints {
        ValidatorConstraints {
            field: MetadataField::Age,
            min_value: self.min_days,
            max_value: self.max_days,
        }
    }
}
