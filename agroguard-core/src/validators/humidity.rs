//! Humidity validator for relative humidity readings
//!
//! Relative humidity is a percentage of saturation, so 0..100 is a hard
//! physical bound. Greenhouse cucumbers sit at 70-95% most of the time; the
//! training set mean is about 86%.
//!
//! ```rust
//! use agroguard_core::validators::HumidityValidator;
//! use agroguard_core::Validator;
//!
//! let validator = HumidityValidator::default();
//! assert!(validator.validate(88.0).is_ok());
//! assert!(validator.validate(880.0).is_err());
//! ```

use crate::{
    constants::fields::{HUMIDITY_MAX_PCT, HUMIDITY_MIN_PCT},
    errors::ValidationResult,
    metadata::MetadataField,
    traits::{Validator, ValidatorConstraints},
};

use super::utils;

/// Humidity validator for relative humidity percentage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HumidityValidator {
    /// Minimum valid RH%
    min_percent: f32,

    /// Maximum valid RH%
    max_percent: f32,
}

impl Default for HumidityValidator {
    fn default() -> Self {
        Self {
            min_percent: HUMIDITY_MIN_PCT,
            max_percent: HUMIDITY_MAX_PCT,
        }
    }
}

impl HumidityValidator {
    /// Create validator with custom limits, clamped to 0..100
    pub fn new_with_limits(min: f32, max: f32) -> Self {
        let (min, max) = utils::ordered(min, max);

        Self {
            min_percent: min.max(HUMIDITY_MIN_PCT),
            max_percent: max.min(HUMIDITY_MAX_PCT),
        }
    }

    /// Accept any finite value
    pub fn unbounded() -> Self {
        Self {
            min_percent: f32::MIN,
            max_percent: f32::MAX,
        }
    }
}

impl Validator for HumidityValidator {
    type Value = f32;

    fn validate(&self, value: Self::Value) -> ValidationResult<()> {
        utils::check_finite(MetadataField::Humidity, value)?;
        utils::check_range(MetadataField::Humidity, value, self.min_percent, self.max_percent)
    }

    fn constraints(&self) -> ValidatorConstraints {
        ValidatorConstraints {
            field: MetadataField::Humidity,
            min_value: self.min_percent,
            max_value: self.max_percent,
        }
    }
}
