//! Temperature validator for greenhouse air readings
//!
//! Validates temperature readings based on:
//! - Finite value (disconnected probes report NaN)
//! - Cultivation range: cucumbers are not grown below freezing or above 50°C
//!
//! A reading of 78 is far more likely Fahrenheit than a heat wave.

use crate::{
    constants::fields::{TEMPERATURE_MAX_C, TEMPERATURE_MIN_C},
    errors::ValidationResult,
    metadata::MetadataField,
    traits::{Validator, ValidatorConstraints},
};

use super::utils;

/// Temperature validator for Celsius readings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureValidator {
    /// Minimum valid temperature in Celsius
    min_celsius: f32,

    /// Maximum valid temperature in Celsius
    max_celsius: f32,
}

impl Default for TemperatureValidator {
    fn default() -> Self {
        Self {
            min_celsius: TEMPERATURE_MIN_C,
            max_celsius: TEMPERATURE_MAX_C,
        }
    }
}

impl TemperatureValidator {
    /// Create validator with custom limits
    pub fn new_with_limits(min: f32, max: f32) -> Self {
        let (min, max) = utils::ordered(min, max);

        Self {
            min_celsius: min.max(-273.15), // Can't go below absolute zero
            max_celsius: max,
        }
    }

    /// Heated greenhouse: tighter band around cultivation temperatures
    pub fn greenhouse() -> Self {
        Self {
            min_celsius: 5.0,
            max_celsius: 45.0,
        }
    }

    /// Accept any finite value
    pub fn unbounded() -> Self {
        Self {
            min_celsius: f32::MIN,
            max_celsius: f32::MAX,
        }
    }
}

impl Validator for TemperatureValidator {
    type Value = f32;

    fn validate(&self, value: Self::Value) -> ValidationResult<()> {
        utils::check_finite(MetadataField::Temperature, value)?;
        utils::check_range(MetadataField::Temperature, value, self.min_celsius, self.max_celsius)
    }

    fn constraints(&self) -> ValidatorConstraints {
        ValidatorConstraints {
            field: MetadataField::Temperature,
            min_value: self.min_celsius,
            max_value: self.max_celsius,
        }
    }
}
