//! Composite validator for a full metadata reading

use crate::{
    errors::ValidationResult,
    metadata::{MetadataField, RawMetadata},
    traits::{Validator, ValidatorConstraints},
};

use super::{AgeValidator, HumidityValidator, TemperatureValidator};

/// Validates temperature, humidity and age together
///
/// Fields are checked in model input order; the first failure wins.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MetadataValidator {
    temperature: TemperatureValidator,
    humidity: HumidityValidator,
    age: AgeValidator,
}

impl MetadataValidator {
    /// Compose from explicit field validators
    pub fn new(
        temperature: TemperatureValidator,
        humidity: HumidityValidator,
        age: AgeValidator,
    ) -> Self {
        Self { temperature, humidity, age }
    }

    /// Only reject NaN and infinity
    pub fn permissive() -> Self {
        Self {
            temperature: TemperatureValidator::unbounded(),
            humidity: HumidityValidator::unbounded(),
            age: AgeValidator::unbounded(),
        }
    }

    /// Replace the temperature validator
    pub fn with_temperature(mut self, validator: TemperatureValidator) -> Self {
        self.temperature = validator;
        self
    }

    /// Replace the humidity validator
    pub fn with_humidity(mut self, validator: HumidityValidator) -> Self {
        self.humidity = validator;
        self
    }

    /// Replace the age validator
    pub fn with_age(mut self, validator: AgeValidator) -> Self {
        self.age = validator;
        self
    }

    /// Validate all three readings
    pub fn validate(&self, raw: &RawMetadata) -> ValidationResult<()> {
        self.temperature.validate(raw.temperature)?;
        self.humidity.validate(raw.humidity)?;
        self.age.validate(raw.age)
    }

    /// Limits for one field
    pub fn constraints(&self, field: MetadataField) -> ValidatorConstraints {
        match field {
            MetadataField::Temperature => self.temperature.constraints(),
            MetadataField::Humidity => self.humidity.constraints(),
            MetadataField::Age => self.age.constraints(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ValidationError;

    #[test]
    fn accepts_typical_reading() {
        let validator = MetadataValidator::default();
        assert!(validator.validate(&RawMetadata::new(26.0, 88.0, 35.0)).is_ok());
    }

    #[test]
    fn reports_first_failing_field() {
        let validator = MetadataValidator::default();
        let result = validator.validate(&RawMetadata::new(f32::NAN, 880.0, -3.0));
        assert_eq!(
            result,
            Err(ValidationError::InvalidValue { field: MetadataField::Temperature })
        );

        let result = validator.validate(&RawMetadata::new(26.0, 880.0, -3.0));
        assert_eq!(result.unwrap_err().field(), MetadataField::Humidity);
    }

    #[test]
    fn permissive_only_rejects_non_finite() {
        let validator = MetadataValidator::permissive();
        assert!(validator.validate(&RawMetadata::new(-40.0, 880.0, 1000.0)).is_ok());
        assert!(validator.validate(&RawMetadata::new(20.0, 50.0, f32::INFINITY)).is_err());
    }

    #[test]
    fn field_overrides() {
        let validator = MetadataValidator::default()
            .with_age(AgeValidator::new_with_limits(0.0, 30.0));
        assert!(validator.validate(&RawMetadata::new(26.0, 88.0, 35.0)).is_err());
        assert_eq!(validator.constraints(MetadataField::Age).max_value, 30.0);
        assert_eq!(validator.constraints(MetadataField::Temperature).max_value, 50.0);
    }
}
