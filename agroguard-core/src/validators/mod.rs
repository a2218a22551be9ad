//! Field Validators for Raw Readings
//!
//! ## Overview
//!
//! Growers type readings into a phone or pull them from cheap greenhouse
//! sensors. Both sources produce values the model was never trained on:
//! humidity entered as 880 instead of 88.0, temperature in Fahrenheit, or a
//! disconnected probe reporting NaN. These validators reject such readings
//! before they reach the normalizer.
//!
//! ## Validation Layers
//!
//! ### 1. Finite Check
//! NaN and infinity are rejected first with `ValidationError::InvalidValue`.
//!
//! ### 2. Range Check
//! Each field has inclusive limits (see [`crate::constants::fields`]):
//! ```text
//! temperature   0 .. 50   °C
//! humidity      0 .. 100  %
//! age           0 .. 100  days
//! ```
//!
//! ### 3. Composite Check
//! [`MetadataValidator`] runs the three field validators in model input
//! order and reports the first failure.
//!
//! ## Usage Example
//!
//! ```rust
//! use agroguard_core::validators::{MetadataValidator, TemperatureValidator};
//! use agroguard_core::{RawMetadata, Validator};
//!
//! let temp_validator = TemperatureValidator::default();
//! temp_validator.validate(26.0)?;
//!
//! let validator = MetadataValidator::default();
//! validator.validate(&RawMetadata::new(26.0, 88.0, 35.0))?;
//! # Ok::<(), agroguard_core::ValidationError>(())
//! ```
//!
//! ## Customization
//!
//! ```rust
//! use agroguard_core::validators::{HumidityValidator, MetadataValidator};
//!
//! // Tropical greenhouse: humidity never below 40%
//! let validator = MetadataValidator::default()
//!     .with_humidity(HumidityValidator::new_with_limits(40.0, 100.0));
//!
//! // Only reject NaN/infinity
//! let lenient = MetadataValidator::permissive();
//! # let _ = (validator, lenient);
//! ```

mod age;
mod humidity;
mod metadata;
mod temperature;
mod utils;

pub use age::AgeValidator;
pub use humidity::HumidityValidator;
pub use metadata::MetadataValidator;
pub use temperature::TemperatureValidator;
