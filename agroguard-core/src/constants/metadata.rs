//! Metadata Standardization Constants
//!
//! The metadata branch of the multimodal model was trained on z-scored
//! features: `(raw - mean) / scale`, with mean and scale fitted on the
//! training split by a standard scaler. The values below are those fitted
//! parameters. They must match the training run exactly; an "almost equal"
//! mean shifts every prediction.
//!
//! Feature order is fixed: temperature, humidity, age.

/// Number of metadata features fed to the model.
pub const METADATA_FEATURES: usize = 3;

/// Mean temperature of the training set (°C).
pub const TEMPERATURE_MEAN_C: f32 = 23.196046875;

/// Standard deviation of temperature in the training set (°C).
pub const TEMPERATURE_SCALE_C: f32 = 4.951200769540933;

/// Mean relative humidity of the training set (%).
pub const HUMIDITY_MEAN_PCT: f32 = 85.624296875;

/// Standard deviation of relative humidity in the training set (%).
pub const HUMIDITY_SCALE_PCT: f32 = 12.193795501170472;

/// Mean subject age of the training set (days).
pub const AGE_MEAN_DAYS: f32 = 28.16296875;

/// Standard deviation of subject age in the training set (days).
pub const AGE_SCALE_DAYS: f32 = 16.566792008005756;

/// Per-feature means in model input order.
pub const METADATA_MEANS: [f32; METADATA_FEATURES] =
    [TEMPERATURE_MEAN_C, HUMIDITY_MEAN_PCT, AGE_MEAN_DAYS];

/// Per-feature scales in model input order. All strictly positive.
pub const METADATA_SCALES: [f32; METADATA_FEATURES] =
    [TEMPERATURE_SCALE_C, HUMIDITY_SCALE_PCT, AGE_SCALE_DAYS];
