//! Field Limits for Raw Readings
//!
//! Ranges accepted from growers in the field app. Readings outside these
//! bounds are almost always typos (humidity entered as 880) or a sensor
//! reporting in the wrong unit.

// ===== TEMPERATURE =====

/// Minimum accepted air temperature (°C).
///
/// Cucumber growth stalls near freezing; no samples exist below this.
pub const TEMPERATURE_MIN_C: f32 = 0.0;

/// Maximum accepted air temperature (°C).
pub const TEMPERATURE_MAX_C: f32 = 50.0;

// ===== HUMIDITY =====

/// Minimum relative humidity (%). Physical lower limit (dry air).
pub const HUMIDITY_MIN_PCT: f32 = 0.0;

/// Maximum relative humidity (%). Physical upper limit (saturated air).
pub const HUMIDITY_MAX_PCT: f32 = 100.0;

// ===== AGE =====

/// Minimum subject age (days since planting or fruit set).
pub const AGE_MIN_DAYS: f32 = 0.0;

/// Maximum subject age (days).
///
/// Longer than any greenhouse cucumber cycle.
pub const AGE_MAX_DAYS: f32 = 100.0;
