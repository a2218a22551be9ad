//! Metadata Standardization
//!
//! ## Overview
//!
//! The model's metadata branch expects three z-scored features. This module
//! turns raw readings into that form:
//!
//! ```text
//! normalized[i] = (raw[i] - MEANS[i]) / SCALES[i]
//!
//! i = 0: temperature (°C)
//! i = 1: relative humidity (%)
//! i = 2: age (days)
//! ```
//!
//! ## Guarantees
//!
//! - Pure and deterministic: same input, same bits out
//! - Total: scales are validated as finite and > 0 at construction, so the
//!   division is always defined
//! - No range checks: out-of-range values are standardized like any other.
//!   NaN and infinity propagate. Rejecting them is the job of
//!   [`crate::MetadataValidator`], which the pipeline runs first.
//!
//! ## Example
//!
//! ```rust
//! use agroguard_core::{MetadataNormalizer, constants::METADATA_MEANS};
//!
//! let normalizer = MetadataNormalizer::default();
//! let at_mean = normalizer.normalize(METADATA_MEANS[0], METADATA_MEANS[1], METADATA_MEANS[2]);
//! assert_eq!(at_mean.as_array(), &[0.0, 0.0, 0.0]);
//! ```

use core::fmt;

use crate::constants::metadata::{METADATA_FEATURES, METADATA_MEANS, METADATA_SCALES};
use crate::errors::NormalizerError;

/// Identifies one of the three metadata readings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MetadataField {
    /// Air temperature in °C
    Temperature,
    /// Relative humidity in %
    Humidity,
    /// Subject age in days
    Age,
}

impl MetadataField {
    /// All fields in model input order
    pub const ALL: [MetadataField; METADATA_FEATURES] =
        [Self::Temperature, Self::Humidity, Self::Age];

    /// Position in the metadata tensor
    pub const fn index(self) -> usize {
        match self {
            Self::Temperature => 0,
            Self::Humidity => 1,
            Self::Age => 2,
        }
    }

    /// Lowercase field name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Humidity => "humidity",
            Self::Age => "age",
        }
    }

    /// Display unit
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Temperature => "°C",
            Self::Humidity => "%",
            Self::Age => "days",
        }
    }
}

impl fmt::Display for MetadataField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw environmental readings for one request
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawMetadata {
    /// Air temperature (°C)
    pub temperature: f32,
    /// Relative humidity (%)
    pub humidity: f32,
    /// Subject age (days)
    pub age: f32,
}

impl RawMetadata {
    /// Bundle three readings
    pub const fn new(temperature: f32, humidity: f32, age: f32) -> Self {
        Self { temperature, humidity, age }
    }

    /// Reading for a given field
    pub fn get(&self, field: MetadataField) -> f32 {
        match field {
            MetadataField::Temperature => self.temperature,
            MetadataField::Humidity => self.humidity,
            MetadataField::Age => self.age,
        }
    }

    /// Readings in model input order
    pub fn to_array(&self) -> [f32; METADATA_FEATURES] {
        [self.temperature, self.humidity, self.age]
    }
}

impl fmt::Display for RawMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.1}°C, {:.1}%, {:.0} days",
            self.temperature, self.humidity, self.age
        )
    }
}

/// Standardized metadata features, always exactly three
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NormalizedMetadata {
    values: [f32; METADATA_FEATURES],
}

impl NormalizedMetadata {
    /// Wrap already-standardized features
    pub const fn from_array(values: [f32; METADATA_FEATURES]) -> Self {
        Self { values }
    }

    /// Feature values in model input order
    pub fn as_array(&self) -> &[f32; METADATA_FEATURES] {
        &self.values
    }

    /// Feature values as a slice
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    /// Value for one field
    pub fn get(&self, field: MetadataField) -> f32 {
        self.values[field.index()]
    }

    /// Always 3
    pub const fn len(&self) -> usize {
        METADATA_FEATURES
    }

    /// Never empty
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Tensor shape `[1, 3]`
    pub const fn shape(&self) -> [usize; 2] {
        [1, METADATA_FEATURES]
    }

    /// True if every feature is finite
    pub fn is_finite(&self) -> bool {
        self.values.iter().all(|v| v.is_finite())
    }

    /// Contiguous native-endian float32 buffer (12 bytes)
    pub fn to_ne_bytes(&self) -> [u8; METADATA_FEATURES * 4] {
        let mut out = [0u8; METADATA_FEATURES * 4];
        for (chunk, value) in out.chunks_exact_mut(4).zip(self.values.iter()) {
            chunk.copy_from_slice(&value.to_ne_bytes());
        }
        out
    }
}

impl fmt::Display for NormalizedMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.3}, {:.3}, {:.3}]",
            self.values[0], self.values[1], self.values[2]
        )
    }
}

/// Standardizes raw readings with fixed per-feature mean/scale pairs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetadataNormalizer {
    means: [f32; METADATA_FEATURES],
    scales: [f32; METADATA_FEATURES],
}

impl Default for MetadataNormalizer {
    fn default() -> Self {
        // Constants are known-good; skip the runtime check
        Self {
            means: METADATA_MEANS,
            scales: METADATA_SCALES,
        }
    }
}

impl MetadataNormalizer {
    /// Create a normalizer for a different model version
    ///
    /// Rejects non-finite means and any scale that is not finite and
    /// strictly positive.
    pub fn new(
        means: [f32; METADATA_FEATURES],
        scales: [f32; METADATA_FEATURES],
    ) -> Result<Self, NormalizerError> {
        for field in MetadataField::ALL {
            let i = field.index();
            if !means[i].is_finite() {
                return Err(NormalizerError::InvalidMean { field, mean: means[i] });
            }
            if !(scales[i].is_finite() && scales[i] > 0.0) {
                return Err(NormalizerError::InvalidScale { field, scale: scales[i] });
            }
        }

        Ok(Self { means, scales })
    }

    /// Per-feature means
    pub fn means(&self) -> &[f32; METADATA_FEATURES] {
        &self.means
    }

    /// Per-feature scales
    pub fn scales(&self) -> &[f32; METADATA_FEATURES] {
        &self.scales
    }

    /// Standardize three readings
    pub fn normalize(&self, temperature: f32, humidity: f32, age: f32) -> NormalizedMetadata {
        self.normalize_raw(&RawMetadata::new(temperature, humidity, age))
    }

    /// Standardize a bundled reading
    pub fn normalize_raw(&self, raw: &RawMetadata) -> NormalizedMetadata {
        let input = raw.to_array();
        let mut values = [0.0f32; METADATA_FEATURES];

        for i in 0..METADATA_FEATURES {
            values[i] = (input[i] - self.means[i]) / self.scales[i];
        }

        let normalized = NormalizedMetadata::from_array(values);
        log_trace!("metadata: {} -> normalized {}", raw, normalized);
        normalized
    }

    /// Invert the standardization for one feature
    pub fn denormalize(&self, field: MetadataField, value: f32) -> f32 {
        let i = field.index();
        value * self.scales[i] + self.means[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn means_map_to_zero() {
        let normalizer = MetadataNormalizer::default();
        let out = normalizer.normalize(METADATA_MEANS[0], METADATA_MEANS[1], METADATA_MEANS[2]);
        assert_eq!(out.as_array(), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn matches_formula_exactly() {
        let normalizer = MetadataNormalizer::default();
        let out = normalizer.normalize(26.0, 88.0, 35.0);

        assert_eq!(out.get(MetadataField::Temperature), (26.0 - METADATA_MEANS[0]) / METADATA_SCALES[0]);
        assert_eq!(out.get(MetadataField::Humidity), (88.0 - METADATA_MEANS[1]) / METADATA_SCALES[1]);
        assert_eq!(out.get(MetadataField::Age), (35.0 - METADATA_MEANS[2]) / METADATA_SCALES[2]);
    }

    #[test]
    fn rounded_means_are_near_zero() {
        let normalizer = MetadataNormalizer::default();
        let out = normalizer.normalize(23.196, 85.624, 28.163);
        for v in out.as_slice() {
            assert!(v.abs() < 1e-4, "expected ~0, got {}", v);
        }
    }

    #[test]
    fn one_scale_above_mean_is_one() {
        let normalizer = MetadataNormalizer::default();
        let out = normalizer.normalize(
            METADATA_MEANS[0] + METADATA_SCALES[0],
            METADATA_MEANS[1],
            METADATA_MEANS[2] - METADATA_SCALES[2],
        );
        assert!((out.as_array()[0] - 1.0).abs() < 1e-6);
        assert!((out.as_array()[2] + 1.0).abs() < 1e-6);
    }

    #[test]
    fn non_finite_propagates() {
        let normalizer = MetadataNormalizer::default();
        let out = normalizer.normalize(f32::NAN, f32::INFINITY, 10.0);
        assert!(out.as_array()[0].is_nan());
        assert!(out.as_array()[1].is_infinite());
        assert!(out.as_array()[2].is_finite());
        assert!(!out.is_finite());
    }

    #[test]
    fn rejects_bad_scales() {
        assert!(matches!(
            MetadataNormalizer::new([0.0; 3], [1.0, 0.0, 1.0]),
            Err(NormalizerError::InvalidScale { field: MetadataField::Humidity, .. })
        ));
        assert!(MetadataNormalizer::new([0.0; 3], [1.0, 1.0, -2.0]).is_err());
        assert!(MetadataNormalizer::new([0.0; 3], [f32::NAN, 1.0, 1.0]).is_err());
        assert!(MetadataNormalizer::new([f32::INFINITY, 0.0, 0.0], [1.0; 3]).is_err());
        assert!(MetadataNormalizer::new([1.0, 2.0, 3.0], [0.5, 0.5, 0.5]).is_ok());
    }

    #[test]
    fn denormalize_roundtrips_single_value() {
        let normalizer = MetadataNormalizer::default();
        let out = normalizer.normalize(30.0, 70.0, 12.0);
        let back = normalizer.denormalize(MetadataField::Humidity, out.get(MetadataField::Humidity));
        assert!((back - 70.0).abs() < 1e-4);
    }

    #[test]
    fn byte_buffer_is_native_endian() {
        let features = NormalizedMetadata::from_array([1.0, -2.5, 0.25]);
        let bytes = features.to_ne_bytes();
        assert_eq!(bytes.len(), 12);
        assert_eq!(&bytes[4..8], &(-2.5f32).to_ne_bytes());
        assert_eq!(features.shape(), [1, 3]);
    }
}
