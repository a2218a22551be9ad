//! Model profile: everything a pipeline needs to know about one exported model
//!
//! A profile travels as JSON next to the model asset. Retraining the model
//! changes the standardization constants and possibly the label order, so
//! both live in the profile rather than in code.

use std::fs;
use std::path::Path;

use agroguard_core::{
    validators::{AgeValidator, HumidityValidator, TemperatureValidator},
    ClassTable, MetadataField, MetadataNormalizer, MetadataValidator,
};
use serde::{Deserialize, Serialize};

use crate::ProfileError;

/// Pixel scaling applied after dividing 8-bit values by 255
///
/// `out = (v / 255 - center) * multiplier`. The default maps `[0, 255]`
/// onto `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelScaling {
    /// Subtracted from the unit-range value
    pub center: f32,
    /// Applied after centering
    pub multiplier: f32,
}

impl Default for ChannelScaling {
    fn default() -> Self {
        Self { center: 0.5, multiplier: 2.0 }
    }
}

impl ChannelScaling {
    /// Scale one 8-bit channel value
    #[inline]
    pub fn apply(&self, value: u8) -> f32 {
        ((value as f32 / 255.0) - self.center) * self.multiplier
    }

    /// Output range for inputs 0 and 255, as (low, high)
    pub fn range(&self) -> (f32, f32) {
        let a = self.apply(0);
        let b = self.apply(255);
        if a <= b { (a, b) } else { (b, a) }
    }
}

/// Standardization constants and optional input limits for one feature
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureSpec {
    /// Training-set mean
    pub mean: f32,
    /// Training-set scale (standard deviation)
    pub scale: f32,
    /// Lowest accepted raw value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f32>,
    /// Highest accepted raw value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f32>,
}

impl FeatureSpec {
    /// Configured limits, `None` when the profile sets neither
    fn limits(&self) -> Option<(f32, f32)> {
        if self.min.is_none() && self.max.is_none() {
            return None;
        }
        Some((self.min.unwrap_or(f32::MIN), self.max.unwrap_or(f32::MAX)))
    }
}

/// Per-feature specs in model input order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetadataSpec {
    /// Air temperature (°C)
    pub temperature: FeatureSpec,
    /// Relative humidity (%)
    pub humidity: FeatureSpec,
    /// Plant age (days)
    pub age: FeatureSpec,
}

impl MetadataSpec {
    /// Spec for one field
    pub fn get(&self, field: MetadataField) -> &FeatureSpec {
        match field {
            MetadataField::Temperature => &self.temperature,
            MetadataField::Humidity => &self.humidity,
            MetadataField::Age => &self.age,
        }
    }
}

fn default_version() -> String {
    "v1".to_string()
}

fn default_input_size() -> u32 {
    agroguard_core::constants::IMAGE_SIZE as u32
}

/// Description of one exported model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelProfile {
    /// Base name shared by all versions
    pub name: String,

    /// Version tag, `v<N>`
    #[serde(default = "default_version")]
    pub version: String,

    /// Free-form description
    #[serde(default)]
    pub description: String,

    /// File name of the model asset
    pub model_asset: String,

    /// Square input side in pixels
    #[serde(default = "default_input_size")]
    pub input_size: u32,

    /// Pixel scaling applied by the encoder
    #[serde(default)]
    pub channel_scaling: ChannelScaling,

    /// Metadata standardization and limits
    pub metadata: MetadataSpec,

    /// Class labels in model output order
    pub classes: Vec<String>,
}

impl ModelProfile {
    /// Parse and check a profile from JSON text
    pub fn from_json(json: &str) -> Result<Self, ProfileError> {
        let profile: ModelProfile =
            serde_json::from_str(json).map_err(|e| ProfileError::Parse(e.to_string()))?;
        profile.check()?;
        Ok(profile)
    }

    /// Read a profile from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ProfileError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| ProfileError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    /// Serialize as pretty JSON
    pub fn to_json(&self) -> Result<String, ProfileError> {
        serde_json::to_string_pretty(self).map_err(|e| ProfileError::Parse(e.to_string()))
    }

    /// Registry key, `<name>_<version>`
    pub fn qualified_name(&self) -> String {
        format!("{}_{}", self.name, self.version)
    }

    /// Normalizer built from the metadata constants
    pub fn normalizer(&self) -> Result<MetadataNormalizer, ProfileError> {
        let spec = &self.metadata;
        MetadataNormalizer::new(
            [spec.temperature.mean, spec.humidity.mean, spec.age.mean],
            [spec.temperature.scale, spec.humidity.scale, spec.age.scale],
        )
        .map_err(|e| self.invalid(e.to_string()))
    }

    /// Validator built from the metadata limits
    ///
    /// A field without limits accepts any finite reading. A field with only
    /// one limit falls back to the widest physically meaningful range on
    /// the other side.
    pub fn validator(&self) -> MetadataValidator {
        let spec = &self.metadata;
        let temperature = match spec.temperature.limits() {
            Some((min, max)) => TemperatureValidator::new_with_limits(min, max),
            None => TemperatureValidator::unbounded(),
        };
        let humidity = match spec.humidity.limits() {
            Some((min, max)) => HumidityValidator::new_with_limits(min, max),
            None => HumidityValidator::unbounded(),
        };
        let age = match spec.age.limits() {
            Some((min, max)) => AgeValidator::new_with_limits(min, max),
            None => AgeValidator::unbounded(),
        };

        MetadataValidator::new(temperature, humidity, age)
    }

    /// Class table in model output order
    pub fn class_table(&self) -> Result<ClassTable, ProfileError> {
        ClassTable::from_labels(self.classes.as_slice()).map_err(|e| self.invalid(e.to_string()))
    }

    /// Check internal consistency
    pub fn check(&self) -> Result<(), ProfileError> {
        if self.name.is_empty() {
            return Err(self.invalid("name is empty"));
        }
        if parse_version(&self.version).is_none() {
            return Err(self.invalid(format!("version '{}' is not v<N>", self.version)));
        }
        if self.model_asset.is_empty() {
            return Err(self.invalid("model_asset is empty"));
        }
        if self.input_size == 0 {
            return Err(self.invalid("input_size must be positive"));
        }
        let scaling = self.channel_scaling;
        if !(scaling.center.is_finite() && scaling.multiplier.is_finite()) || scaling.multiplier == 0.0 {
            return Err(self.invalid("channel_scaling must be finite with a non-zero multiplier"));
        }
        for field in MetadataField::ALL {
            let spec = self.metadata.get(field);
            if let (Some(min), Some(max)) = (spec.min, spec.max) {
                if min > max {
                    return Err(self.invalid(format!("{} min {} exceeds max {}", field, min, max)));
                }
            }
        }
        self.normalizer()?;
        self.class_table()?;
        Ok(())
    }

    fn invalid(&self, reason: impl Into<String>) -> ProfileError {
        ProfileError::Invalid {
            profile: self.qualified_name(),
            reason: reason.into(),
        }
    }
}

/// Numeric part of a `v<N>` version tag
pub fn parse_version(version: &str) -> Option<u32> {
    version.strip_prefix('v')?.parse().ok()
}
