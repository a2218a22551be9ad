//! Model Profiles for AgroGuard
//!
//! ## Overview
//!
//! A trained model is only usable together with the numbers it was trained
//! with: the metadata means and scales, the class label order, the input
//! side length and the pixel scaling. This crate keeps those numbers as data
//! next to the model asset instead of as constants in code.
//!
//! ## Profile Format
//!
//! ```json
//! {
//!   "name": "cucumber_multimodal",
//!   "version": "v1",
//!   "model_asset": "cucumber_multimodal.tflite",
//!   "input_size": 224,
//!   "channel_scaling": { "center": 0.5, "multiplier": 2.0 },
//!   "metadata": {
//!     "temperature": { "mean": 23.196046875, "scale": 4.951200769540933 },
//!     "humidity": { "mean": 85.624296875, "scale": 12.193795501170472 },
//!     "age": { "mean": 28.16296875, "scale": 16.566792008005756 }
//!   },
//!   "classes": ["Anthracnose", "Bacterial Wilt", "..."]
//! }
//! ```
//!
//! `version`, `input_size` and `channel_scaling` have defaults; `min` and
//! `max` are optional per feature.
//!
//! ## Versioning
//!
//! 1. **Never edit in place**: a retrained model gets a new `v<N>`
//! 2. **Latest wins**: `get_latest` picks the highest numeric version
//! 3. **Deprecate, don't delete**: old profiles stay loadable for old assets
//!
//! ## Usage Example
//!
//! ```rust
//! use agroguard_profiles::GLOBAL_REGISTRY;
//!
//! let profile = GLOBAL_REGISTRY.get_latest("cucumber_multimodal")?;
//! let normalizer = profile.normalizer()?;
//! let classes = profile.class_table()?;
//!
//! let features = normalizer.normalize(26.0, 88.0, 35.0);
//! assert_eq!(features.len(), 3);
//! assert_eq!(classes.name(3), "Downy Mildew");
//! # Ok::<(), agroguard_profiles::ProfileError>(())
//! ```

pub mod profile;
pub mod registry;

pub use profile::{ChannelScaling, FeatureSpec, MetadataSpec, ModelProfile};
pub use registry::{ProfileMetadata, ProfileRegistry, GLOBAL_REGISTRY};

/// Profile-related errors
#[derive(Debug, thiserror_no_std::Error)]
pub enum ProfileError {
    #[error("Failed to parse profile: {0}")]
    Parse(String),

    #[error("Failed to read profile: {0}")]
    Io(String),

    #[error("Profile not found: {0}")]
    NotFound(String),

    #[error("Profile {profile} is invalid: {reason}")]
    Invalid { profile: String, reason: String },

    #[error("Profile {0} already registered")]
    Duplicate(String),

    #[error("Profile registry lock poisoned")]
    Poisoned,
}
