//! Numeric core for AgroGuard
//!
//! Handles the deterministic parts of multimodal crop classification:
//! standardizing environmental readings, validating them against field
//! limits, and reducing a model's confidence vector to a ranked result.
//! The model itself and the image pipeline live in `agroguard-ml`.
//!
//! Key constraints:
//! - `no_std` capable (the reduction runs on microcontrollers too)
//! - No heap allocation: labels and vectors use fixed-capacity storage
//! - Pure functions; configuration is injected, never global mutable state
//!
//! ```rust
//! use agroguard_core::{ClassTable, MetadataNormalizer, reduce};
//!
//! let normalizer = MetadataNormalizer::default();
//! let features = normalizer.normalize(26.0, 88.0, 35.0);
//! assert_eq!(features.len(), 3);
//!
//! let scores = [0.1, 0.05, 0.05, 0.6, 0.05, 0.05, 0.05, 0.05];
//! let result = reduce(&scores, &ClassTable::default()).unwrap();
//! assert_eq!(result.class_name(), "Downy Mildew");
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod macros;

pub mod advice;
pub mod classes;
pub mod constants;
pub mod errors;
pub mod metadata;
pub mod reduction;
pub mod traits;
pub mod validators;

// Public API
pub use classes::ClassTable;
pub use errors::{
    ClassTableError, NormalizerError, ReductionError, ValidationError, ValidationResult,
};
pub use metadata::{MetadataField, MetadataNormalizer, NormalizedMetadata, RawMetadata};
pub use reduction::{arg_max, reduce, ClassificationResult, ConfidenceVector, RankedClass, Summary};
pub use traits::{Validatable, Validator};
pub use validators::{AgeValidator, HumidityValidator, MetadataValidator, TemperatureValidator};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
