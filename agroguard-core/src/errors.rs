//! Error Types for the Numeric Core
//!
//! ## Design Philosophy
//!
//! Core errors are built for the same places the core itself runs, including
//! microcontrollers without an allocator:
//!
//! 1. **Small Size**: every variant is a handful of scalars.
//! 2. **No Heap Allocation**: no `String`; field names are enums.
//! 3. **Copy Semantics**: errors are returned by value from hot paths.
//!
//! ## Error Categories
//!
//! ### Input Violations
//! - `ValidationError::OutOfRange`: a reading outside its field limits (humidity 880%)
//! - `ValidationError::InvalidValue`: NaN or infinity
//!
//! ### Reduction Failures
//! - `ReductionError::EmptyConfidences`: arg-max over nothing is undefined
//!
//! ### Configuration Failures
//! - `ClassTableError`: a label table that cannot be stored
//! - `NormalizerError`: a zero, negative or non-finite scale
//!
//! ## Error Handling Strategy
//!
//! ```rust
//! use agroguard_core::{MetadataValidator, RawMetadata, ValidationError};
//!
//! let validator = MetadataValidator::default();
//! match validator.validate(&RawMetadata::new(26.0, 880.0, 35.0)) {
//!     Ok(()) => {}
//!     Err(ValidationError::OutOfRange { field, .. }) => {
//!         // Ask the grower to re-enter this field
//!         let _ = field;
//!     }
//!     Err(ValidationError::InvalidValue { .. }) => {
//!         // Sensor returned garbage
//!     }
//! }
//! ```

use thiserror_no_std::Error;

use crate::metadata::MetadataField;

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Raw reading validation errors
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ValidationError {
    /// Value outside accepted field limits
    #[error("{field} value {value} outside range [{min}, {max}]")]
    OutOfRange {
        /// Which reading failed
        field: MetadataField,
        /// The rejected value
        value: f32,
        /// Lower bound (inclusive)
        min: f32,
        /// Upper bound (inclusive)
        max: f32,
    },

    /// Value is NaN or infinite
    #[error("{field} value is not a finite number")]
    InvalidValue {
        /// Which reading failed
        field: MetadataField,
    },
}

impl ValidationError {
    /// Field the error refers to
    pub fn field(&self) -> MetadataField {
        match self {
            Self::OutOfRange { field, .. } | Self::InvalidValue { field } => *field,
        }
    }
}

/// Errors reducing a confidence vector
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReductionError {
    /// The model returned no scores
    #[error("confidence vector is empty")]
    EmptyConfidences,

    /// More scores than a result can hold
    #[error("confidence vector has {len} entries, capacity is {capacity}")]
    TooManyConfidences {
        /// Length of the offending vector
        len: usize,
        /// Maximum supported length
        capacity: usize,
    },
}

/// Errors building a class table
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassTableError {
    /// Table must hold at least one label
    #[error("class table is empty")]
    Empty,

    /// Table exceeds fixed capacity
    #[error("class table has {count} labels, capacity is {capacity}")]
    TooManyClasses {
        /// Number of labels offered
        count: usize,
        /// Maximum supported
        capacity: usize,
    },

    /// A label exceeds the fixed label length
    #[error("label at index {index} is longer than {max_len} bytes")]
    LabelTooLong {
        /// Position of the label
        index: usize,
        /// Maximum label length
        max_len: usize,
    },
}

/// Errors configuring a metadata normalizer
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum NormalizerError {
    /// Scale must be finite and strictly positive
    #[error("{field} scale {scale} must be finite and > 0")]
    InvalidScale {
        /// Feature with the bad scale
        field: MetadataField,
        /// The rejected scale
        scale: f32,
    },

    /// Mean must be finite
    #[error("{field} mean {mean} must be finite")]
    InvalidMean {
        /// Feature with the bad mean
        field: MetadataField,
        /// The rejected mean
        mean: f32,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for ValidationError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::OutOfRange { field, value, min, max } =>
                defmt::write!(fmt, "{} {} outside [{}, {}]", field.name(), value, min, max),
            Self::InvalidValue { field } =>
                defmt::write!(fmt, "{} not finite", field.name()),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ReductionError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::EmptyConfidences => defmt::write!(fmt, "Empty confidences"),
            Self::TooManyConfidences { len, capacity } =>
                defmt::write!(fmt, "{} confidences, capacity {}", len, capacity),
        }
    }
}
