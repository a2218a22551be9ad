//! Error taxonomy at the orchestrator boundary
//!
//! Two kinds of failure reach the user, and they read differently:
//!
//! - [`ResourceError`]: the model could not be loaded (missing asset, storage
//!   or network I/O). Shown as a network/resource problem.
//! - [`ComputationError`]: anything else while preparing inputs, running the
//!   model or reducing its output. Shown as a generic failure.
//!
//! [`ClassifyError`] wraps both and remembers the [`Stage`] a computation
//! failure was raised in.

use std::fmt;
use std::io;
use std::path::PathBuf;

use agroguard_core::{ReductionError, ValidationError};
use thiserror::Error;

use crate::pipeline::Stage;

/// The model resource could not be acquired
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("model asset not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("failed to read model asset {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to load model: {0}")]
    Load(String),
}

/// Any failure other than acquiring the model
#[derive(Debug, Error)]
pub enum ComputationError {
    #[error("invalid metadata: {0}")]
    InvalidMetadata(#[from] ValidationError),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    #[error("encoder target size is zero")]
    ZeroInputSize,

    #[error("model invocation failed: {0}")]
    Model(String),

    #[error("model returned no scores")]
    EmptyOutput,

    #[error("model returned {len} scores, at most {capacity} supported")]
    TooManyScores { len: usize, capacity: usize },

    #[error("background task failed: {0}")]
    TaskFailed(String),
}

impl From<ReductionError> for ComputationError {
    fn from(err: ReductionError) -> Self {
        match err {
            ReductionError::EmptyConfidences => Self::EmptyOutput,
            ReductionError::TooManyConfidences { len, capacity } => {
                Self::TooManyScores { len, capacity }
            }
        }
    }
}

/// Coarse error class, for choosing the user-facing notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Resource,
    Computation,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resource => f.write_str("resource"),
            Self::Computation => f.write_str("computation"),
        }
    }
}

/// Failure of one classification request
///
/// Terminal for that request only; the pipeline stays usable.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("resource error: {0}")]
    Resource(#[from] ResourceError),

    #[error("computation failed while {stage}: {source}")]
    Computation {
        stage: Stage,
        #[source]
        source: ComputationError,
    },
}

impl ClassifyError {
    pub(crate) fn computation(stage: Stage, source: impl Into<ComputationError>) -> Self {
        Self::Computation {
            stage,
            source: source.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Resource(_) => ErrorKind::Resource,
            Self::Computation { .. } => ErrorKind::Computation,
        }
    }

    /// Stage the request was in when it failed
    pub fn stage(&self) -> Stage {
        match self {
            Self::Resource(_) => Stage::ModelLoaded,
            Self::Computation { stage, .. } => *stage,
        }
    }

    /// Short notice suitable for a toast or status line
    pub fn user_message(&self) -> String {
        match self {
            Self::Resource(err) => format!("Network error: {}", err),
            Self::Computation { .. } => "Classification failed".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agroguard_core::MetadataField;

    #[test]
    fn resource_errors_read_as_network_errors() {
        let err = ClassifyError::from(ResourceError::Missing(PathBuf::from("model.tflite")));
        assert_eq!(err.kind(), ErrorKind::Resource);
        assert_eq!(err.stage(), Stage::ModelLoaded);
        assert_eq!(err.user_message(), "Network error: model asset not found: model.tflite");
    }

    #[test]
    fn computation_errors_are_generic_to_the_user() {
        let err = ClassifyError::computation(
            Stage::Preparing,
            ValidationError::InvalidValue { field: MetadataField::Age },
        );
        assert_eq!(err.kind(), ErrorKind::Computation);
        assert_eq!(err.stage(), Stage::Preparing);
        assert_eq!(err.user_message(), "Classification failed");
        assert!(err.to_string().contains("age value is not a finite number"));
    }

    #[test]
    fn reduction_errors_map_to_output_errors() {
        assert!(matches!(
            ComputationError::from(ReductionError::EmptyConfidences),
            ComputationError::EmptyOutput
        ));
        assert!(matches!(
            ComputationError::from(ReductionError::TooManyConfidences { len: 40, capacity: 32 }),
            ComputationError::TooManyScores { len: 40, capacity: 32 }
        ));
    }
}
