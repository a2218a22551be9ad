//! Constants for AgroGuard Core
//!
//! Centralized values shared by the normalizer, validators, encoder and
//! reducer. Each constant documents where it comes from: either the training
//! pipeline of the reference model or the field limits of the data-collection
//! app.
//!
//! ## Organization
//!
//! - **Metadata**: per-feature standardization constants fitted on the training set
//! - **Fields**: plausible ranges for raw environmental readings
//! - **Classes**: the label table in model output order
//! - **Tensors**: input/output tensor shapes the model was exported with
//!
//! ## Usage Guidelines
//!
//! 1. These are defaults; pipelines receive them through injected config
//! 2. Never reorder the class table without retraining the model
//! 3. Keep literals at full precision so results match the training pipeline bit-for-bit

/// Standardization constants for the metadata branch of the model.
pub mod metadata;

/// Plausible ranges for raw environmental readings.
pub mod fields;

/// Class label table in model output order.
pub mod classes;

/// Tensor shapes of the exported model.
pub mod tensors;

pub use metadata::{METADATA_FEATURES, METADATA_MEANS, METADATA_SCALES};

pub use fields::{
    AGE_MAX_DAYS, AGE_MIN_DAYS, HUMIDITY_MAX_PCT, HUMIDITY_MIN_PCT, TEMPERATURE_MAX_C,
    TEMPERATURE_MIN_C,
};

pub use classes::{CLASS_NAMES, MAX_CLASSES, MAX_LABEL_LEN, NUM_CLASSES, UNKNOWN_CLASS};

pub use tensors::{
    IMAGE_CHANNELS, IMAGE_INPUT_SHAPE, IMAGE_SIZE, IMAGE_TENSOR_LEN, METADATA_INPUT_SHAPE,
    OUTPUT_SHAPE,
};
