//! Tensor Shapes of the Exported Model
//!
//! The model rejects (or silently misreads) anything that does not match
//! these shapes. All tensors are float32, batch size 1, channels-last.
//!
//! ```text
//! input 0: metadata  [1, 3]
//! input 1: image     [1, 224, 224, 3]   (row, column, R/G/B)
//! output:  scores    [1, 8]
//! ```

use super::{classes::NUM_CLASSES, metadata::METADATA_FEATURES};

/// Side length of the square image input (pixels).
pub const IMAGE_SIZE: usize = 224;

/// Colour channels per pixel (R, G, B; alpha is dropped).
pub const IMAGE_CHANNELS: usize = 3;

/// Number of floats in one encoded image.
pub const IMAGE_TENSOR_LEN: usize = IMAGE_SIZE * IMAGE_SIZE * IMAGE_CHANNELS;

/// Shape of the metadata input tensor.
pub const METADATA_INPUT_SHAPE: [usize; 2] = [1, METADATA_FEATURES];

/// Shape of the image input tensor.
pub const IMAGE_INPUT_SHAPE: [usize; 4] = [1, IMAGE_SIZE, IMAGE_SIZE, IMAGE_CHANNELS];

/// Shape of the output tensor.
pub const OUTPUT_SHAPE: [usize; 2] = [1, NUM_CLASSES];
