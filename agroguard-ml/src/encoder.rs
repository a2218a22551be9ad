//! Image Tensor Encoding
//!
//! ## Overview
//!
//! Turns a decoded photo of any size into the fixed-shape tensor the model
//! was trained on:
//!
//! ```text
//! any image --canonicalize--> RGBA8 --resize--> size x size --drop alpha,
//! scale--> [1, size, size, 3] f32
//! ```
//!
//! ## Steps
//!
//! 1. **Canonicalize**: borrow the pixels if they already are RGBA8,
//!    otherwise convert a copy. The caller's image is never modified.
//! 2. **Resize**: one pass with the configured filter, skipped when the image
//!    already has the target size. The default filter is `Triangle`.
//! 3. **Extract**: walk pixels row by row, left to right, keep R, G, B.
//! 4. **Scale**: `out = (v / 255 - center) * multiplier`, by default
//!    `((v / 255) - 0.5) * 2.0`, giving `[-1, 1]`.
//!
//! ## Channel Scaling
//!
//! ```text
//! v = 0    -> -1.0
//! v = 128  ->  0.00392
//! v = 255  ->  1.0
//! ```
//!
//! The constants belong to the trained model. A model trained with a
//! different convention needs a different [`ChannelScaling`].

use std::borrow::Cow;
use std::path::Path;

use agroguard_core::constants::{IMAGE_CHANNELS, IMAGE_SIZE};
use agroguard_profiles::{ChannelScaling, ModelProfile};
use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, RgbaImage};
use log::trace;
use serde::{Deserialize, Serialize};

use crate::errors::ComputationError;
use crate::tensor::ImageTensor;

/// Resampling filter for the single resize pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeFilter {
    /// Nearest neighbor, no interpolation
    Nearest,
    /// Bilinear
    #[default]
    Triangle,
    /// Bicubic
    CatmullRom,
    /// Windowed sinc
    Lanczos3,
}

impl From<ResizeFilter> for FilterType {
    fn from(filter: ResizeFilter) -> Self {
        match filter {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Triangle => FilterType::Triangle,
            ResizeFilter::CatmullRom => FilterType::CatmullRom,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Encoder configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EncoderConfig {
    /// Square output side in pixels
    pub input_size: u32,
    /// Resize filter
    pub filter: ResizeFilter,
    /// Channel value scaling
    pub scaling: ChannelScaling,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            input_size: IMAGE_SIZE as u32,
            filter: ResizeFilter::default(),
            scaling: ChannelScaling::default(),
        }
    }
}

impl EncoderConfig {
    /// Input geometry and scaling from a model profile
    pub fn from_profile(profile: &ModelProfile) -> Self {
        Self {
            input_size: profile.input_size,
            filter: ResizeFilter::default(),
            scaling: profile.channel_scaling,
        }
    }

    pub fn with_filter(mut self, filter: ResizeFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_input_size(mut self, input_size: u32) -> Self {
        self.input_size = input_size;
        self
    }

    pub fn with_scaling(mut self, scaling: ChannelScaling) -> Self {
        self.scaling = scaling;
        self
    }
}

/// Converts images into model input tensors
#[derive(Debug, Clone, Default)]
pub struct ImageTensorEncoder {
    config: EncoderConfig,
}

impl ImageTensorEncoder {
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Encode a decoded image
    pub fn encode(&self, image: &DynamicImage) -> Result<ImageTensor, ComputationError> {
        let size = self.config.input_size;
        if size == 0 {
            return Err(ComputationError::ZeroInputSize);
        }
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(ComputationError::EmptyImage { width, height });
        }

        let rgba = canonical_rgba(image);
        let resized = self.resize(rgba);
        trace!("encoding {}x{} image at {}x{}", width, height, size, size);

        let scaling = self.config.scaling;
        let mut data = Vec::with_capacity((size as usize) * (size as usize) * IMAGE_CHANNELS);
        for pixel in resized.pixels() {
            let [r, g, b, _alpha] = pixel.0;
            data.push(scaling.apply(r));
            data.push(scaling.apply(g));
            data.push(scaling.apply(b));
        }

        ImageTensor::from_vec(size, data).ok_or(ComputationError::EmptyImage { width, height })
    }

    /// Decode an in-memory PNG or JPEG, then encode it
    pub fn encode_bytes(&self, bytes: &[u8]) -> Result<ImageTensor, ComputationError> {
        let image = image::load_from_memory(bytes)?;
        self.encode(&image)
    }

    /// Read and decode an image file, then encode it
    pub fn encode_path(&self, path: impl AsRef<Path>) -> Result<ImageTensor, ComputationError> {
        let image = image::open(path)?;
        self.encode(&image)
    }

    fn resize<'a>(&self, rgba: Cow<'a, RgbaImage>) -> Cow<'a, RgbaImage> {
        let size = self.config.input_size;
        if rgba.dimensions() == (size, size) {
            return rgba;
        }
        Cow::Owned(imageops::resize(rgba.as_ref(), size, size, self.config.filter.into()))
    }
}

fn canonical_rgba(image: &DynamicImage) -> Cow<'_, RgbaImage> {
    match image {
        DynamicImage::ImageRgba8(buffer) => Cow::Borrowed(buffer),
        other => Cow::Owned(other.to_rgba8()),
    }
}
