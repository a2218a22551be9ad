//! Image tensor produced by the encoder
//!
//! Layout is NHWC with a batch of one: `[1, size, size, 3]`, flattened
//! row-major over (row, column, channel) with channels in R, G, B order.

use agroguard_core::constants::IMAGE_CHANNELS;

/// Fixed-shape float32 image input for the model
#[derive(Debug, Clone, PartialEq)]
pub struct ImageTensor {
    data: Vec<f32>,
    size: u32,
}

impl ImageTensor {
    /// Wrap encoded values; `None` unless `data.len() == size * size * 3`
    pub fn from_vec(size: u32, data: Vec<f32>) -> Option<Self> {
        let expected = (size as usize) * (size as usize) * IMAGE_CHANNELS;
        (data.len() == expected).then_some(Self { data, size })
    }

    /// Side length in pixels
    pub fn size(&self) -> u32 {
        self.size
    }

    /// `[1, size, size, 3]`
    pub fn shape(&self) -> [usize; 4] {
        let side = self.size as usize;
        [1, side, side, IMAGE_CHANNELS]
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    /// RGB values of one pixel, or `None` outside the image
    pub fn pixel(&self, row: u32, col: u32) -> Option<[f32; 3]> {
        if row >= self.size || col >= self.size {
            return None;
        }
        let start = ((row as usize) * (self.size as usize) + col as usize) * IMAGE_CHANNELS;
        let rgb = &self.data[start..start + IMAGE_CHANNELS];
        Some([rgb[0], rgb[1], rgb[2]])
    }

    /// Smallest and largest value
    pub fn value_range(&self) -> Option<(f32, f32)> {
        let mut iter = self.data.iter().copied();
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }

    /// Contiguous native-endian float32 buffer
    pub fn to_ne_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len() * 4);
        for value in &self.data {
            out.extend_from_slice(&value.to_ne_bytes());
        }
        out
    }
}
