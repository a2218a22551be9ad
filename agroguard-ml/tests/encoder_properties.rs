//! Property tests for image encoding
//!
//! Whatever the source size or pixel content, the tensor has the model's
//! input shape and every value stays inside the scaled channel range.

use agroguard_core::constants::{IMAGE_INPUT_SHAPE, IMAGE_TENSOR_LEN};
use agroguard_ml::{EncoderConfig, ImageTensorEncoder, ResizeFilter};
use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};
use proptest::prelude::*;

fn photo(width: u32, height: u32, pixels: &[u8]) -> DynamicImage {
    let mut buffer = RgbImage::new(width, height);
    for (i, pixel) in buffer.pixels_mut().enumerate() {
        let base = (i * 3) % pixels.len();
        *pixel = Rgb([
            pixels[base],
            pixels[(base + 1) % pixels.len()],
            pixels[(base + 2) % pixels.len()],
        ]);
    }
    DynamicImage::ImageRgb8(buffer)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn tensor_shape_is_fixed(
        width in 1u32..400,
        height in 1u32..400,
        pixels in prop::collection::vec(any::<u8>(), 3..64),
    ) {
        let tensor = ImageTensorEncoder::default().encode(&photo(width, height, &pixels)).unwrap();
        prop_assert_eq!(tensor.len(), IMAGE_TENSOR_LEN);
        prop_assert_eq!(tensor.shape(), IMAGE_INPUT_SHAPE);
    }

    #[test]
    fn values_stay_in_unit_range(
        width in 1u32..300,
        height in 1u32..300,
        pixels in prop::collection::vec(any::<u8>(), 3..64),
    ) {
        let tensor = ImageTensorEncoder::default().encode(&photo(width, height, &pixels)).unwrap();
        for &v in tensor.as_slice() {
            prop_assert!((-1.0..=1.0).contains(&v), "value {} out of range", v);
        }
    }

    #[test]
    fn uniform_color_survives_resize(
        width in 1u32..200,
        height in 1u32..200,
        r in any::<u8>(),
        g in any::<u8>(),
        b in any::<u8>(),
    ) {
        let encoder = ImageTensorEncoder::new(
            EncoderConfig::default().with_filter(ResizeFilter::Nearest),
        );
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([r, g, b])));
        let tensor = encoder.encode(&image).unwrap();

        let scaling = encoder.config().scaling;
        let expected = [scaling.apply(r), scaling.apply(g), scaling.apply(b)];
        for chunk in tensor.as_slice().chunks_exact(3) {
            prop_assert_eq!(chunk, &expected[..]);
        }
    }

    #[test]
    fn alpha_is_ignored(alpha in any::<u8>(), v in any::<u8>()) {
        let encoder = ImageTensorEncoder::new(
            EncoderConfig::default().with_input_size(4),
        );
        let opaque = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([v, v, v, 255])));
        let faded = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([v, v, v, alpha])));
        prop_assert_eq!(encoder.encode(&opaque).unwrap(), encoder.encode(&faded).unwrap());
    }
}
