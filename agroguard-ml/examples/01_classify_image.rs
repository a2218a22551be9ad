//! AgroGuard Classification Example
//!
//! Classifies one leaf photo with the bundled cucumber profile. The trained
//! network is replaced by a fixed-output stand-in so the example runs
//! without model weights; swap the `FnLoader` for an `AssetLoader` wrapping
//! a real interpreter to classify for real.
//!
//! ## Usage
//!
//! ```text
//! cargo run -p agroguard-ml --example 01_classify_image -- leaf.jpg 26.0 88.0 35
//! ```
//!
//! Without arguments a synthetic green photo is used.

use std::env;

use agroguard_core::NormalizedMetadata;
use agroguard_ml::{
    ComputationError, FnLoader, FnModel, ImageTensor, InferencePipeline,
    PipelineConfig, GLOBAL_REGISTRY,
};
use image::{DynamicImage, Rgb, RgbImage};

/// Stand-in network: leans towards Downy Mildew when it is humid
fn stand_in(metadata: &NormalizedMetadata, image: &ImageTensor) -> Result<Vec<f32>, ComputationError> {
    let humid = metadata.as_array()[1].max(0.0);
    let green = image
        .as_slice()
        .chunks_exact(3)
        .map(|px| px[1] - (px[0] + px[2]) / 2.0)
        .sum::<f32>()
        / (image.len() / 3) as f32;

    let mut scores = vec![0.05; 8];
    scores[3] += humid;
    scores[5] += green.max(0.0);
    let total: f32 = scores.iter().sum();
    Ok(scores.into_iter().map(|s| s / total).collect())
}

fn synthetic_leaf() -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(480, 360, |x, y| {
        let shade = ((x + y) % 40) as u8;
        Rgb([40 + shade, 150 + shade, 50])
    }))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== AgroGuard Classification Example ===\n");

    let args: Vec<String> = env::args().skip(1).collect();
    let photo = match args.first() {
        Some(path) => image::open(path)?,
        None => synthetic_leaf(),
    };
    let reading = |i: usize, default: f32| -> Result<f32, std::num::ParseFloatError> {
        args.get(i).map_or(Ok(default), |s| s.parse())
    };
    let (temperature, humidity, age) = (reading(1, 26.0)?, reading(2, 88.0)?, reading(3, 35.0)?);

    let profile = GLOBAL_REGISTRY.get_latest("cucumber_multimodal")?;
    println!("Profile: {} ({})", profile.qualified_name(), profile.description);
    println!("Readings: {temperature} C, {humidity} %, {age} days\n");

    let loader = FnLoader::new(|| Ok(FnModel::new(stand_in)));
    let pipeline = InferencePipeline::builder(loader)
        .config(PipelineConfig::from_profile(&profile)?)
        .on_stage(|stage| println!("  -> {stage}"))
        .build();

    let result = pipeline.classify_blocking(&photo, temperature, humidity, age)?;

    println!("\n{}", result.summary());
    Ok(())
}
