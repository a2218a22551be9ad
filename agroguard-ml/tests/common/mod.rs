//! Common test utilities for pipeline integration tests
//!
//! Provides:
//! - Synthetic photos with a fixed seed
//! - A stub model loader that counts loads and closes
//! - Canned model outputs

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use agroguard_core::NormalizedMetadata;
use agroguard_ml::{
    ComputationError, ImageTensor, InferenceModel, ModelLoader, ResourceError,
};
use image::{DynamicImage, Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Scores whose first maximum is "Downy Mildew"
pub const DOWNY_MILDEW: [f32; 8] = [0.1, 0.05, 0.05, 0.6, 0.05, 0.05, 0.05, 0.05];

/// Random RGB photo of the given size
pub fn random_photo(width: u32, height: u32, seed: u64) -> DynamicImage {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut buffer = RgbImage::new(width, height);
    for pixel in buffer.pixels_mut() {
        *pixel = Rgb([rng.gen(), rng.gen(), rng.gen()]);
    }
    DynamicImage::ImageRgb8(buffer)
}

/// What the stub does when asked for a model
#[derive(Debug, Clone)]
pub enum Behavior {
    /// Load fine, return these scores
    Scores(Vec<f32>),
    /// Fail to load
    LoadFails,
    /// Load fine, fail during inference
    InferFails,
    /// Load fine, panic during inference
    InferPanics,
}

/// Counters shared between a loader and the test
#[derive(Debug, Default)]
pub struct Counters {
    pub loads: AtomicUsize,
    pub closes: AtomicUsize,
    pub inferences: AtomicUsize,
    /// Metadata seen by the model, per call
    pub seen_metadata: Mutex<Vec<[f32; 3]>>,
    /// Image tensor length seen by the model, per call
    pub seen_tensor_len: Mutex<Vec<usize>>,
}

impl Counters {
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    pub fn inferences(&self) -> usize {
        self.inferences.load(Ordering::SeqCst)
    }
}

pub struct StubModel {
    behavior: Behavior,
    counters: Arc<Counters>,
}

impl InferenceModel for StubModel {
    fn infer(
        &mut self,
        metadata: &NormalizedMetadata,
        image: &ImageTensor,
    ) -> Result<Vec<f32>, ComputationError> {
        self.counters.inferences.fetch_add(1, Ordering::SeqCst);
        self.counters.seen_metadata.lock().unwrap().push(*metadata.as_array());
        self.counters.seen_tensor_len.lock().unwrap().push(image.len());

        match &self.behavior {
            Behavior::Scores(scores) => Ok(scores.clone()),
            Behavior::InferFails => Err(ComputationError::Model("interpreter crashed".to_string())),
            Behavior::InferPanics => panic!("interpreter aborted"),
            Behavior::LoadFails => unreachable!("model never loads"),
        }
    }

    fn close(&mut self) {
        self.counters.closes.fetch_add(1, Ordering::SeqCst);
    }
}

/// Loader whose models report to shared counters
pub struct StubLoader {
    behavior: Behavior,
    pub counters: Arc<Counters>,
}

impl StubLoader {
    pub fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            counters: Arc::new(Counters::default()),
        }
    }

    pub fn scores(scores: &[f32]) -> Self {
        Self::new(Behavior::Scores(scores.to_vec()))
    }
}

impl ModelLoader for StubLoader {
    type Model = StubModel;

    fn load(&self) -> Result<StubModel, ResourceError> {
        if let Behavior::LoadFails = self.behavior {
            return Err(ResourceError::Load("storage unavailable".to_string()));
        }
        self.counters.loads.fetch_add(1, Ordering::SeqCst);
        Ok(StubModel {
            behavior: self.behavior.clone(),
            counters: Arc::clone(&self.counters),
        })
    }
}
