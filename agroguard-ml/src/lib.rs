//! Multimodal Crop Classification on Edge Devices
//!
//! ## Overview
//!
//! This crate turns a photo plus three environmental readings into a
//! disease classification, using a pre-trained model as a black box:
//!
//! ```text
//! photo ----------> ImageTensorEncoder ---> [1,224,224,3] --+
//!                                                           +--> model --> [1,8] --> reduce --> ClassificationResult
//! t, h, age ------> MetadataNormalizer ---> [1,3] ----------+
//! ```
//!
//! The numeric pieces (normalizer, validators, arg-max reduction) live in
//! `agroguard-core` and run without `std`. This crate adds what needs an
//! operating system: image decoding and resampling, model loading, threads
//! and Tokio.
//!
//! ## Model Lifecycle
//!
//! Every request loads the model, runs it once and closes it again. The
//! model is owned by a [`ModelSession`] whose `Drop` closes it, so a failed
//! inference never leaks the handle:
//!
//! ```text
//! Preparing ──> ModelLoaded ──> Inferring ──> Reducing ──> Done
//!                  │ load()        │ infer()
//!                  └──── session dropped, close() ────┘
//! ```
//!
//! ## Errors
//!
//! | Kind | Raised by | User sees |
//! |------|-----------|-----------|
//! | [`ResourceError`] | model loading | "Network error: ..." |
//! | [`ComputationError`] | everything else | "Classification failed" |
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use agroguard_ml::{ComputationError, FnLoader, FnModel, InferencePipeline};
//! use agroguard_core::NormalizedMetadata;
//! use agroguard_ml::ImageTensor;
//!
//! let loader = FnLoader::new(|| {
//!     Ok(FnModel::new(|_: &NormalizedMetadata, _: &ImageTensor| {
//!         Ok::<_, ComputationError>(vec![0.1, 0.05, 0.05, 0.6, 0.05, 0.05, 0.05, 0.05])
//!     }))
//! });
//! let pipeline = InferencePipeline::new(loader);
//!
//! let photo = image::open("leaf.jpg")?;
//! let result = pipeline.classify_blocking(&photo, 26.0, 88.0, 35.0)?;
//! println!("{}", result.summary());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod encoder;
pub mod errors;
pub mod model;
pub mod notify;
pub mod pipeline;
pub mod tensor;

pub use encoder::{EncoderConfig, ImageTensorEncoder, ResizeFilter};
pub use errors::{ClassifyError, ComputationError, ErrorKind, ResourceError};
pub use model::{AssetLoader, FnLoader, FnModel, InferenceModel, ModelLoader, ModelSession};
pub use notify::{LogNotifier, Notifier};
pub use pipeline::{InferencePipeline, PipelineBuilder, PipelineConfig, Stage};
pub use tensor::ImageTensor;

// Re-export the numeric core and profiles for single-crate users
pub use agroguard_core::{ClassTable, ClassificationResult, MetadataNormalizer, MetadataValidator};
pub use agroguard_profiles::{ModelProfile, GLOBAL_REGISTRY};
