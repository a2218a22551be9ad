//! Inference pipeline orchestration
//!
//! One request walks a fixed sequence of stages:
//!
//! ```text
//! Idle -> Preparing -> ModelLoaded -> Inferring -> Reducing -> Done
//!            |             |             |            |
//!            +-------------+------+------+------------+
//!                                 v
//!                               Error
//! ```
//!
//! - **Preparing**: validate and normalize the metadata while the image is
//!   encoded on another thread; join both.
//! - **ModelLoaded**: load the model through the [`ModelLoader`] into a
//!   [`ModelSession`]. Failures here are [`ResourceError`]s.
//! - **Inferring**: one forward pass; the session is dropped (and the model
//!   closed) before the scores leave this stage.
//! - **Reducing**: first-max arg-max and label lookup.
//!
//! Every request owns its data. A failed request does not affect the next
//! one.
//!
//! ## Delivery
//!
//! | Method | Runtime | Result |
//! |--------|---------|--------|
//! | [`InferencePipeline::classify`] | Tokio task | callback on success, [`Notifier`] on failure |
//! | [`InferencePipeline::classify_async`] | caller's Tokio runtime | `Result` |
//! | [`InferencePipeline::classify_blocking`] | scoped threads | `Result` |
//!
//! [`ResourceError`]: crate::ResourceError

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;

use agroguard_core::{
    reduce, ClassTable, ClassificationResult, MetadataNormalizer, MetadataValidator,
    NormalizedMetadata, RawMetadata,
};
use agroguard_profiles::{ModelProfile, ProfileError};
use image::DynamicImage;
use log::{debug, error, info, trace};
use tokio::runtime::Handle;
use tokio::task::{self, JoinError, JoinHandle};

use crate::encoder::{EncoderConfig, ImageTensorEncoder};
use crate::errors::{ClassifyError, ComputationError};
use crate::model::{ModelLoader, ModelSession};
use crate::notify::{LogNotifier, Notifier};
use crate::tensor::ImageTensor;

/// Position of a request in the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Idle,
    Preparing,
    ModelLoaded,
    Inferring,
    Reducing,
    Done,
    Error,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Preparing => "preparing",
            Self::ModelLoaded => "loading model",
            Self::Inferring => "inferring",
            Self::Reducing => "reducing",
            Self::Done => "done",
            Self::Error => "failed",
        };
        f.write_str(name)
    }
}

/// Injected configuration for one model version
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Metadata standardization
    pub normalizer: MetadataNormalizer,
    /// Raw metadata checks run before normalization; permissive by default
    pub validator: MetadataValidator,
    /// Labels in model output order
    pub classes: ClassTable,
    /// Image geometry and scaling
    pub encoder: EncoderConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            normalizer: MetadataNormalizer::default(),
            validator: MetadataValidator::permissive(),
            classes: ClassTable::default(),
            encoder: EncoderConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Build from a model profile
    pub fn from_profile(profile: &ModelProfile) -> Result<Self, ProfileError> {
        Ok(Self {
            normalizer: profile.normalizer()?,
            validator: profile.validator(),
            classes: profile.class_table()?,
            encoder: EncoderConfig::from_profile(profile),
        })
    }

    pub fn with_validator(mut self, validator: MetadataValidator) -> Self {
        self.validator = validator;
        self
    }

    pub fn with_classes(mut self, classes: ClassTable) -> Self {
        self.classes = classes;
        self
    }

    pub fn with_encoder(mut self, encoder: EncoderConfig) -> Self {
        self.encoder = encoder;
        self
    }
}

type StageHook = Box<dyn Fn(Stage) + Send + Sync>;

struct Inner<L> {
    config: PipelineConfig,
    encoder: ImageTensorEncoder,
    loader: L,
    notifier: Box<dyn Notifier>,
    runtime: Option<Handle>,
    stage_hook: Option<StageHook>,
}

impl<L: ModelLoader> Inner<L> {
    fn enter(&self, stage: Stage) {
        trace!("stage: {}", stage);
        if let Some(hook) = &self.stage_hook {
            hook(stage);
        }
    }

    fn prepare_metadata(&self, raw: &RawMetadata) -> Result<NormalizedMetadata, ClassifyError> {
        self.config
            .validator
            .validate(raw)
            .map_err(|e| ClassifyError::computation(Stage::Preparing, e))?;

        let normalized = self.config.normalizer.normalize_raw(raw);
        debug!("metadata: {} -> normalized {}", raw, normalized);
        Ok(normalized)
    }

    fn encode_image(&self, image: &DynamicImage) -> Result<ImageTensor, ClassifyError> {
        self.encoder
            .encode(image)
            .map_err(|e| ClassifyError::computation(Stage::Preparing, e))
    }

    /// Load, infer, release. The session never outlives this call.
    fn run_model(
        &self,
        metadata: &NormalizedMetadata,
        image: &ImageTensor,
    ) -> Result<Vec<f32>, ClassifyError> {
        self.enter(Stage::ModelLoaded);
        let mut session = ModelSession::open(&self.loader)?;

        self.enter(Stage::Inferring);
        let scores = panic::catch_unwind(AssertUnwindSafe(|| session.infer(metadata, image)))
            .unwrap_or_else(|payload| {
                Err(ComputationError::Model(format!("model panicked: {}", panic_message(&*payload))))
            })
            .map_err(|e| ClassifyError::computation(Stage::Inferring, e))?;
        drop(session);

        debug!("raw confidences: {:?}", scores);
        Ok(scores)
    }

    fn reduce(&self, scores: &[f32]) -> Result<ClassificationResult, ClassifyError> {
        self.enter(Stage::Reducing);
        let result = reduce(scores, &self.config.classes)
            .map_err(|e| ClassifyError::computation(Stage::Reducing, e))?;

        info!("predicted {} ({}%)", result.class_name(), result.percent());
        Ok(result)
    }

    fn run_blocking(
        &self,
        image: &DynamicImage,
        raw: &RawMetadata,
    ) -> Result<ClassificationResult, ClassifyError> {
        self.enter(Stage::Preparing);
        let (metadata, tensor) = thread::scope(|scope| {
            let encoding = scope.spawn(|| self.encode_image(image));
            let metadata = self.prepare_metadata(raw);
            let tensor = encoding.join().unwrap_or_else(|_| {
                Err(ClassifyError::computation(
                    Stage::Preparing,
                    ComputationError::TaskFailed("image encoding panicked".to_string()),
                ))
            });
            (metadata, tensor)
        });
        let metadata = metadata?;
        let tensor = tensor?;

        let scores = self.run_model(&metadata, &tensor)?;
        self.reduce(&scores)
    }

    fn finish(
        &self,
        result: Result<ClassificationResult, ClassifyError>,
    ) -> Result<ClassificationResult, ClassifyError> {
        match &result {
            Ok(_) => self.enter(Stage::Done),
            Err(err) => {
                self.enter(Stage::Error);
                error!("classification failed while {}: {}", err.stage(), err);
            }
        }
        result
    }
}

async fn run_async<L: ModelLoader>(
    inner: Arc<Inner<L>>,
    image: DynamicImage,
    raw: RawMetadata,
) -> Result<ClassificationResult, ClassifyError> {
    inner.enter(Stage::Preparing);
    let encoding = task::spawn_blocking({
        let inner = Arc::clone(&inner);
        move || inner.encode_image(&image)
    });
    let metadata = inner.prepare_metadata(&raw);
    let tensor = encoding.await;
    let metadata = metadata?;
    let tensor = tensor.map_err(|e| ClassifyError::computation(Stage::Preparing, join_failure(e)))??;

    let scores = task::spawn_blocking({
        let inner = Arc::clone(&inner);
        move || inner.run_model(&metadata, &tensor)
    })
    .await
    .map_err(|e| ClassifyError::computation(Stage::Inferring, join_failure(e)))??;

    inner.reduce(&scores)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

fn join_failure(err: JoinError) -> ComputationError {
    ComputationError::TaskFailed(err.to_string())
}

/// Multimodal classification pipeline
///
/// Cheap to clone; clones share configuration and loader.
pub struct InferencePipeline<L: ModelLoader> {
    inner: Arc<Inner<L>>,
}

impl<L: ModelLoader> Clone for InferencePipeline<L> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<L: ModelLoader> InferencePipeline<L> {
    /// Pipeline with the reference configuration
    pub fn new(loader: L) -> Self {
        Self::builder(loader).build()
    }

    pub fn builder(loader: L) -> PipelineBuilder<L> {
        PipelineBuilder {
            loader,
            config: PipelineConfig::default(),
            notifier: Box::new(LogNotifier),
            runtime: None,
            stage_hook: None,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.inner.config
    }

    pub fn loader(&self) -> &L {
        &self.inner.loader
    }

    /// Classify on a Tokio task and hand the result to `callback`
    ///
    /// The callback runs exactly once if classification succeeds. On failure
    /// it is dropped uncalled and the pipeline's [`Notifier`] receives the
    /// error. Uses the runtime given to the builder, else the current one.
    /// Returns `None` (after notifying) when neither exists.
    pub fn classify<F>(
        &self,
        image: DynamicImage,
        temperature: f32,
        humidity: f32,
        age: f32,
        callback: F,
    ) -> Option<JoinHandle<()>>
    where
        F: FnOnce(ClassificationResult) + Send + 'static,
    {
        let runtime = match self.inner.runtime.clone().or_else(|| Handle::try_current().ok()) {
            Some(runtime) => runtime,
            None => {
                let err = ClassifyError::computation(
                    Stage::Idle,
                    ComputationError::TaskFailed("no Tokio runtime available".to_string()),
                );
                if let Err(err) = self.inner.finish(Err(err)) {
                    self.inner.notifier.notify(&err);
                }
                return None;
            }
        };

        let inner = Arc::clone(&self.inner);
        let raw = RawMetadata::new(temperature, humidity, age);
        Some(runtime.spawn(async move {
            let result = run_async(Arc::clone(&inner), image, raw).await;
            match inner.finish(result) {
                Ok(result) => callback(result),
                Err(err) => inner.notifier.notify(&err),
            }
        }))
    }

    /// Classify and return the result
    ///
    /// Must be polled inside a Tokio runtime; blocking work goes to its
    /// blocking pool.
    pub async fn classify_async(
        &self,
        image: DynamicImage,
        temperature: f32,
        humidity: f32,
        age: f32,
    ) -> Result<ClassificationResult, ClassifyError> {
        let raw = RawMetadata::new(temperature, humidity, age);
        let result = run_async(Arc::clone(&self.inner), image, raw).await;
        self.inner.finish(result)
    }

    /// Classify on the calling thread, encoding the image on a scoped thread
    pub fn classify_blocking(
        &self,
        image: &DynamicImage,
        temperature: f32,
        humidity: f32,
        age: f32,
    ) -> Result<ClassificationResult, ClassifyError> {
        let raw = RawMetadata::new(temperature, humidity, age);
        let result = self.inner.run_blocking(image, &raw);
        self.inner.finish(result)
    }
}

/// Builder for [`InferencePipeline`]
pub struct PipelineBuilder<L> {
    loader: L,
    config: PipelineConfig,
    notifier: Box<dyn Notifier>,
    runtime: Option<Handle>,
    stage_hook: Option<StageHook>,
}

impl<L: ModelLoader> PipelineBuilder<L> {
    pub fn config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// Receiver for failures of [`InferencePipeline::classify`]
    pub fn notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    /// Runtime for [`InferencePipeline::classify`] when called off-runtime
    pub fn runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Called on every stage transition of every request
    pub fn on_stage(mut self, hook: impl Fn(Stage) + Send + Sync + 'static) -> Self {
        self.stage_hook = Some(Box::new(hook));
        self
    }

    pub fn build(self) -> InferencePipeline<L> {
        let encoder = ImageTensorEncoder::new(self.config.encoder);
        InferencePipeline {
            inner: Arc::new(Inner {
                config: self.config,
                encoder,
                loader: self.loader,
                notifier: self.notifier,
                runtime: self.runtime,
                stage_hook: self.stage_hook,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FnLoader, FnModel};
    use crate::ErrorKind;
    use agroguard_core::constants::METADATA_MEANS;
    use agroguard_profiles::GLOBAL_REGISTRY;
    use image::{Rgb, RgbImage};
    use std::sync::Mutex;

    type StubFn = fn(&NormalizedMetadata, &ImageTensor) -> Result<Vec<f32>, ComputationError>;

    fn downy(_: &NormalizedMetadata, _: &ImageTensor) -> Result<Vec<f32>, ComputationError> {
        Ok(vec![0.1, 0.05, 0.05, 0.6, 0.05, 0.05, 0.05, 0.05])
    }

    fn stub_loader(infer: StubFn) -> FnLoader<impl Fn() -> Result<FnModel<StubFn>, crate::ResourceError>> {
        FnLoader::new(move || Ok(FnModel::new(infer)))
    }

    fn leaf() -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(32, 24, Rgb([40, 160, 60])))
    }

    #[test]
    fn profile_config_matches_default() {
        let profile = GLOBAL_REGISTRY.get("cucumber_multimodal_v1").unwrap();
        let config = PipelineConfig::from_profile(&profile).unwrap();
        let reference = PipelineConfig::default();
        assert_eq!(config.normalizer, reference.normalizer);
        for i in 0..3 {
            assert_eq!(config.normalizer.means()[i].to_bits(), reference.normalizer.means()[i].to_bits());
            assert_eq!(config.normalizer.scales()[i].to_bits(), reference.normalizer.scales()[i].to_bits());
        }
        assert_eq!(config.classes, reference.classes);
        assert_eq!(config.validator, reference.validator);
        assert_eq!(config.encoder, reference.encoder);
    }

    #[test]
    fn blocking_classification_end_to_end() {
        let pipeline = InferencePipeline::new(stub_loader(downy));
        let result = pipeline
            .classify_blocking(&leaf(), METADATA_MEANS[0], METADATA_MEANS[1], METADATA_MEANS[2])
            .unwrap();
        assert_eq!(result.class_name(), "Downy Mildew");
        assert_eq!(result.confidence(), 0.6);
    }

    #[test]
    fn stages_are_reported_in_order() {
        let stages = Arc::new(Mutex::new(Vec::new()));
        let pipeline = InferencePipeline::builder(stub_loader(downy))
            .on_stage({
                let stages = Arc::clone(&stages);
                move |stage| stages.lock().unwrap().push(stage)
            })
            .build();

        pipeline.classify_blocking(&leaf(), 26.0, 88.0, 35.0).unwrap();
        assert_eq!(
            stages.lock().unwrap().as_slice(),
            &[Stage::Preparing, Stage::ModelLoaded, Stage::Inferring, Stage::Reducing, Stage::Done]
        );
    }

    #[test]
    fn invalid_metadata_fails_before_model_load() {
        let stages = Arc::new(Mutex::new(Vec::new()));
        let pipeline = InferencePipeline::builder(stub_loader(downy))
            .on_stage({
                let stages = Arc::clone(&stages);
                move |stage| stages.lock().unwrap().push(stage)
            })
            .build();

        let err = pipeline.classify_blocking(&leaf(), 26.0, f32::NAN, 35.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Computation);
        assert_eq!(err.stage(), Stage::Preparing);
        assert!(!stages.lock().unwrap().contains(&Stage::ModelLoaded));
    }

    #[test]
    fn empty_output_is_a_reduction_failure() {
        fn empty(_: &NormalizedMetadata, _: &ImageTensor) -> Result<Vec<f32>, ComputationError> {
            Ok(Vec::new())
        }
        let pipeline = InferencePipeline::new(stub_loader(empty));
        let err = pipeline.classify_blocking(&leaf(), 26.0, 88.0, 35.0).unwrap_err();
        assert!(matches!(
            err,
            ClassifyError::Computation { stage: Stage::Reducing, source: ComputationError::EmptyOutput }
        ));
    }

    #[test]
    fn classify_without_runtime_notifies() {
        let notices = Arc::new(Mutex::new(Vec::new()));
        let pipeline = InferencePipeline::builder(stub_loader(downy))
            .notifier({
                let notices = Arc::clone(&notices);
                move |err: &ClassifyError| notices.lock().unwrap().push(err.stage())
            })
            .build();

        let handle = pipeline.classify(leaf(), 26.0, 88.0, 35.0, |_| panic!("no result expected"));
        assert!(handle.is_none());
        assert_eq!(notices.lock().unwrap().as_slice(), &[Stage::Idle]);
    }
}
