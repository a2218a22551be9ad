//! Model seam and scoped model sessions
//!
//! The trained network is a black box behind [`InferenceModel`]. A
//! [`ModelLoader`] produces a fresh model for every request, and a
//! [`ModelSession`] owns it for the duration of that request only:
//!
//! ```text
//! loader.load() -> ModelSession { infer ... } -> drop -> model.close()
//! ```
//!
//! `close` runs exactly once on every path out of the session, including
//! early returns and errors.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use agroguard_core::NormalizedMetadata;
use log::debug;

use crate::errors::{ComputationError, ResourceError};
use crate::tensor::ImageTensor;

/// A loaded model that maps (metadata, image) to one score per class
pub trait InferenceModel: Send {
    /// Run one forward pass
    fn infer(
        &mut self,
        metadata: &NormalizedMetadata,
        image: &ImageTensor,
    ) -> Result<Vec<f32>, ComputationError>;

    /// Release the underlying resource
    fn close(&mut self) {}
}

/// Loads a model on demand
pub trait ModelLoader: Send + Sync + 'static {
    type Model: InferenceModel;

    fn load(&self) -> Result<Self::Model, ResourceError>;
}

/// Exclusive, scoped access to a loaded model
pub struct ModelSession<M: InferenceModel> {
    model: M,
}

impl<M: InferenceModel> ModelSession<M> {
    /// Load a model and take ownership of it
    pub fn open<L>(loader: &L) -> Result<Self, ResourceError>
    where
        L: ModelLoader<Model = M>,
    {
        let model = loader.load()?;
        debug!("model session opened");
        Ok(Self { model })
    }

    pub fn infer(
        &mut self,
        metadata: &NormalizedMetadata,
        image: &ImageTensor,
    ) -> Result<Vec<f32>, ComputationError> {
        self.model.infer(metadata, image)
    }
}

impl<M: InferenceModel> Drop for ModelSession<M> {
    fn drop(&mut self) {
        self.model.close();
        debug!("model session closed");
    }
}

impl<M: InferenceModel> fmt::Debug for ModelSession<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelSession").finish_non_exhaustive()
    }
}

/// Reads a model asset from disk and hands the bytes to a factory
pub struct AssetLoader<F> {
    path: PathBuf,
    factory: F,
}

impl<F, M> AssetLoader<F>
where
    F: Fn(Vec<u8>) -> Result<M, ResourceError> + Send + Sync + 'static,
    M: InferenceModel,
{
    pub fn new(path: impl Into<PathBuf>, factory: F) -> Self {
        Self {
            path: path.into(),
            factory,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<F, M> ModelLoader for AssetLoader<F>
where
    F: Fn(Vec<u8>) -> Result<M, ResourceError> + Send + Sync + 'static,
    M: InferenceModel,
{
    type Model = M;

    fn load(&self) -> Result<M, ResourceError> {
        let bytes = fs::read(&self.path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ResourceError::Missing(self.path.clone())
            } else {
                ResourceError::Io {
                    path: self.path.clone(),
                    source,
                }
            }
        })?;
        debug!("read {} bytes from {}", bytes.len(), self.path.display());
        (self.factory)(bytes)
    }
}

/// Closure-backed model
pub struct FnModel<F>(F);

impl<F> FnModel<F>
where
    F: FnMut(&NormalizedMetadata, &ImageTensor) -> Result<Vec<f32>, ComputationError> + Send,
{
    pub fn new(infer: F) -> Self {
        Self(infer)
    }
}

impl<F> InferenceModel for FnModel<F>
where
    F: FnMut(&NormalizedMetadata, &ImageTensor) -> Result<Vec<f32>, ComputationError> + Send,
{
    fn infer(
        &mut self,
        metadata: &NormalizedMetadata,
        image: &ImageTensor,
    ) -> Result<Vec<f32>, ComputationError> {
        (self.0)(metadata, image)
    }
}

/// Closure-backed loader
pub struct FnLoader<F>(F);

impl<F, M> FnLoader<F>
where
    F: Fn() -> Result<M, ResourceError> + Send + Sync + 'static,
    M: InferenceModel,
{
    pub fn new(load: F) -> Self {
        Self(load)
    }
}

impl<F, M> ModelLoader for FnLoader<F>
where
    F: Fn() -> Result<M, ResourceError> + Send + Sync + 'static,
    M: InferenceModel,
{
    type Model = M;

    fn load(&self) -> Result<M, ResourceError> {
        (self.0)()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Counted {
        closes: Arc<AtomicUsize>,
        fail: bool,
    }

    impl InferenceModel for Counted {
        fn infer(
            &mut self,
            _metadata: &NormalizedMetadata,
            _image: &ImageTensor,
        ) -> Result<Vec<f32>, ComputationError> {
            if self.fail {
                Err(ComputationError::Model("boom".to_string()))
            } else {
                Ok(vec![0.5, 0.5])
            }
        }

        fn close(&mut self) {
            self.closes.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn inputs() -> (NormalizedMetadata, ImageTensor) {
        (
            NormalizedMetadata::from_array([0.0; 3]),
            ImageTensor::from_vec(1, vec![0.0; 3]).unwrap(),
        )
    }

    #[test]
    fn session_closes_once_on_success_and_failure() {
        for fail in [false, true] {
            let closes = Arc::new(AtomicUsize::new(0));
            let loader = FnLoader::new({
                let closes = Arc::clone(&closes);
                move || Ok(Counted { closes: Arc::clone(&closes), fail })
            });

            let (metadata, image) = inputs();
            {
                let mut session = ModelSession::open(&loader).unwrap();
                assert_eq!(session.infer(&metadata, &image).is_err(), fail);
            }
            assert_eq!(closes.load(Ordering::SeqCst), 1);
        }
    }

    #[test]
    fn asset_loader_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let loader = AssetLoader::new(dir.path().join("absent.tflite"), |_bytes: Vec<u8>| {
            Ok(FnModel::new(|_: &NormalizedMetadata, _: &ImageTensor| Ok(vec![1.0])))
        });
        assert!(matches!(loader.load(), Err(ResourceError::Missing(_))));
    }

    #[test]
    fn asset_loader_passes_bytes_to_factory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.bin");
        fs::write(&path, [1u8, 2, 3]).unwrap();

        let loader = AssetLoader::new(&path, |bytes: Vec<u8>| {
            let n = bytes.len() as f32;
            Ok(FnModel::new(move |_: &NormalizedMetadata, _: &ImageTensor| Ok(vec![n])))
        });
        let mut model = loader.load().unwrap();
        let (metadata, image) = inputs();
        assert_eq!(model.infer(&metadata, &image).unwrap(), vec![3.0]);
        assert_eq!(loader.path(), path.as_path());
    }
}
