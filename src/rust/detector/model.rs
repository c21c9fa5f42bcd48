use std::sync::Arc;

use super::backend::{InferenceBackend, OnnxBackend};
use super::error::DetectorError;
use super::utils::to_probabilities;
use super::DetectorInfo;
use crate::analysis::Analysis;
use crate::config::DetectorConfig;
use crate::image_input::ImageInput;
use crate::model_loader::{ModelDefinition, ModelLoader, ModelSource};
use crate::predictions::Prediction;

/// Lifecycle of the model behind a [`Detector`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelStatus {
    Unloaded,
    /// A load has started but not finished. Since loading borrows the detector
    /// mutably, this is only observed after a load future was dropped early
    /// (for example by a timeout); predictions are refused until the next load.
    Loading,
    Loaded,
    /// The last load failed; holds the message shown to the user
    Failed(String),
}

#[derive(Debug)]
struct LoadedModel {
    definition: ModelDefinition,
    backend: Arc<dyn InferenceBackend>,
}

/// Loads a Teachable Machine model and classifies images with it.
///
/// Predictions are refused until a load has succeeded:
/// ```rust,no_run
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// use component_detector::{Detector, DetectorConfig, ImageInput};
///
/// let mut detector = Detector::new(DetectorConfig::default());
/// detector.load().await?;
///
/// let image = ImageInput::open("breadboard.jpg").await?;
/// for prediction in detector.predict(&image).await? {
///     println!("{}: {:.1}%", prediction.class_name, prediction.percentage());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Detector {
    config: DetectorConfig,
    loader: ModelLoader,
    status: ModelStatus,
    model: Option<LoadedModel>,
}

impl Detector {
    pub fn new(config: DetectorConfig) -> Self {
        Self::with_loader(config, ModelLoader::new())
    }

    pub fn with_loader(config: DetectorConfig, loader: ModelLoader) -> Self {
        Self {
            config,
            loader,
            status: ModelStatus::Unloaded,
            model: None,
        }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn status(&self) -> &ModelStatus {
        &self.status
    }

    pub fn is_loaded(&self) -> bool {
        self.status == ModelStatus::Loaded
    }

    /// The message of the last failed load, if the detector is in the failed state.
    pub fn error(&self) -> Option<&str> {
        match &self.status {
            ModelStatus::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn info(&self) -> Option<DetectorInfo> {
        self.model.as_ref().map(|model| DetectorInfo::from(&model.definition))
    }

    /// Loads the model at the configured URL.
    pub async fn load(&mut self) -> Result<DetectorInfo, DetectorError> {
        let url = self.config.model_url.clone();
        self.load_from(&url).await
    }

    /// Loads the model definition at `url` and its ONNX export into ONNX Runtime.
    ///
    /// On failure the detector moves to [`ModelStatus::Failed`] and any previously
    /// loaded model is dropped.
    pub async fn load_from(&mut self, url: &str) -> Result<DetectorInfo, DetectorError> {
        self.begin_load(url);
        let result = self.load_onnx(url).await;
        self.finish_load(result)
    }

    /// Loads the model definition at `url` and runs it on the given backend.
    pub async fn load_with_backend(
        &mut self,
        url: &str,
        backend: Arc<dyn InferenceBackend>,
    ) -> Result<DetectorInfo, DetectorError> {
        self.begin_load(url);
        let result = self
            .load_definition(url)
            .await
            .map(|definition| LoadedModel { definition, backend });
        self.finish_load(result)
    }

    async fn load_definition(&self, url: &str) -> Result<ModelDefinition, DetectorError> {
        let source = ModelSource::parse(url)?;
        Ok(self.loader.load_definition(&source).await?)
    }

    async fn load_onnx(&self, url: &str) -> Result<LoadedModel, DetectorError> {
        let definition = self.load_definition(url).await?;
        let location = self
            .config
            .onnx_location
            .clone()
            .unwrap_or_else(|| definition.source.onnx_url());
        let model_bytes = self.loader.fetch(&location).await?;

        let runtime = self.config.runtime.clone();
        let backend = tokio::task::spawn_blocking(move || OnnxBackend::from_memory(&model_bytes, &runtime))
            .await
            .map_err(|e| DetectorError::LoadError(format!("Session build task failed: {}", e)))??;

        Ok(LoadedModel {
            definition,
            backend: Arc::new(backend),
        })
    }

    fn begin_load(&mut self, url: &str) {
        log::info!("Loading model from {}", url);
        self.status = ModelStatus::Loading;
    }

    fn finish_load(&mut self, result: Result<LoadedModel, DetectorError>) -> Result<DetectorInfo, DetectorError> {
        match result {
            Ok(model) => {
                let info = DetectorInfo::from(&model.definition);
                log::info!("Model loaded: {} classes ({})", info.labels.len(), info.labels.join(", "));
                self.model = Some(model);
                self.status = ModelStatus::Loaded;
                Ok(info)
            }
            Err(e) => {
                log::error!("Model load failed: {}", e);
                self.model = None;
                self.status = ModelStatus::Failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Classifies an image, returning one prediction per label in model order.
    ///
    /// # Errors
    /// - `ModelNotLoaded` unless a load has succeeded
    /// - `PredictionError` if inference fails, the output does not match the labels,
    ///   or any score is NaN or infinite
    pub async fn predict(&self, image: &ImageInput) -> Result<Vec<Prediction>, DetectorError> {
        let model = match (&self.status, &self.model) {
            (ModelStatus::Loaded, Some(model)) => model,
            _ => return Err(DetectorError::ModelNotLoaded),
        };

        let metadata = &model.definition.metadata;
        let tensor = image.to_tensor(metadata.image_size)?;
        let backend = Arc::clone(&model.backend);
        let output = tokio::task::spawn_blocking(move || backend.infer(tensor))
            .await
            .map_err(|e| DetectorError::PredictionError(format!("Inference task failed: {}", e)))??;

        if output.len() != metadata.labels.len() {
            return Err(DetectorError::PredictionError(format!(
                "Model returned {} scores for {} labels",
                output.len(),
                metadata.labels.len()
            )));
        }
        if let Some(index) = output.iter().position(|score| !score.is_finite()) {
            return Err(DetectorError::PredictionError(format!(
                "Model returned a non-finite score ({}) for '{}'",
                output[index], metadata.labels[index]
            )));
        }

        let predictions: Vec<Prediction> = metadata
            .labels
            .iter()
            .zip(to_probabilities(output))
            .map(|(label, probability)| Prediction::new(label.clone(), probability))
            .collect();
        log::debug!("Predictions for {}: {:?}", image.name(), predictions);
        Ok(predictions)
    }

    /// Classifies an image and derives ranked results and project suggestions.
    pub async fn analyze(&self, image: &ImageInput) -> Result<Analysis, DetectorError> {
        let predictions = self.predict(image).await?;
        Ok(Analysis::from_predictions(&predictions, self.config.threshold))
    }
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<Detector>();
    }
};
